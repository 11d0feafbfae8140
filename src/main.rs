use crate::config::Config;
use crate::images::Upload;
use crate::model::{AssignmentKind, Submission};
use crate::registry::{Filter, Registry, SubmitError};
use clap::{ArgAction, Parser, Subcommand};
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, warn};
use tracing_subscriber::filter::LevelFilter;

mod config;
mod display;
mod images;
mod model;
mod registry;
mod store;

#[derive(Parser)]
#[command(version, about = "Catalog and showcase student project submissions")]
struct Cli {
    /// Use FILE instead of hub.toml
    #[arg(short, long, value_name = "FILE", default_value = "hub.toml")]
    config: PathBuf,
    /// Set verbosity level
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the latest submitted projects
    Home {
        /// Number of projects to show
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
    /// Submit a project
    Submit(SubmitArgs),
    /// Browse and filter submitted projects
    View {
        /// Only show projects from this department
        #[arg(long)]
        department: Option<String>,
        /// Only show projects for this module
        #[arg(long)]
        module: Option<String>,
        /// Only show group projects
        #[arg(long)]
        group_only: bool,
    },
    /// What this platform is for
    About,
}

#[derive(clap::Args)]
struct SubmitArgs {
    /// Full name
    #[arg(long)]
    name: String,
    /// Department
    #[arg(long)]
    department: String,
    /// Module
    #[arg(long)]
    module: String,
    /// Assignment type (individual or group)
    #[arg(long, value_parser = AssignmentKind::from_str)]
    kind: AssignmentKind,
    /// Assignment name (e.g., Assignment #1, Final Project)
    #[arg(long, default_value = "")]
    assignment: String,
    /// Live portfolio link
    #[arg(long)]
    link: String,
    /// Profile picture or project screenshot (jpg or png)
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
    let config = Config::load(&cli.config)?;
    let mut registry = Registry::load(&config)?;
    debug!(projects = registry.len(), "project table loaded");
    match cli.command {
        Command::Home { count } => display::display_home(&registry, count),
        Command::Submit(args) => submit(&mut registry, args)?,
        Command::View {
            department,
            module,
            group_only,
        } => {
            let filter = Filter {
                department,
                module,
                group_only,
            };
            display::display_view(&registry, &filter);
        }
        Command::About => display::display_about(),
    }
    Ok(())
}

fn submit(registry: &mut Registry, args: SubmitArgs) -> Result<()> {
    let image = match &args.image {
        Some(path) => Some(Upload::read(path).wrap_err("cannot read image file")?),
        None => None,
    };
    let submission = Submission {
        name: args.name,
        department: args.department,
        module: args.module,
        kind: args.kind,
        assignment: args.assignment,
        live_link: args.link,
    };
    match registry.submit(submission, image) {
        Ok(()) => {
            println!("Your project has been submitted successfully!");
            Ok(())
        }
        // Duplicates are warned about, not recorded.
        Err(err @ SubmitError::Duplicate { .. }) => {
            warn!("{err}");
            Ok(())
        }
        Err(err @ SubmitError::MissingFields(_)) => {
            Err(err).wrap_err("please fill out all required fields")
        }
        Err(err) => Err(err).wrap_err("cannot record submission"),
    }
}
