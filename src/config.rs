use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Backing file for the project table.
    pub data_file: PathBuf,
    /// Directory where uploaded images are kept.
    pub image_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            data_file: PathBuf::from("projects.csv"),
            image_dir: PathBuf::from("uploads"),
        }
    }
}

impl Config {
    /// Loads the configuration file, falling back to the defaults when the
    /// file does not exist.
    pub fn load(file_name: &Path) -> Result<Config> {
        if !file_name.exists() {
            return Ok(Config::default());
        }
        let text =
            fs::read_to_string(file_name).wrap_err("cannot load configuration file")?;
        toml::from_str(&text).wrap_err("cannot parse configuration file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_yields_defaults() {
        let config = Config::load(Path::new("no/such/hub.toml")).unwrap();
        assert_eq!(config.data_file, PathBuf::from("projects.csv"));
        assert_eq!(config.image_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hub.toml");
        fs::write(&path, "data_file = \"table.csv\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_file, PathBuf::from("table.csv"));
        assert_eq!(config.image_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hub.toml");
        fs::write(&path, "data_fle = \"oops.csv\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
