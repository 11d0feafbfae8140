use crate::images;
use crate::model::{ProjectEntry, TIMESTAMP_FORMAT};
use crate::registry::{Filter, Registry};

pub fn display_home(registry: &Registry, count: usize) {
    println!("Latest student projects");
    println!();
    if registry.is_empty() {
        println!("No projects have been submitted yet. Be the first to showcase your work!");
        return;
    }
    display_entries(&registry.latest(count));
}

pub fn display_view(registry: &Registry, filter: &Filter) {
    if !registry.is_empty() {
        println!("Departments: {}", registry.departments().join(", "));
        println!("Modules: {}", registry.modules().join(", "));
        println!();
    }
    let entries = registry.filter(filter);
    if entries.is_empty() {
        println!("No projects found. Please try changing the filters.");
        return;
    }
    display_entries(&entries);
}

pub fn display_about() {
    println!("About the Student Innovation Hub");
    println!();
    println!(
        "This platform serves as a central hub for students to submit, share, and \
         explore innovative projects and assignments. Whether individual or group \
         work, the Innovation Hub showcases the creativity and technical skills of \
         students in various fields."
    );
}

fn display_entries(entries: &[&ProjectEntry]) {
    for entry in entries {
        println!("{}:", entry.name);
        println!("  Department: {}", entry.department);
        println!("  Module: {}", entry.module);
        println!("  Assignment: {} - {}", entry.kind, entry.assignment);
        println!("  Link: {}", entry.live_link);
        println!("  Image: {}", images::display_path(&entry.image));
        if let Some(timestamp) = entry.timestamp {
            println!("  Submitted: {}", timestamp.format(TIMESTAMP_FORMAT));
        }
        println!();
    }
}
