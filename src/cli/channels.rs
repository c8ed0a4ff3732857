use std::path::PathBuf;

use super::load_project;

pub fn cmd_channels(input: Option<PathBuf>) {
    let project = load_project(input);
    println!(
        "Project {} (module {}), {} declared dependencies",
        project.name,
        project.module(),
        project.implementation().dependencies().len()
    );
    for dep in project.implementation().dependencies() {
        println!("  {}", dep);
    }
    for binary in project.binaries() {
        println!(
            "\n{} (debuggable={}, optimized={}, testable={})",
            binary.name(),
            binary.is_debuggable(),
            binary.is_optimized(),
            binary.is_testable()
        );
        for (purpose, channel) in binary.channels().iter() {
            println!(
                "  {:<8} {:<28} {}",
                purpose.to_string(),
                channel.name(),
                channel.attributes()
            );
        }
    }
}
