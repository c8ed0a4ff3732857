use std::path::PathBuf;

use nativebin::diagnostic::Diagnostic;
use nativebin::{BuildError, ChannelPurpose};

use super::{display_path, fail, fail_build, find_binary, load_project};

pub fn cmd_artifacts(input: Option<PathBuf>, binary: &str, purpose: &str) {
    let purpose: ChannelPurpose = match purpose.parse() {
        Ok(p) => p,
        Err(e) => fail(Diagnostic::error(e)),
    };
    let project = load_project(input);
    let binary = find_binary(&project, binary);
    let set = binary.artifacts(purpose);

    let artifacts = match set.artifacts() {
        Ok(a) => a,
        Err(failure) => fail_build(&BuildError::Resolution(failure.clone())),
    };
    eprintln!(
        "{}: {} artifacts",
        set.channel().name(),
        artifacts.len()
    );
    for artifact in artifacts {
        println!("{}\t{}", display_path(&artifact.file), artifact.producer);
    }
}
