mod artifacts;
mod channels;
mod maps;

pub use artifacts::cmd_artifacts;
pub use channels::cmd_channels;
pub use maps::{cmd_generate, cmd_module_maps};

use std::path::{Path, PathBuf};
use std::process;

use nativebin::config::{Manifest, MANIFEST_FILE_NAME};
use nativebin::diagnostic::Diagnostic;
use nativebin::{BinaryDescriptor, BuildError, NativeProject};

/// Report a diagnostic and exit with status 1.
pub(crate) fn fail(diagnostic: Diagnostic) -> ! {
    diagnostic.render();
    process::exit(1);
}

pub(crate) fn fail_build(err: &BuildError) -> ! {
    fail(Diagnostic::from(err))
}

/// Locate `native.toml` from an optional project directory and load it.
pub(crate) fn load_project(input: Option<PathBuf>) -> NativeProject {
    let start = input.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let manifest_path = if start.is_file() {
        start
    } else {
        match Manifest::find(&start) {
            Some(p) => p,
            None => fail(
                Diagnostic::error(format!(
                    "no {} found in '{}' or its ancestors",
                    MANIFEST_FILE_NAME,
                    start.display()
                ))
                .with_help("run from a project directory or pass its path".to_string()),
            ),
        }
    };
    NativeProject::load(&manifest_path).unwrap_or_else(|d| fail(d))
}

pub(crate) fn find_binary<'a>(project: &'a NativeProject, name: &str) -> &'a BinaryDescriptor {
    match project.binary(name) {
        Some(b) => b,
        None => {
            let known: Vec<&str> = project.binaries().iter().map(|b| b.name()).collect();
            fail(
                Diagnostic::error(format!("no binary named '{}'", name))
                    .with_note(format!("declared binaries: {}", known.join(", "))),
            )
        }
    }
}

pub(crate) fn display_path(path: &Path) -> String {
    path.display().to_string()
}
