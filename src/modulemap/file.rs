//! Clang module map files.
//!
//! ```text
//! module Json {
//!     umbrella "/repo/json/include"
//!     header "/repo/json/extra/Json.h"
//!     export *
//! }
//! ```

use std::fmt::Write as _;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::ModuleMap;

pub const MODULE_MAP_FILE_NAME: &str = "module.modulemap";

impl ModuleMap {
    /// Render as module map text. Directories become umbrella directories,
    /// anything else a header.
    pub fn render(&self) -> String {
        self.render_with(|path| path.is_dir())
    }

    pub(crate) fn render_with(&self, is_dir: impl Fn(&Path) -> bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "module {} {{", self.module_name);
        for header in &self.public_header_paths {
            let keyword = if is_dir(Path::new(header)) {
                "umbrella"
            } else {
                "header"
            };
            let _ = writeln!(out, "    {} \"{}\"", keyword, escape(header));
        }
        out.push_str("    export *\n");
        out.push_str("}\n");
        out
    }
}

/// Exactly one normal path component: no separators, `.` or `..`.
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

fn escape(path: &str) -> String {
    path.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Write `<out_dir>/<module>/module.modulemap`.
///
/// An existing file with identical content is left untouched so its
/// modification time stays stable for incremental compiles.
pub fn write_module_map(map: &ModuleMap, out_dir: &Path) -> io::Result<PathBuf> {
    if !is_single_component(&map.module_name) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("module name '{}' is not a plain directory name", map.module_name),
        ));
    }
    let dir = out_dir.join(&map.module_name);
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(MODULE_MAP_FILE_NAME);
    let content = map.render();

    if let Ok(existing) = std::fs::read_to_string(&path) {
        if existing == content {
            debug!(path = %path.display(), "module map up to date");
            return Ok(path);
        }
    }
    std::fs::write(&path, content)?;
    debug!(path = %path.display(), "wrote module map");
    Ok(path)
}
