//! Module maps for C/C++ headers imported from Swift.
//!
//! Upstream libraries that expose headers to Swift publish an interface
//! variant tagged with `requires-module-map=true`. For each binary, those
//! artifacts are grouped by producing component into one `ModuleMap` per
//! module name, which the compile step materialises as `module.modulemap`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attribute::{Attribute, AttributeSet};
use crate::channel::ResolutionChannel;
use crate::deferred::Deferred;
use crate::error::BuildError;
use crate::resolution::ResolutionEngine;

mod aggregate;
mod file;

pub use aggregate::aggregate;
pub use file::{write_module_map, MODULE_MAP_FILE_NAME};

/// Marks variants whose artifacts must be packaged into a module map.
pub const REQUIRES_MODULE_MAP: Attribute<bool> = Attribute::of("requires-module-map");

/// A module name and the public headers it exposes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMap {
    pub module_name: String,
    pub public_header_paths: Vec<String>,
}

impl ModuleMap {
    pub fn new(module_name: impl Into<String>, public_header_paths: Vec<String>) -> Self {
        Self {
            module_name: module_name.into(),
            public_header_paths,
        }
    }
}

/// Lazily computed module maps of a binary.
pub type ModuleMaps = Deferred<Result<Vec<ModuleMap>, BuildError>>;

/// Module maps for everything the compile channel pulls in.
///
/// Builds a view of `compile` that also requires `requires-module-map=true`,
/// resolves it and aggregates the result. Nothing runs until the returned
/// value is first read.
pub fn module_maps_of(compile: &Arc<ResolutionChannel>, engine: Arc<dyn ResolutionEngine>) -> ModuleMaps {
    let view = compile.artifact_view(
        AttributeSet::builder()
            .attribute(REQUIRES_MODULE_MAP, true)
            .build(),
    );
    Deferred::new(move || -> Result<Vec<ModuleMap>, BuildError> {
        let artifacts = engine.resolve(&view)?;
        let maps = aggregate(&artifacts)?;
        debug!(
            channel = view.channel().name(),
            artifacts = artifacts.len(),
            modules = maps.len(),
            "computed module maps"
        );
        Ok(maps)
    })
}

#[cfg(test)]
mod tests;
