use indexmap::IndexMap;

use super::ModuleMap;
use crate::component::classify;
use crate::error::BuildError;
use crate::resolution::ResolvedArtifact;

/// Group artifacts into module maps by the module name of their producer.
///
/// Module maps appear in the order their name is first seen; header paths
/// keep artifact order and are never deduplicated. Any unclassifiable
/// producer fails the whole call.
pub fn aggregate(artifacts: &[ResolvedArtifact]) -> Result<Vec<ModuleMap>, BuildError> {
    let mut headers: IndexMap<&str, Vec<String>> = IndexMap::new();
    for artifact in artifacts {
        let module_name = classify(&artifact.producer)?;
        headers
            .entry(module_name)
            .or_default()
            .push(artifact.file.display().to_string());
    }
    Ok(headers
        .into_iter()
        .map(|(name, paths)| ModuleMap::new(name, paths))
        .collect())
}
