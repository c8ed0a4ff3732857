use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, trace};

use super::{ArtifactRequest, ResolutionEngine, ResolutionFailure, ResolvedArtifact};
use crate::attribute::AttributeSet;
use crate::component::ComponentIdentifier;
use crate::dependency::Dependency;

/// One published flavour of a component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub attributes: AttributeSet,
    pub files: Vec<PathBuf>,
    /// Dependencies pulled in when this variant is selected.
    pub dependencies: Vec<Dependency>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub id: ComponentIdentifier,
    pub variants: Vec<Variant>,
}

/// In-memory component repository acting as a resolution engine.
///
/// Selection is strict: a variant matches when it declares every requested
/// attribute with an equal value, and exactly one variant may match.
#[derive(Clone, Debug, Default)]
pub struct LocalRepository {
    components: Vec<Component>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.add(component);
        self
    }

    pub fn add(&mut self, component: Component) {
        self.components.push(component);
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    fn find(&self, dependency: &Dependency) -> Option<&Component> {
        self.components.iter().find(|c| dependency.selects(&c.id))
    }

    /// Reject repositories whose component graph contains a cycle.
    pub fn validate(&self) -> Result<(), ResolutionFailure> {
        let mut graph: DiGraph<&ComponentIdentifier, ()> = DiGraph::new();
        let nodes: BTreeMap<&ComponentIdentifier, NodeIndex> = self
            .components
            .iter()
            .map(|c| (&c.id, graph.add_node(&c.id)))
            .collect();

        for component in &self.components {
            let from = nodes[&component.id];
            for variant in &component.variants {
                for dependency in &variant.dependencies {
                    if let Some(target) = self.find(dependency) {
                        graph.update_edge(from, nodes[&target.id], ());
                    }
                }
            }
        }

        toposort(&graph, None)
            .map(|_| ())
            .map_err(|cycle| ResolutionFailure::DependencyCycle {
                component: graph[cycle.node_id()].display_name(),
            })
    }

    /// Variants of `component` satisfying `requested`; more than one is an error.
    fn select<'a>(
        component: &'a Component,
        requested: &AttributeSet,
    ) -> Result<Option<&'a Variant>, ResolutionFailure> {
        let matching: Vec<&Variant> = component
            .variants
            .iter()
            .filter(|v| requested.is_satisfied_by(&v.attributes))
            .collect();
        match matching.as_slice() {
            [] => Ok(None),
            [one] => Ok(Some(*one)),
            many => Err(ResolutionFailure::AmbiguousVariants {
                component: component.id.display_name(),
                requested: requested.to_string(),
                candidates: many.len(),
            }),
        }
    }

    /// Depth-first preorder walk of the dependency graph, each component once.
    fn walk<'a>(
        &'a self,
        request: &ArtifactRequest,
        dependencies: &[Dependency],
        visited: &mut HashSet<&'a ComponentIdentifier>,
        nodes: &mut Vec<(&'a Component, &'a Variant)>,
    ) -> Result<(), ResolutionFailure> {
        let channel = request.channel();
        for dependency in dependencies {
            let component =
                self.find(dependency)
                    .ok_or_else(|| ResolutionFailure::MissingComponent {
                        dependency: dependency.to_string(),
                        channel: channel.name().to_string(),
                    })?;
            if !visited.insert(&component.id) {
                continue;
            }
            let variant = Self::select(component, channel.attributes())?.ok_or_else(|| {
                ResolutionFailure::NoMatchingVariant {
                    component: component.id.display_name(),
                    requested: channel.attributes().to_string(),
                    channel: channel.name().to_string(),
                }
            })?;
            trace!(component = %component.id, variant = %variant.name, "selected variant");
            nodes.push((component, variant));
            self.walk(request, &variant.dependencies, visited, nodes)?;
        }
        Ok(())
    }
}

impl ResolutionEngine for LocalRepository {
    fn resolve(&self, request: &ArtifactRequest) -> Result<Vec<ResolvedArtifact>, ResolutionFailure> {
        let mut visited = HashSet::new();
        let mut nodes = Vec::new();
        self.walk(
            request,
            request.channel().dependencies(),
            &mut visited,
            &mut nodes,
        )?;

        let mut artifacts = Vec::new();
        match request.view() {
            None => {
                for (component, variant) in &nodes {
                    artifacts.extend(
                        variant
                            .files
                            .iter()
                            .map(|f| ResolvedArtifact::new(component.id.clone(), f.clone())),
                    );
                }
            }
            Some(_) => {
                let wanted = request.selection_attributes();
                for (component, _) in &nodes {
                    if let Some(variant) = Self::select(component, &wanted)? {
                        artifacts.extend(
                            variant
                                .files
                                .iter()
                                .map(|f| ResolvedArtifact::new(component.id.clone(), f.clone())),
                        );
                    }
                }
            }
        }

        debug!(
            channel = request.channel().name(),
            components = nodes.len(),
            artifacts = artifacts.len(),
            "resolved artifacts"
        );
        Ok(artifacts)
    }
}
