//! The contract with the dependency resolution engine.
//!
//! The engine turns a channel (declared dependencies plus attributes) into
//! resolved artifacts. This crate only shapes requests and consumes the
//! results; `LocalRepository` is a small in-memory engine used by the CLI
//! and by tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::attribute::AttributeSet;
use crate::channel::ResolutionChannel;
use crate::component::ComponentIdentifier;
use crate::deferred::Deferred;

mod repository;

pub use repository::{Component, LocalRepository, Variant};

// ─── Data Types ────────────────────────────────────────────────────

/// One file produced by resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedArtifact {
    pub producer: ComponentIdentifier,
    pub file: PathBuf,
}

impl ResolvedArtifact {
    pub fn new(producer: ComponentIdentifier, file: impl Into<PathBuf>) -> Self {
        Self {
            producer,
            file: file.into(),
        }
    }
}

/// Failures reported by the resolution engine.
///
/// These describe missing or conflicting declarations; they are passed on
/// unchanged and never retried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionFailure {
    #[error("could not resolve '{dependency}' for channel '{channel}': no such component")]
    MissingComponent { dependency: String, channel: String },

    #[error("no variant of {component} matches {requested} (channel '{channel}')")]
    NoMatchingVariant {
        component: String,
        requested: String,
        channel: String,
    },

    #[error("{candidates} variants of {component} match {requested}; cannot choose between them")]
    AmbiguousVariants {
        component: String,
        requested: String,
        candidates: usize,
    },

    #[error("dependency cycle involving {component}")]
    DependencyCycle { component: String },
}

/// What to resolve: a channel, optionally narrowed by a view.
///
/// Graph nodes are selected with the channel's own attributes. A view adds
/// attributes that each node's artifact variant must also carry; nodes with
/// no such variant contribute nothing to the view.
#[derive(Clone, Debug)]
pub struct ArtifactRequest {
    channel: Arc<ResolutionChannel>,
    view: Option<AttributeSet>,
}

impl ArtifactRequest {
    pub fn new(channel: Arc<ResolutionChannel>, view: Option<AttributeSet>) -> Self {
        Self { channel, view }
    }

    pub fn channel(&self) -> &ResolutionChannel {
        &self.channel
    }

    pub fn view(&self) -> Option<&AttributeSet> {
        self.view.as_ref()
    }

    /// Attributes an artifact variant must satisfy to be returned.
    pub fn selection_attributes(&self) -> AttributeSet {
        match &self.view {
            Some(view) => self.channel.attributes().merged(view),
            None => self.channel.attributes().clone(),
        }
    }
}

/// The resolution engine. May perform I/O; must be idempotent.
pub trait ResolutionEngine: Send + Sync {
    fn resolve(&self, request: &ArtifactRequest) -> Result<Vec<ResolvedArtifact>, ResolutionFailure>;
}

// ─── Artifact Sets ─────────────────────────────────────────────────

/// The artifacts of one request, resolved on first access and then kept.
pub struct ArtifactSet {
    request: ArtifactRequest,
    resolved: Deferred<Result<Vec<ResolvedArtifact>, ResolutionFailure>>,
}

impl ArtifactSet {
    pub fn new(request: ArtifactRequest, engine: Arc<dyn ResolutionEngine>) -> Self {
        let pending = request.clone();
        Self {
            request,
            resolved: Deferred::new(move || engine.resolve(&pending)),
        }
    }

    pub fn channel(&self) -> &ResolutionChannel {
        self.request.channel()
    }

    pub fn request(&self) -> &ArtifactRequest {
        &self.request
    }

    pub fn artifacts(&self) -> Result<&[ResolvedArtifact], &ResolutionFailure> {
        self.resolved.get().as_ref().map(Vec::as_slice)
    }

    pub fn files(&self) -> Result<Vec<&Path>, &ResolutionFailure> {
        Ok(self.artifacts()?.iter().map(|a| a.file.as_path()).collect())
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_evaluated()
    }
}

impl std::fmt::Debug for ArtifactSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactSet")
            .field("channel", &self.request.channel().name())
            .field("resolved", &self.resolved)
            .finish()
    }
}

#[cfg(test)]
mod tests;
