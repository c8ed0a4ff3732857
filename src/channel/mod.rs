//! Purpose-specific resolution channels.
//!
//! Every binary resolves its declared dependencies three times: once for the
//! compile-time interface, once for linking and once for running. Each pass
//! goes through its own channel, which inherits the binary's declared
//! dependencies and carries the attributes that steer variant selection.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::attribute::{AttributeSet, Usage, DEBUGGABLE, OPTIMIZED, USAGE};
use crate::binary::BinaryIdentity;
use crate::dependency::{Dependency, DependencySet};
use crate::error::BuildError;
use crate::names;
use crate::resolution::ArtifactRequest;

mod container;

pub use container::ChannelContainer;

// ─── Purposes ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelPurpose {
    SwiftCompile,
    NativeLink,
    NativeRuntime,
}

impl ChannelPurpose {
    pub const ALL: [ChannelPurpose; 3] = [
        ChannelPurpose::SwiftCompile,
        ChannelPurpose::NativeLink,
        ChannelPurpose::NativeRuntime,
    ];

    /// Channel name prefix; the capitalized binary name follows it.
    pub fn prefix(self) -> &'static str {
        match self {
            ChannelPurpose::SwiftCompile => "swiftCompile",
            ChannelPurpose::NativeLink => "nativeLink",
            ChannelPurpose::NativeRuntime => "nativeRuntime",
        }
    }

    pub fn usage(self) -> Usage {
        match self {
            ChannelPurpose::SwiftCompile => Usage::SwiftInterface,
            ChannelPurpose::NativeLink => Usage::NativeLink,
            ChannelPurpose::NativeRuntime => Usage::NativeRuntime,
        }
    }
}

impl fmt::Display for ChannelPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChannelPurpose::SwiftCompile => "compile",
            ChannelPurpose::NativeLink => "link",
            ChannelPurpose::NativeRuntime => "runtime",
        })
    }
}

impl FromStr for ChannelPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compile" => Ok(ChannelPurpose::SwiftCompile),
            "link" => Ok(ChannelPurpose::NativeLink),
            "runtime" => Ok(ChannelPurpose::NativeRuntime),
            other => Err(format!(
                "unknown purpose '{}' (expected compile, link or runtime)",
                other
            )),
        }
    }
}

// ─── Channels ──────────────────────────────────────────────────────

/// A named, attribute-tagged dependency set used only to pull artifacts.
///
/// Fully configured at construction; never published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionChannel {
    name: String,
    extends: Arc<DependencySet>,
    attributes: AttributeSet,
    consumable: bool,
}

impl ResolutionChannel {
    pub fn new(name: String, extends: Arc<DependencySet>, attributes: AttributeSet) -> Self {
        Self {
            name,
            extends,
            attributes,
            consumable: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extends(&self) -> &DependencySet {
        &self.extends
    }

    pub fn dependencies(&self) -> &[Dependency] {
        self.extends.dependencies()
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn is_consumable(&self) -> bool {
        self.consumable
    }

    /// Request for this channel's artifacts as selected by its own attributes.
    pub fn request(self: &Arc<Self>) -> ArtifactRequest {
        ArtifactRequest::new(self.clone(), None)
    }

    /// Request for a derived view that additionally requires `view` attributes
    /// on each selected artifact variant.
    pub fn artifact_view(self: &Arc<Self>, view: AttributeSet) -> ArtifactRequest {
        ArtifactRequest::new(self.clone(), Some(view))
    }
}

impl fmt::Display for ResolutionChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} extends {} {}",
            self.name,
            self.extends.name(),
            self.attributes
        )
    }
}

// ─── Builder ───────────────────────────────────────────────────────

/// The three channels of one binary.
#[derive(Clone, Debug)]
pub struct BinaryChannels {
    pub compile: Arc<ResolutionChannel>,
    pub link: Arc<ResolutionChannel>,
    pub runtime: Arc<ResolutionChannel>,
}

impl BinaryChannels {
    pub fn get(&self, purpose: ChannelPurpose) -> &Arc<ResolutionChannel> {
        match purpose {
            ChannelPurpose::SwiftCompile => &self.compile,
            ChannelPurpose::NativeLink => &self.link,
            ChannelPurpose::NativeRuntime => &self.runtime,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelPurpose, &Arc<ResolutionChannel>)> {
        ChannelPurpose::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

/// Attributes a binary's channel asks for.
pub fn channel_attributes(purpose: ChannelPurpose, identity: &BinaryIdentity) -> AttributeSet {
    AttributeSet::builder()
        .attribute(USAGE, purpose.usage())
        .attribute(DEBUGGABLE, identity.debuggable)
        .attribute(OPTIMIZED, identity.optimized)
        .build()
}

/// Derive and register the compile, link and runtime channels of a binary.
///
/// Nothing is resolved here; the channels only describe what to ask for.
pub fn build_channels(
    container: &ChannelContainer,
    identity: &BinaryIdentity,
    base: &Arc<DependencySet>,
) -> Result<BinaryChannels, BuildError> {
    let create = |purpose: ChannelPurpose| {
        let channel = ResolutionChannel::new(
            names::with_prefix(purpose.prefix(), &identity.name),
            base.clone(),
            channel_attributes(purpose, identity),
        );
        debug!(channel = %channel, "registering resolution channel");
        container.maybe_create(channel)
    };

    Ok(BinaryChannels {
        compile: create(ChannelPurpose::SwiftCompile)?,
        link: create(ChannelPurpose::NativeLink)?,
        runtime: create(ChannelPurpose::NativeRuntime)?,
    })
}
