//! Variant-aware dependency resolution channels and Swift interop module
//! maps for native (Swift plus C/C++) binaries.
//!
//! Each binary resolves its declared dependencies through three channels
//! (compile-time interface, link, runtime). Headers that C/C++ libraries
//! expose to Swift are grouped by producing component into module maps,
//! computed lazily from the compile channel.

pub mod attribute;
pub mod binary;
pub mod channel;
pub mod component;
pub mod config;
pub mod deferred;
pub mod dependency;
pub mod diagnostic;
pub mod error;
pub mod modulemap;
pub mod names;
pub mod project;
pub mod resolution;

#[cfg(test)]
pub(crate) mod test_support;

pub use binary::{BinaryDescriptor, BinaryIdentity, BuildLayout};
pub use channel::{build_channels, BinaryChannels, ChannelContainer, ChannelPurpose, ResolutionChannel};
pub use component::{classify, ComponentIdentifier};
pub use error::BuildError;
pub use modulemap::{aggregate, module_maps_of, ModuleMap, REQUIRES_MODULE_MAP};
pub use project::NativeProject;
pub use resolution::{ArtifactRequest, ResolutionEngine, ResolutionFailure, ResolvedArtifact};
