//! Typed selection attributes.
//!
//! Channels and published variants both carry an `AttributeSet`. The
//! resolution engine picks, for every dependency, the variant whose
//! attributes satisfy what the channel asks for.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

// ─── Values ────────────────────────────────────────────────────────

/// Which flavour of a dependency a consumer wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Usage {
    /// Compile-time interface: Swift modules and headers.
    SwiftInterface,
    /// Libraries handed to the linker.
    NativeLink,
    /// Libraries needed when the binary runs.
    NativeRuntime,
}

impl Usage {
    pub fn as_str(self) -> &'static str {
        match self {
            Usage::SwiftInterface => "swift-interface",
            Usage::NativeLink => "native-link",
            Usage::NativeRuntime => "native-runtime",
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Usage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swift-interface" => Ok(Usage::SwiftInterface),
            "native-link" => Ok(Usage::NativeLink),
            "native-runtime" => Ok(Usage::NativeRuntime),
            other => Err(format!(
                "unknown usage '{}' (expected swift-interface, native-link or native-runtime)",
                other
            )),
        }
    }
}

/// A stored attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    Bool(bool),
    Usage(Usage),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Usage(u) => write!(f, "{}", u),
        }
    }
}

/// Rust types that can be stored as attribute values.
pub trait AttributeType: Copy {
    fn into_value(self) -> AttributeValue;
    fn from_value(value: &AttributeValue) -> Option<Self>;
}

impl AttributeType for bool {
    fn into_value(self) -> AttributeValue {
        AttributeValue::Bool(self)
    }

    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl AttributeType for Usage {
    fn into_value(self) -> AttributeValue {
        AttributeValue::Usage(self)
    }

    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Usage(u) => Some(*u),
            _ => None,
        }
    }
}

// ─── Keys ──────────────────────────────────────────────────────────

/// A named attribute key whose values have type `T`.
pub struct Attribute<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> Attribute<T> {
    pub const fn of(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Attribute<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Attribute<T> {}

impl<T> fmt::Debug for Attribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attribute({})", self.name)
    }
}

pub const USAGE: Attribute<Usage> = Attribute::of("usage");
pub const DEBUGGABLE: Attribute<bool> = Attribute::of("debuggable");
pub const OPTIMIZED: Attribute<bool> = Attribute::of("optimized");

// ─── Sets ──────────────────────────────────────────────────────────

/// An immutable set of attribute values, ordered by attribute name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: BTreeMap<&'static str, AttributeValue>,
}

impl AttributeSet {
    pub fn builder() -> AttributeSetBuilder {
        AttributeSetBuilder::default()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get<T: AttributeType>(&self, attribute: Attribute<T>) -> Option<T> {
        self.entries.get(attribute.name).and_then(T::from_value)
    }

    pub fn contains<T>(&self, attribute: Attribute<T>) -> bool {
        self.entries.contains_key(attribute.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// A new set with `other`'s entries layered over this one.
    pub fn merged(&self, other: &AttributeSet) -> AttributeSet {
        let mut entries = self.entries.clone();
        entries.extend(other.entries.iter().map(|(k, v)| (*k, *v)));
        AttributeSet { entries }
    }

    /// True when `candidate` declares every attribute requested here with
    /// an equal value. Extra attributes on the candidate are ignored.
    pub fn is_satisfied_by(&self, candidate: &AttributeSet) -> bool {
        self.entries
            .iter()
            .all(|(name, value)| candidate.entries.get(name) == Some(value))
    }

    /// Map a configuration key/value pair onto a known attribute.
    pub fn parse_entry(name: &str, raw: &toml::Value) -> Result<(&'static str, AttributeValue), BuildError> {
        let invalid = |reason: String| BuildError::InvalidAttribute {
            name: name.to_string(),
            reason,
        };
        let expect_bool = |key: &'static str| match raw {
            toml::Value::Boolean(b) => Ok((key, AttributeValue::Bool(*b))),
            other => Err(invalid(format!("expected a boolean, found {}", other.type_str()))),
        };
        match name {
            n if n == USAGE.name() => match raw {
                toml::Value::String(s) => s
                    .parse::<Usage>()
                    .map(|u| (USAGE.name(), AttributeValue::Usage(u)))
                    .map_err(invalid),
                other => Err(invalid(format!("expected a string, found {}", other.type_str()))),
            },
            n if n == DEBUGGABLE.name() => expect_bool(DEBUGGABLE.name()),
            n if n == OPTIMIZED.name() => expect_bool(OPTIMIZED.name()),
            n if n == crate::modulemap::REQUIRES_MODULE_MAP.name() => {
                expect_bool(crate::modulemap::REQUIRES_MODULE_MAP.name())
            }
            _ => Err(invalid("unknown attribute".to_string())),
        }
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        f.write_str("}")
    }
}

/// Collects attributes before freezing them into an `AttributeSet`.
#[derive(Debug, Default)]
pub struct AttributeSetBuilder {
    entries: BTreeMap<&'static str, AttributeValue>,
}

impl AttributeSetBuilder {
    pub fn attribute<T: AttributeType>(mut self, attribute: Attribute<T>, value: T) -> Self {
        self.entries.insert(attribute.name, value.into_value());
        self
    }

    pub(crate) fn raw(mut self, name: &'static str, value: AttributeValue) -> Self {
        self.entries.insert(name, value);
        self
    }

    pub fn build(self) -> AttributeSet {
        AttributeSet {
            entries: self.entries,
        }
    }
}
