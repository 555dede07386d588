//! Hierarchical variable names.
//!
//! Every model variable is addressed by its owning sub-model followed by the
//! component chain and the variable itself, e.g.
//! `OnDemandSizingMission.HoverTakeoff.RotorsPerformance.T_A`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised while parsing a dotted variable path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("variable path is empty")]
    Empty,
    #[error("variable path `{0}` contains an empty segment")]
    EmptySegment(String),
    #[error("variable path `{0}` contains whitespace")]
    Whitespace(String),
}

/// A dot-separated variable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarPath {
    segments: Vec<String>,
}

impl VarPath {
    /// Parse a dotted path, rejecting empty segments and whitespace.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(PathError::Whitespace(s.to_string()));
        }
        let segments: Vec<String> = s.split('.').map(String::from).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment(s.to_string()));
        }
        Ok(Self { segments })
    }

    /// A single-segment path naming a sub-model.
    pub fn root(name: &str) -> Self {
        assert!(
            !name.is_empty() && !name.contains('.'),
            "model name `{name}` must be one non-empty segment"
        );
        Self {
            segments: vec![name.to_string()],
        }
    }

    /// Append a dotted relative name. Relative names are crate-internal
    /// literals, so malformed input is a programming error.
    pub fn join(&self, relative: &str) -> Self {
        let mut segments = self.segments.clone();
        for segment in relative.split('.') {
            assert!(!segment.is_empty(), "empty segment in `{relative}`");
            segments.push(segment.to_string());
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Name of the sub-model owning this variable.
    pub fn model(&self) -> &str {
        &self.segments[0]
    }

    /// Leaf variable name.
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// True when `self` lies at or beneath `prefix`.
    pub fn starts_with(&self, prefix: &VarPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for VarPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for VarPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for VarPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VarPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
