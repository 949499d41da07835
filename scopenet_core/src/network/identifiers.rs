//! This module provides the identifier types for metabolites and reactions
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a metabolite as issued by the source database (e.g. `C00031`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaboliteId(String);

impl MetaboliteId {
    pub fn new(id: impl Into<String>) -> Self {
        MetaboliteId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MetaboliteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MetaboliteId {
    fn from(value: &str) -> Self {
        MetaboliteId::new(value)
    }
}

impl From<String> for MetaboliteId {
    fn from(value: String) -> Self {
        MetaboliteId(value)
    }
}

/// Identifier of a base (undirected) reaction (e.g. `R00200`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionId(String);

impl ReactionId {
    pub fn new(id: impl Into<String>) -> Self {
        ReactionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id of this reaction run in the given direction
    pub fn directed(&self, direction: Direction) -> DirectedReactionId {
        DirectedReactionId {
            base: self.clone(),
            direction,
        }
    }
}

impl Display for ReactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ReactionId {
    fn from(value: &str) -> Self {
        ReactionId::new(value)
    }
}

impl From<String> for ReactionId {
    fn from(value: String) -> Self {
        ReactionId(value)
    }
}

/// Direction a reaction column runs in
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Left hand side is consumed, right hand side is produced
    Forward,
    /// Right hand side is consumed, left hand side is produced
    Reverse,
}

impl Direction {
    /// Suffix appended to the base reaction id
    pub fn suffix(&self) -> &'static str {
        match self {
            Direction::Forward => "_f",
            Direction::Reverse => "_r",
        }
    }
}

/// A base reaction id together with a direction, displayed as `{base}_f` or `{base}_r`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectedReactionId {
    base: ReactionId,
    direction: Direction,
}

impl DirectedReactionId {
    pub fn new(base: ReactionId, direction: Direction) -> Self {
        DirectedReactionId { base, direction }
    }

    pub fn base(&self) -> &ReactionId {
        &self.base
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Display for DirectedReactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.base, self.direction.suffix())
    }
}

impl FromStr for DirectedReactionId {
    type Err = DirectedIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for direction in [Direction::Forward, Direction::Reverse] {
            if let Some(base) = s.strip_suffix(direction.suffix()) {
                if base.is_empty() {
                    break;
                }
                return Ok(DirectedReactionId::new(ReactionId::new(base), direction));
            }
        }
        Err(DirectedIdError::MissingDirection(s.to_string()))
    }
}

impl Serialize for DirectedReactionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DirectedReactionId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DirectedIdError {
    #[error("Directed reaction id {0} does not end in _f or _r")]
    MissingDirection(String),
}
