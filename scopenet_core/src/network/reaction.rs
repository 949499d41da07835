//! This module provides structs for base reactions and their directed forward/reverse forms
use serde::{Deserialize, Serialize};

use crate::network::equation::{EquationParser, ParsedEquation};
use crate::network::identifiers::{DirectedReactionId, Direction, ReactionId};
use crate::network::stoichiometry::Stoichiometry;

/// A reaction as published by the source database
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Used to identify the reaction (must be unique)
    pub id: ReactionId,
    /// Equation text, e.g. `C00031 + C00002 <=> C00092 + C00008`
    pub equation: String,
}

impl Reaction {
    pub fn new(id: impl Into<ReactionId>, equation: impl Into<String>) -> Self {
        Reaction {
            id: id.into(),
            equation: equation.into(),
        }
    }

    /// Parse the equation and split the result into directed reactions
    pub fn directed(&self, parser: &EquationParser) -> Vec<DirectedReaction> {
        split_directions(&self.id, &parser.parse(&self.equation))
    }
}

/// The reactions of a pathway, in the order they were retrieved
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSet {
    /// Pathway the reactions belong to (e.g. `map01100`)
    #[serde(default)]
    pub pathway: Option<String>,
    pub reactions: Vec<Reaction>,
}

/// One column of the stoichiometric matrix: a reaction run in a single direction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectedReaction {
    pub id: DirectedReactionId,
    pub stoichiometry: Stoichiometry,
}

/// Split a parsed equation into its forward and (if reversible) reverse reactions
///
/// # Note:
/// An empty parse yields no reactions at all, the base reaction then has no column in the
/// stoichiometric matrix.
pub fn split_directions(base: &ReactionId, parsed: &ParsedEquation) -> Vec<DirectedReaction> {
    if parsed.stoichiometry.is_empty() {
        return Vec::new();
    }
    let mut directed = vec![DirectedReaction {
        id: base.directed(Direction::Forward),
        stoichiometry: parsed.stoichiometry.clone(),
    }];
    if parsed.reversible {
        directed.push(DirectedReaction {
            id: base.directed(Direction::Reverse),
            stoichiometry: parsed.stoichiometry.negated(),
        });
    }
    directed
}
