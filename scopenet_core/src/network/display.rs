//! Human readable names of compounds and reactions, passed through to the analysis untouched
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::configuration;
use crate::network::identifiers::{DirectedReactionId, MetaboliteId, ReactionId};
use crate::network::matrix::StoichiometricMatrix;

/// Lookup tables from identifiers to display text
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayNames {
    /// Compound id to primary compound name
    pub compounds: IndexMap<MetaboliteId, String>,
    /// Base reaction id to equation text
    pub reactions: IndexMap<ReactionId, String>,
    /// Returned for ids without an entry
    #[serde(default = "unknown_label")]
    pub unknown_label: String,
}

fn unknown_label() -> String {
    configuration::current().unknown_label
}

impl Default for DisplayNames {
    fn default() -> Self {
        DisplayNames {
            compounds: IndexMap::new(),
            reactions: IndexMap::new(),
            unknown_label: unknown_label(),
        }
    }
}

impl DisplayNames {
    pub fn compound_name(&self, id: &MetaboliteId) -> &str {
        self.compounds
            .get(id)
            .map(String::as_str)
            .unwrap_or(self.unknown_label.as_str())
    }

    /// Equation of the base reaction, shared by both directions
    pub fn reaction_equation(&self, id: &DirectedReactionId) -> &str {
        self.reactions
            .get(id.base())
            .map(String::as_str)
            .unwrap_or(self.unknown_label.as_str())
    }

    /// Compound names for every matrix row, in row order
    pub fn compound_names_for(&self, matrix: &StoichiometricMatrix) -> IndexMap<MetaboliteId, String> {
        matrix
            .metabolites()
            .iter()
            .map(|m| (m.clone(), self.compound_name(m).to_string()))
            .collect()
    }

    /// Equation text for every matrix column, in column order
    pub fn reaction_equations_for(
        &self,
        matrix: &StoichiometricMatrix,
    ) -> IndexMap<DirectedReactionId, String> {
        matrix
            .reactions()
            .iter()
            .map(|r| (r.clone(), self.reaction_equation(r).to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::identifiers::Direction;
    use crate::network::reaction::DirectedReaction;
    use crate::network::stoichiometry::Stoichiometry;

    fn names() -> DisplayNames {
        let mut names = DisplayNames {
            unknown_label: "Unknown".to_string(),
            ..DisplayNames::default()
        };
        names
            .compounds
            .insert(MetaboliteId::new("C00031"), "D-Glucose".to_string());
        names.reactions.insert(
            ReactionId::new("R00299"),
            "C00002 + C00031 <=> C00008 + C00668".to_string(),
        );
        names
    }

    #[test]
    fn lookups_fall_back_to_unknown() {
        let names = names();
        assert_eq!(names.compound_name(&MetaboliteId::new("C00031")), "D-Glucose");
        assert_eq!(names.compound_name(&MetaboliteId::new("C00002")), "Unknown");
        let missing = ReactionId::new("R00001").directed(Direction::Forward);
        assert_eq!(names.reaction_equation(&missing), "Unknown");
    }

    #[test]
    fn both_directions_share_equation() {
        let names = names();
        let base = ReactionId::new("R00299");
        assert_eq!(
            names.reaction_equation(&base.directed(Direction::Forward)),
            names.reaction_equation(&base.directed(Direction::Reverse))
        );
    }

    #[test]
    fn tables_follow_matrix_order() {
        let base = ReactionId::new("R00299");
        let stoichiometry: Stoichiometry = [
            (MetaboliteId::new("C00031"), -1),
            (MetaboliteId::new("C00668"), 1),
        ]
        .into_iter()
        .collect();
        let records = vec![
            DirectedReaction {
                id: base.directed(Direction::Forward),
                stoichiometry: stoichiometry.clone(),
            },
            DirectedReaction {
                id: base.directed(Direction::Reverse),
                stoichiometry: stoichiometry.negated(),
            },
        ];
        let matrix = StoichiometricMatrix::assemble(&records).unwrap();
        let names = names();
        let compounds = names.compound_names_for(&matrix);
        assert_eq!(
            compounds.values().cloned().collect::<Vec<_>>(),
            vec!["D-Glucose".to_string(), "Unknown".to_string()]
        );
        let equations = names.reaction_equations_for(&matrix);
        assert_eq!(equations.len(), 2);
        assert!(equations
            .values()
            .all(|e| e == "C00002 + C00031 <=> C00008 + C00668"));
    }
}
