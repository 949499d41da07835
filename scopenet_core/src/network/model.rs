//! This module provides the ScopeNetwork struct, tying the parsing and matrix construction steps together
use indexmap::IndexMap;
use log::{debug, info, warn};
use thiserror::Error;

use crate::network::derived::ScopeMatrices;
use crate::network::equation::EquationParser;
use crate::network::identifiers::{DirectedReactionId, Direction, MetaboliteId, ReactionId};
use crate::network::index::{ClassIndices, IdentifierIndex, IndexError, MetaboliteClasses};
use crate::network::matrix::{MatrixError, StoichiometricMatrix};
use crate::network::reaction::{split_directions, DirectedReaction, Reaction};

/// A reaction network ready for scope expansion
#[derive(Clone, Debug)]
pub struct ScopeNetwork {
    /// Metabolite by directed reaction matrix
    matrix: StoichiometricMatrix,
    /// Metabolite id to row index (and back)
    metabolite_index: IdentifierIndex<MetaboliteId>,
    /// Directed reaction id to column index (and back)
    reaction_index: IdentifierIndex<DirectedReactionId>,
    /// Base reactions whose equation gave no stoichiometry, and so have no column
    dropped_reactions: Vec<ReactionId>,
}

impl ScopeNetwork {
    /// Parse every reaction and assemble the network
    ///
    /// Reactions are processed in the order given, which fixes the column order. A reaction
    /// whose equation can't be parsed, or whose terms all cancel, contributes no column and is
    /// reported through [`ScopeNetwork::dropped_reactions`].
    ///
    /// # Examples
    /// ```rust
    /// use scopenet_core::network::equation::EquationParser;
    /// use scopenet_core::network::model::ScopeNetwork;
    /// use scopenet_core::network::reaction::Reaction;
    /// let reactions = vec![
    ///     Reaction::new("R00001", "C00001 + C00002 <=> C00003"),
    ///     Reaction::new("R00002", "2 C00001 => C00004"),
    /// ];
    /// let network = ScopeNetwork::build(&EquationParser::default(), &reactions).unwrap();
    /// assert_eq!(network.matrix().shape(), (4, 3));
    /// ```
    pub fn build<'a>(
        parser: &EquationParser,
        reactions: impl IntoIterator<Item = &'a Reaction>,
    ) -> Result<Self, NetworkError> {
        let mut records: Vec<DirectedReaction> = Vec::new();
        let mut dropped_reactions = Vec::new();
        for reaction in reactions {
            let parsed = parser.parse(&reaction.equation);
            let directed = split_directions(&reaction.id, &parsed);
            if directed.is_empty() {
                warn!(
                    "Reaction {} has no stoichiometry ({:?}) and is left out of the network",
                    reaction.id, reaction.equation
                );
                dropped_reactions.push(reaction.id.clone());
                continue;
            }
            debug!(
                "Reaction {} gave {} directed reaction(s) over {} metabolites",
                reaction.id,
                directed.len(),
                parsed.stoichiometry.len()
            );
            records.extend(directed);
        }

        let matrix = StoichiometricMatrix::assemble(&records)?;
        Self::from_matrix(matrix, dropped_reactions)
    }

    /// Index an already assembled matrix
    pub fn from_matrix(
        matrix: StoichiometricMatrix,
        dropped_reactions: Vec<ReactionId>,
    ) -> Result<Self, NetworkError> {
        let metabolite_index = IdentifierIndex::from_ordered(matrix.metabolites().iter().cloned())?;
        let reaction_index = IdentifierIndex::from_ordered(matrix.reactions().iter().cloned())?;
        let (n_metabolites, n_reactions) = matrix.shape();
        info!(
            "Stoichiometric matrix has {} metabolites and {} directed reactions ({} reactions dropped)",
            n_metabolites,
            n_reactions,
            dropped_reactions.len()
        );
        Ok(ScopeNetwork {
            matrix,
            metabolite_index,
            reaction_index,
            dropped_reactions,
        })
    }

    pub fn matrix(&self) -> &StoichiometricMatrix {
        &self.matrix
    }

    /// Row index of every metabolite, in matrix row order
    pub fn metabolite_index(&self) -> &IdentifierIndex<MetaboliteId> {
        &self.metabolite_index
    }

    /// Column index of every directed reaction, in matrix column order
    pub fn reaction_index(&self) -> &IdentifierIndex<DirectedReactionId> {
        &self.reaction_index
    }

    /// Base reactions left out of the matrix because their equation gave no stoichiometry
    pub fn dropped_reactions(&self) -> &[ReactionId] {
        &self.dropped_reactions
    }

    /// Base reactions that only run forward, with the index of their single column
    pub fn irreversible_reactions(&self) -> IndexMap<ReactionId, usize> {
        let mut directions: IndexMap<&ReactionId, Vec<(Direction, usize)>> = IndexMap::new();
        for (j, id) in self.matrix.reactions().iter().enumerate() {
            directions
                .entry(id.base())
                .or_default()
                .push((id.direction(), j));
        }
        directions
            .into_iter()
            .filter_map(|(base, columns)| match columns.as_slice() {
                [(Direction::Forward, j)] => Some((base.clone(), *j)),
                _ => None,
            })
            .collect()
    }

    /// Collect everything the scope expansion algorithm consumes
    pub fn scope_inputs(&self, classes: &MetaboliteClasses) -> ScopeInputs {
        ScopeInputs {
            metabolites: self.metabolite_index.clone(),
            reactions: self.reaction_index.clone(),
            matrix: self.matrix.clone(),
            scope: ScopeMatrices::from_matrix(&self.matrix),
            classes: classes.project(&self.metabolite_index),
            mets: self.metabolite_index.indices(),
            rxns: self.reaction_index.indices(),
        }
    }
}

/// Inputs of the scope expansion algorithm
#[derive(Clone, Debug, PartialEq)]
pub struct ScopeInputs {
    /// Metabolite bijection (met_map and inv_met_map)
    pub metabolites: IdentifierIndex<MetaboliteId>,
    /// Directed reaction bijection (rxn_map and inv_rxn_map)
    pub reactions: IdentifierIndex<DirectedReactionId>,
    /// The stoichiometric matrix the other fields were derived from
    pub matrix: StoichiometricMatrix,
    /// rho, pi, rxnMat, prodMat, sumRxnVec and sumProdVec
    pub scope: ScopeMatrices,
    /// Currency, energy and core metabolite indices
    pub classes: ClassIndices,
    /// Index of every metabolite
    pub mets: Vec<usize>,
    /// Index of every directed reaction
    pub rxns: Vec<usize>,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("Unable to assemble the stoichiometric matrix")]
    Matrix(#[from] MatrixError),
    #[error("Unable to index the stoichiometric matrix")]
    Index(#[from] IndexError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::equation::{CompoundFilter, EquationParserBuilder};

    fn parser() -> EquationParser {
        EquationParserBuilder::default()
            .filter(CompoundFilter::new(["C", "G"]))
            .reversible_separator("<=>")
            .irreversible_separator("=>")
            .build()
            .unwrap()
    }

    fn reactions() -> Vec<Reaction> {
        vec![
            Reaction::new("R00001", "C00001 + C00002 <=> C00003"),
            Reaction::new("R00002", "2 C00001 => C00004"),
            Reaction::new("R00003", "C00001 <=> C00001"),
            Reaction::new("R00004", "not an equation"),
        ]
    }

    fn network() -> ScopeNetwork {
        ScopeNetwork::build(&parser(), &reactions()).unwrap()
    }

    fn met(id: &str) -> MetaboliteId {
        MetaboliteId::new(id)
    }

    fn rxn(id: &str) -> DirectedReactionId {
        id.parse().unwrap()
    }

    #[test]
    fn end_to_end_columns() {
        let network = network();
        let columns: Vec<String> = network
            .matrix()
            .reactions()
            .iter()
            .map(|r| r.to_string())
            .collect();
        assert_eq!(columns, vec!["R00001_f", "R00001_r", "R00002_f"]);
        assert_eq!(network.matrix().get(&met("C00001"), &rxn("R00001_f")), Some(-1));
        assert_eq!(network.matrix().get(&met("C00003"), &rxn("R00001_r")), Some(-1));
        assert_eq!(network.matrix().get(&met("C00001"), &rxn("R00002_f")), Some(-2));
        assert_eq!(network.matrix().get(&met("C00004"), &rxn("R00002_f")), Some(1));
        assert!(network.reaction_index().index_of(&rxn("R00002_r")).is_none());
        assert!(network.reaction_index().index_of(&rxn("R00003_f")).is_none());
        assert!(network.reaction_index().index_of(&rxn("R00003_r")).is_none());
    }

    #[test]
    fn dropped_reactions_are_reported() {
        let network = network();
        assert_eq!(
            network.dropped_reactions(),
            &[ReactionId::new("R00003"), ReactionId::new("R00004")]
        );
    }

    #[test]
    fn indices_match_matrix_order() {
        let network = network();
        for (i, m) in network.matrix().metabolites().iter().enumerate() {
            assert_eq!(network.metabolite_index().index_of(m), Some(i));
        }
        for (j, r) in network.matrix().reactions().iter().enumerate() {
            assert_eq!(network.reaction_index().index_of(r), Some(j));
            assert_eq!(network.reaction_index().id_of(j), Some(r));
        }
        // Building again gives the same indices
        assert_eq!(network.metabolite_index(), self::network().metabolite_index());
        assert_eq!(network.reaction_index(), self::network().reaction_index());
    }

    #[test]
    fn from_matrix_keeps_the_matrix() {
        let built = network();
        let rebuilt = ScopeNetwork::from_matrix(built.matrix().clone(), Vec::new()).unwrap();
        assert_eq!(rebuilt.matrix(), built.matrix());
        assert_eq!(rebuilt.metabolite_index(), built.metabolite_index());
        assert_eq!(rebuilt.reaction_index(), built.reaction_index());
        assert!(rebuilt.dropped_reactions().is_empty());
    }

    #[test]
    fn irreversible_reactions() {
        let irreversible = network().irreversible_reactions();
        assert_eq!(irreversible.len(), 1);
        assert_eq!(irreversible.get(&ReactionId::new("R00002")), Some(&2));
    }

    #[test]
    fn scope_inputs() {
        let network = network();
        let classes = MetaboliteClasses {
            currency: vec![met("C00002"), met("C99999")],
            energy: vec![met("C00001")],
            core: vec![met("C00004"), met("C00003")],
        };
        let inputs = network.scope_inputs(&classes);
        assert_eq!(inputs.mets, vec![0, 1, 2, 3]);
        assert_eq!(inputs.rxns, vec![0, 1, 2]);
        assert_eq!(inputs.classes.currency, vec![1]);
        assert_eq!(inputs.classes.energy, vec![0]);
        assert_eq!(inputs.classes.core, vec![3, 2]);
        assert_eq!(inputs.scope.sum_rxn_vec.as_slice(), &[2, 1, 1]);
        assert_eq!(inputs.scope.sum_prod_vec.as_slice(), &[1, 2, 1]);
    }

    #[test]
    fn empty_network() {
        let network = ScopeNetwork::build(&parser(), &Vec::new()).unwrap();
        assert_eq!(network.matrix().shape(), (0, 0));
        assert!(network.metabolite_index().is_empty());
    }
}
