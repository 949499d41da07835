//! This module provides the dense stoichiometric matrix relating metabolites to directed reactions
use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use nalgebra::DMatrix;
use nalgebra_sparse::CscMatrix;
use thiserror::Error;

use crate::network::identifiers::{DirectedReactionId, MetaboliteId};
use crate::network::reaction::DirectedReaction;
use crate::network::stoichiometry::Stoichiometry;

/// Metabolite by directed reaction matrix of net coefficients
///
/// Rows follow the metabolite order fixed at construction (sorted by id when built with
/// [`StoichiometricMatrix::assemble`]), columns follow the order the directed reactions were
/// supplied in.
#[derive(Clone, Debug, PartialEq)]
pub struct StoichiometricMatrix {
    metabolites: Vec<MetaboliteId>,
    reactions: Vec<DirectedReactionId>,
    values: DMatrix<i32>,
}

impl StoichiometricMatrix {
    /// Build the matrix from directed reactions, ordering rows by metabolite id
    ///
    /// # Examples
    /// ```rust
    /// use scopenet_core::network::equation::EquationParser;
    /// use scopenet_core::network::matrix::StoichiometricMatrix;
    /// use scopenet_core::network::reaction::Reaction;
    /// let parser = EquationParser::default();
    /// let directed = Reaction::new("R00001", "C00002 + C00001 <=> C00003").directed(&parser);
    /// let matrix = StoichiometricMatrix::assemble(&directed).unwrap();
    /// assert_eq!(matrix.shape(), (3, 2));
    /// assert_eq!(matrix.metabolites()[0].as_str(), "C00001");
    /// ```
    pub fn assemble(records: &[DirectedReaction]) -> Result<Self, MatrixError> {
        let metabolites: BTreeSet<&MetaboliteId> = records
            .iter()
            .flat_map(|r| r.stoichiometry.iter().map(|(m, _)| m))
            .collect();
        Self::assemble_with_rows(metabolites.into_iter().cloned().collect(), records)
    }

    /// Build the matrix against a fixed row order
    ///
    /// Every metabolite referenced by a record must be present in `metabolites`, anything else is
    /// reported as [`MatrixError::UnknownMetabolite`].
    pub fn assemble_with_rows(
        metabolites: Vec<MetaboliteId>,
        records: &[DirectedReaction],
    ) -> Result<Self, MatrixError> {
        let mut rows: IndexMap<&MetaboliteId, usize> = IndexMap::with_capacity(metabolites.len());
        for (i, met) in metabolites.iter().enumerate() {
            if rows.insert(met, i).is_some() {
                return Err(MatrixError::DuplicateMetabolite(met.clone()));
            }
        }
        let mut columns: IndexSet<&DirectedReactionId> = IndexSet::with_capacity(records.len());
        for record in records {
            if !columns.insert(&record.id) {
                return Err(MatrixError::DuplicateReaction(record.id.clone()));
            }
        }

        let mut values = DMatrix::<i32>::zeros(metabolites.len(), records.len());
        for (j, record) in records.iter().enumerate() {
            for (met, coefficient) in record.stoichiometry.iter() {
                let i = *rows
                    .get(met)
                    .ok_or_else(|| MatrixError::UnknownMetabolite {
                        metabolite: met.clone(),
                        reaction: record.id.clone(),
                    })?;
                values[(i, j)] = coefficient;
            }
        }

        Ok(StoichiometricMatrix {
            reactions: records.iter().map(|r| r.id.clone()).collect(),
            metabolites,
            values,
        })
    }

    /// Rebuild a matrix from its identifiers and values (e.g. after reading it back from disk)
    pub fn from_parts(
        metabolites: Vec<MetaboliteId>,
        reactions: Vec<DirectedReactionId>,
        values: DMatrix<i32>,
    ) -> Result<Self, MatrixError> {
        if values.shape() != (metabolites.len(), reactions.len()) {
            return Err(MatrixError::ShapeMismatch {
                expected: (metabolites.len(), reactions.len()),
                found: values.shape(),
            });
        }
        let mut seen_rows = IndexSet::with_capacity(metabolites.len());
        if let Some(met) = metabolites.iter().find(|m| !seen_rows.insert(*m)) {
            return Err(MatrixError::DuplicateMetabolite(met.clone()));
        }
        let mut seen_columns = IndexSet::with_capacity(reactions.len());
        if let Some(rxn) = reactions.iter().find(|r| !seen_columns.insert(*r)) {
            return Err(MatrixError::DuplicateReaction(rxn.clone()));
        }
        Ok(StoichiometricMatrix {
            metabolites,
            reactions,
            values,
        })
    }

    /// Row identifiers, in row order
    pub fn metabolites(&self) -> &[MetaboliteId] {
        &self.metabolites
    }

    /// Column identifiers, in column order
    pub fn reactions(&self) -> &[DirectedReactionId] {
        &self.reactions
    }

    pub fn values(&self) -> &DMatrix<i32> {
        &self.values
    }

    /// (number of metabolites, number of directed reactions)
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Coefficient of `metabolite` in `reaction`, None if either is not part of the matrix
    pub fn get(&self, metabolite: &MetaboliteId, reaction: &DirectedReactionId) -> Option<i32> {
        let i = self.metabolites.iter().position(|m| m == metabolite)?;
        let j = self.reactions.iter().position(|r| r == reaction)?;
        Some(self.values[(i, j)])
    }

    /// Recover the directed reaction held in column `j`
    pub fn column_reaction(&self, j: usize) -> Option<DirectedReaction> {
        let id = self.reactions.get(j)?.clone();
        let stoichiometry: Stoichiometry = self
            .values
            .column(j)
            .iter()
            .zip(&self.metabolites)
            .filter(|(c, _)| **c != 0)
            .map(|(c, m)| (m.clone(), *c))
            .collect();
        Some(DirectedReaction { id, stoichiometry })
    }

    /// Compressed sparse column copy of the matrix, holding only the non-zero entries
    pub fn to_csc(&self) -> CscMatrix<i32> {
        CscMatrix::from(&self.values)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum MatrixError {
    #[error("Reaction {reaction} references metabolite {metabolite} which has no row in the matrix")]
    UnknownMetabolite {
        metabolite: MetaboliteId,
        reaction: DirectedReactionId,
    },
    #[error("Directed reaction {0} was supplied more than once")]
    DuplicateReaction(DirectedReactionId),
    #[error("Metabolite {0} was supplied more than once as a row")]
    DuplicateMetabolite(MetaboliteId),
    #[error("Matrix values have shape {found:?} but the identifiers give {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}
