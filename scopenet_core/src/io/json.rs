//! Module providing JSON IO for reaction sets and scope expansion inputs
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use nalgebra::{DMatrix, Scalar};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::derived::ScopeMatrices;
use crate::network::display::DisplayNames;
use crate::network::identifiers::{DirectedReactionId, MetaboliteId};
use crate::network::index::{ClassIndices, IdentifierIndex, IndexError};
use crate::network::matrix::{MatrixError, StoichiometricMatrix};
use crate::network::model::ScopeInputs;
use crate::network::reaction::ReactionSet;

// region JSON Scope Inputs
/// Represents serialized scope expansion inputs, matrices are stored as lists of rows
#[derive(Serialize, Deserialize)]
struct JsonScopeInputs {
    metabolites: Vec<MetaboliteId>,
    reactions: Vec<DirectedReactionId>,
    met_map: IndexMap<MetaboliteId, usize>,
    inv_met_map: IndexMap<usize, MetaboliteId>,
    rxn_map: IndexMap<DirectedReactionId, usize>,
    inv_rxn_map: IndexMap<usize, DirectedReactionId>,
    stoich_matrix: Vec<Vec<i32>>,
    rho: Vec<Vec<i32>>,
    pi: Vec<Vec<i32>>,
    rxn_mat: Vec<Vec<u8>>,
    prod_mat: Vec<Vec<u8>>,
    sum_rxn_vec: Vec<usize>,
    sum_prod_vec: Vec<usize>,
    mets: Vec<usize>,
    rxns: Vec<usize>,
    currency: Vec<usize>,
    energy: Vec<usize>,
    core: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cpd_string_dict: Option<IndexMap<MetaboliteId, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_lookup: Option<IndexMap<DirectedReactionId, String>>,
}

fn to_rows<T: Scalar + Copy>(matrix: &DMatrix<T>) -> Vec<Vec<T>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

fn from_rows(rows: &[Vec<i32>], ncols: usize) -> Result<DMatrix<i32>, JsonError> {
    if let Some(row) = rows.iter().find(|row| row.len() != ncols) {
        return Err(JsonError::RaggedMatrix {
            expected: ncols,
            found: row.len(),
        });
    }
    Ok(DMatrix::from_row_iterator(
        rows.len(),
        ncols,
        rows.iter().flatten().copied(),
    ))
}
// endregion JSON Scope Inputs

// region Conversions
impl ScopeInputs {
    fn to_json(&self, names: Option<&DisplayNames>) -> JsonScopeInputs {
        JsonScopeInputs {
            metabolites: self.matrix.metabolites().to_vec(),
            reactions: self.matrix.reactions().to_vec(),
            met_map: self.metabolites.forward_map().clone(),
            inv_met_map: self.metabolites.inverse_map(),
            rxn_map: self.reactions.forward_map().clone(),
            inv_rxn_map: self.reactions.inverse_map(),
            stoich_matrix: to_rows(self.matrix.values()),
            rho: to_rows(&self.scope.rho),
            pi: to_rows(&self.scope.pi),
            rxn_mat: to_rows(&self.scope.rxn_mat),
            prod_mat: to_rows(&self.scope.prod_mat),
            sum_rxn_vec: self.scope.sum_rxn_vec.iter().copied().collect(),
            sum_prod_vec: self.scope.sum_prod_vec.iter().copied().collect(),
            mets: self.mets.clone(),
            rxns: self.rxns.clone(),
            currency: self.classes.currency.clone(),
            energy: self.classes.energy.clone(),
            core: self.classes.core.clone(),
            cpd_string_dict: names.map(|n| n.compound_names_for(&self.matrix)),
            display_lookup: names.map(|n| n.reaction_equations_for(&self.matrix)),
        }
    }

    /// Rebuild from the serialized form
    ///
    /// The stored maps are ignored in favour of the row and column order, and the derived
    /// matrices are recomputed from the stoichiometric matrix.
    fn from_json(json: JsonScopeInputs) -> Result<Self, JsonError> {
        let values = from_rows(&json.stoich_matrix, json.reactions.len())?;
        let matrix = StoichiometricMatrix::from_parts(json.metabolites, json.reactions, values)?;
        let metabolites = IdentifierIndex::from_ordered(matrix.metabolites().iter().cloned())?;
        let reactions = IdentifierIndex::from_ordered(matrix.reactions().iter().cloned())?;
        let classes = ClassIndices {
            currency: json.currency,
            energy: json.energy,
            core: json.core,
        };
        let out_of_range = classes
            .currency
            .iter()
            .chain(&classes.energy)
            .chain(&classes.core)
            .find(|i| **i >= metabolites.len());
        if let Some(index) = out_of_range {
            return Err(JsonError::IndexOutOfRange(*index));
        }
        Ok(ScopeInputs {
            mets: metabolites.indices(),
            rxns: reactions.indices(),
            scope: ScopeMatrices::from_matrix(&matrix),
            metabolites,
            reactions,
            matrix,
            classes,
        })
    }

    /// Serialize to a JSON string, optionally including display names for every row and column
    pub fn to_json_string(&self, names: Option<&DisplayNames>) -> Result<String, JsonError> {
        Ok(serde_json::to_string(&self.to_json(names))?)
    }

    pub fn write_json<P: AsRef<Path>>(
        &self,
        path: P,
        names: Option<&DisplayNames>,
    ) -> Result<(), JsonError> {
        let json_string = self.to_json_string(names)?;
        fs::write(path, json_string)?;
        Ok(())
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self, JsonError> {
        let json_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        let json = match serde_json::from_str::<JsonScopeInputs>(&json_str) {
            Ok(json) => json,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        ScopeInputs::from_json(json)
    }
}

impl ReactionSet {
    /// Read a reaction set of the form `{"pathway": "map00010", "reactions": [{"id": ..., "equation": ...}]}`
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<ReactionSet, JsonError> {
        let set_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        match serde_json::from_str::<ReactionSet>(&set_str) {
            Ok(set) => Ok(set),
            Err(err) => Err(JsonError::UnableToParse(format!("{:?}", err))),
        }
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let set_string = serde_json::to_string(self)?;
        fs::write(path, set_string)?;
        Ok(())
    }
}

impl DisplayNames {
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<DisplayNames, JsonError> {
        let names_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        match serde_json::from_str::<DisplayNames>(&names_str) {
            Ok(names) => Ok(names),
            Err(err) => Err(JsonError::UnableToParse(format!("{:?}", err))),
        }
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Matrix row has {found} entries, expected {expected}")]
    RaggedMatrix { expected: usize, found: usize },
    #[error("Metabolite index {0} is out of range")]
    IndexOutOfRange(usize),
    #[error("Stored matrix is inconsistent")]
    InconsistentMatrix(#[from] MatrixError),
    #[error("Stored identifiers are inconsistent")]
    InconsistentIndex(#[from] IndexError),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}

// endregion Conversions
