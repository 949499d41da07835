//! Bijections between database identifiers and the dense indices used by scope expansion
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::identifiers::MetaboliteId;

/// Map from identifiers to dense indices `0..len` and back
///
/// Indices are assigned by enumerating the identifiers in the order given at construction, the
/// map is never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifierIndex<T: Hash + Eq> {
    to_index: IndexMap<T, usize>,
}

impl<T: Hash + Eq + Clone + Debug> IdentifierIndex<T> {
    /// Enumerate `ids` in order, the first id receives index 0
    pub fn from_ordered(ids: impl IntoIterator<Item = T>) -> Result<Self, IndexError> {
        let mut to_index = IndexMap::new();
        for id in ids {
            let next = to_index.len();
            if to_index.contains_key(&id) {
                return Err(IndexError::DuplicateIdentifier(format!("{:?}", id)));
            }
            to_index.insert(id, next);
        }
        Ok(IdentifierIndex { to_index })
    }

    pub fn index_of(&self, id: &T) -> Option<usize> {
        self.to_index.get(id).copied()
    }

    pub fn id_of(&self, index: usize) -> Option<&T> {
        self.to_index.get_index(index).map(|(id, _)| id)
    }

    pub fn contains(&self, id: &T) -> bool {
        self.to_index.contains_key(id)
    }

    /// Identifiers in index order
    pub fn ids(&self) -> impl Iterator<Item = &T> {
        self.to_index.keys()
    }

    /// Every index, i.e. `0..len`
    pub fn indices(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }

    pub fn len(&self) -> usize {
        self.to_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_index.is_empty()
    }

    /// Forward map, identifier to index
    pub fn forward_map(&self) -> &IndexMap<T, usize> {
        &self.to_index
    }

    /// Inverse map, index to identifier
    pub fn inverse_map(&self) -> IndexMap<usize, T> {
        self.to_index
            .iter()
            .map(|(id, i)| (*i, id.clone()))
            .collect()
    }

    /// Indices of the identifiers in `ids` that are known, in input order
    ///
    /// Unknown identifiers are skipped without error (tolerant projection).
    pub fn project_tolerant<'a>(&self, ids: impl IntoIterator<Item = &'a T>) -> Vec<usize>
    where
        T: 'a,
    {
        ids.into_iter()
            .filter_map(|id| {
                let index = self.index_of(id);
                if index.is_none() {
                    debug!("Skipping {:?}, not present in the index", id);
                }
                index
            })
            .collect()
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum IndexError {
    #[error("Identifier {0} appears more than once")]
    DuplicateIdentifier(String),
}

/// Externally curated metabolite lists used to seed scope expansion
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaboliteClasses {
    /// Currency metabolites (cofactors such as ATP, NAD+)
    pub currency: Vec<MetaboliteId>,
    /// Energy and nutrient metabolites
    pub energy: Vec<MetaboliteId>,
    /// Core metabolites
    pub core: Vec<MetaboliteId>,
}

impl MetaboliteClasses {
    /// Project every class onto `index`, skipping metabolites the index does not know
    pub fn project(&self, index: &IdentifierIndex<MetaboliteId>) -> ClassIndices {
        ClassIndices {
            currency: index.project_tolerant(&self.currency),
            energy: index.project_tolerant(&self.energy),
            core: index.project_tolerant(&self.core),
        }
    }
}

/// Internal indices of the metabolite classes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassIndices {
    pub currency: Vec<usize>,
    pub energy: Vec<usize>,
    pub core: Vec<usize>,
}
