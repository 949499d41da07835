//! This module provides the Stoichiometry map, holding the net coefficients of a single reaction
use indexmap::IndexMap;

use crate::network::identifiers::MetaboliteId;

/// Net coefficients of the metabolites taking part in a reaction
///
/// Negative coefficients are consumed, positive coefficients are produced. The map never holds
/// a zero coefficient: an entry whose contributions cancel is removed. Entries are kept in the
/// order the metabolites were first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stoichiometry {
    coefficients: IndexMap<MetaboliteId, i32>,
}

impl Stoichiometry {
    pub fn new() -> Self {
        Stoichiometry {
            coefficients: IndexMap::new(),
        }
    }

    /// Add `coefficient` to the running total of `metabolite`
    ///
    /// Entries reaching zero are held until [`Stoichiometry::cancel`] so that a metabolite which
    /// reappears keeps its original position. Returns None, leaving the total unchanged, when the
    /// sum would overflow or reach `i32::MIN` (which has no negation).
    pub(crate) fn accumulate(&mut self, metabolite: MetaboliteId, coefficient: i32) -> Option<()> {
        let total = self.coefficients.entry(metabolite).or_insert(0);
        *total = total
            .checked_add(coefficient)
            .filter(|sum| *sum != i32::MIN)?;
        Some(())
    }

    /// Drop every entry whose net coefficient is zero
    pub(crate) fn cancel(&mut self) {
        self.coefficients.retain(|_, c| *c != 0);
    }

    /// Set the coefficient of a metabolite, overwriting any previous value
    ///
    /// Setting a coefficient of 0 removes the metabolite.
    pub fn insert(&mut self, metabolite: MetaboliteId, coefficient: i32) {
        if coefficient == 0 {
            self.coefficients.shift_remove(&metabolite);
        } else {
            self.coefficients.insert(metabolite, coefficient);
        }
    }

    pub fn get(&self, metabolite: &MetaboliteId) -> Option<i32> {
        self.coefficients.get(metabolite).copied()
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MetaboliteId, i32)> {
        self.coefficients.iter().map(|(m, c)| (m, *c))
    }

    /// Metabolites in first-appearance order
    pub fn metabolites(&self) -> Vec<MetaboliteId> {
        self.coefficients.keys().cloned().collect()
    }

    /// Coefficients, parallel to [`Stoichiometry::metabolites`]
    pub fn coefficients(&self) -> Vec<i32> {
        self.coefficients.values().copied().collect()
    }

    /// The same reaction run backwards
    ///
    /// A coefficient of `i32::MIN` set through [`Stoichiometry::insert`] saturates to `i32::MAX`.
    pub fn negated(&self) -> Stoichiometry {
        Stoichiometry {
            coefficients: self
                .coefficients
                .iter()
                .map(|(m, c)| (m.clone(), c.saturating_neg()))
                .collect(),
        }
    }
}

impl FromIterator<(MetaboliteId, i32)> for Stoichiometry {
    fn from_iter<T: IntoIterator<Item = (MetaboliteId, i32)>>(iter: T) -> Self {
        let mut stoichiometry = Stoichiometry::new();
        iter.into_iter()
            .for_each(|(m, c)| stoichiometry.insert(m, c));
        stoichiometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn met(id: &str) -> MetaboliteId {
        MetaboliteId::new(id)
    }

    #[test]
    fn accumulate_and_cancel() {
        let mut stoich = Stoichiometry::new();
        stoich.accumulate(met("C00001"), -1);
        stoich.accumulate(met("C00002"), -2);
        stoich.accumulate(met("C00001"), 1);
        stoich.accumulate(met("C00003"), 1);
        stoich.cancel();
        assert_eq!(stoich.metabolites(), vec![met("C00002"), met("C00003")]);
        assert_eq!(stoich.coefficients(), vec![-2, 1]);
        assert!(stoich.iter().all(|(_, c)| c != 0));
    }

    #[test]
    fn accumulate_rejects_overflow() {
        let mut stoich = Stoichiometry::new();
        assert_eq!(stoich.accumulate(met("C00001"), i32::MAX), Some(()));
        assert_eq!(stoich.accumulate(met("C00001"), 1), None);
        assert_eq!(stoich.get(&met("C00001")), Some(i32::MAX));

        assert_eq!(stoich.accumulate(met("C00002"), -i32::MAX), Some(()));
        assert_eq!(stoich.accumulate(met("C00002"), -1), None);
        assert_eq!(stoich.get(&met("C00002")), Some(-i32::MAX));
    }

    #[test]
    fn insert_zero_removes() {
        let mut stoich: Stoichiometry = [(met("C00001"), -1), (met("C00002"), 1)]
            .into_iter()
            .collect();
        stoich.insert(met("C00001"), 0);
        assert_eq!(stoich.get(&met("C00001")), None);
        assert_eq!(stoich.len(), 1);
    }

    #[test]
    fn insert_overwrites() {
        let mut stoich = Stoichiometry::new();
        stoich.insert(met("C00001"), -1);
        stoich.insert(met("C00001"), -3);
        assert_eq!(stoich.get(&met("C00001")), Some(-3));
    }

    #[test]
    fn negated_flips_every_sign() {
        let stoich: Stoichiometry = [(met("C00001"), -2), (met("C00004"), 1)]
            .into_iter()
            .collect();
        let reverse = stoich.negated();
        assert_eq!(reverse.metabolites(), stoich.metabolites());
        assert_eq!(reverse.coefficients(), vec![2, -1]);
    }

    #[test]
    fn negated_saturates_at_min() {
        let stoich: Stoichiometry = [(met("C00001"), i32::MIN)].into_iter().collect();
        assert_eq!(stoich.negated().coefficients(), vec![i32::MAX]);
    }
}
