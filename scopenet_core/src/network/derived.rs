//! Reactant and product matrices derived from the stoichiometric matrix
use nalgebra::{DMatrix, DVector};

use crate::network::matrix::StoichiometricMatrix;

/// Negative entries of `s`, everything else set to 0
pub fn reactant_matrix(s: &DMatrix<i32>) -> DMatrix<i32> {
    s.map(|v| v.min(0))
}

/// Positive entries of `s`, everything else set to 0
pub fn product_matrix(s: &DMatrix<i32>) -> DMatrix<i32> {
    s.map(|v| v.max(0))
}

/// 1 where `m` is non-zero, 0 elsewhere
pub fn incidence(m: &DMatrix<i32>) -> DMatrix<u8> {
    m.map(|v| u8::from(v != 0))
}

/// Number of non-zero entries in each column of `m`
pub fn column_degrees(m: &DMatrix<u8>) -> DVector<usize> {
    DVector::from_iterator(
        m.ncols(),
        m.column_iter()
            .map(|column| column.iter().filter(|v| **v != 0).count()),
    )
}

/// Inputs of the scope expansion algorithm
#[derive(Clone, Debug, PartialEq)]
pub struct ScopeMatrices {
    /// Reactant matrix (rho)
    pub rho: DMatrix<i32>,
    /// Product matrix (pi)
    pub pi: DMatrix<i32>,
    /// Binary reactant matrix
    pub rxn_mat: DMatrix<u8>,
    /// Binary product matrix
    pub prod_mat: DMatrix<u8>,
    /// Number of reactants of each directed reaction
    pub sum_rxn_vec: DVector<usize>,
    /// Number of products of each directed reaction
    pub sum_prod_vec: DVector<usize>,
}

impl ScopeMatrices {
    pub fn from_matrix(matrix: &StoichiometricMatrix) -> Self {
        let rho = reactant_matrix(matrix.values());
        let pi = product_matrix(matrix.values());
        let rxn_mat = incidence(&rho);
        let prod_mat = incidence(&pi);
        let sum_rxn_vec = column_degrees(&rxn_mat);
        let sum_prod_vec = column_degrees(&prod_mat);
        ScopeMatrices {
            rho,
            pi,
            rxn_mat,
            prod_mat,
            sum_rxn_vec,
            sum_prod_vec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::equation::{CompoundFilter, EquationParserBuilder};
    use crate::network::reaction::{DirectedReaction, Reaction};

    fn stoich_matrix() -> StoichiometricMatrix {
        let parser = EquationParserBuilder::default()
            .filter(CompoundFilter::new(["C", "G"]))
            .reversible_separator("<=>")
            .irreversible_separator("=>")
            .build()
            .unwrap();
        let records: Vec<DirectedReaction> = [
            Reaction::new("R00001", "C00001 + C00002 <=> C00003"),
            Reaction::new("R00002", "2 C00001 => C00004"),
            Reaction::new("R00003", "C00003 + 2 C00005 <=> C00002 + C00004 + C00001"),
        ]
        .iter()
        .flat_map(|r| r.directed(&parser))
        .collect();
        StoichiometricMatrix::assemble(&records).unwrap()
    }

    #[test]
    fn clamping() {
        let s = DMatrix::from_row_slice(2, 2, &[-2, 1, 0, 3]);
        assert_eq!(reactant_matrix(&s), DMatrix::from_row_slice(2, 2, &[-2, 0, 0, 0]));
        assert_eq!(product_matrix(&s), DMatrix::from_row_slice(2, 2, &[0, 1, 0, 3]));
        assert_eq!(
            incidence(&reactant_matrix(&s)),
            DMatrix::from_row_slice(2, 2, &[1u8, 0, 0, 0])
        );
    }

    #[test]
    fn decomposition_law() {
        let matrix = stoich_matrix();
        let scope = ScopeMatrices::from_matrix(&matrix);
        assert_eq!(&(&scope.rho + &scope.pi), matrix.values());
        assert!(scope
            .rxn_mat
            .iter()
            .zip(scope.prod_mat.iter())
            .all(|(r, p)| r * p == 0));
        // Inputs are left untouched
        assert_eq!(matrix, stoich_matrix());
    }

    #[test]
    fn degree_consistency() {
        let matrix = stoich_matrix();
        let scope = ScopeMatrices::from_matrix(&matrix);
        assert_eq!(scope.sum_rxn_vec.len(), matrix.shape().1);
        for (j, column) in matrix.values().column_iter().enumerate() {
            let negative = column.iter().filter(|v| **v < 0).count();
            let positive = column.iter().filter(|v| **v > 0).count();
            let present = column.iter().filter(|v| **v != 0).count();
            assert_eq!(scope.sum_rxn_vec[j], negative);
            assert_eq!(scope.sum_prod_vec[j], positive);
            assert_eq!(scope.sum_rxn_vec[j] + scope.sum_prod_vec[j], present);
        }
        // R00003_f consumes C00003 and C00005, produces C00001, C00002 and C00004
        assert_eq!(scope.sum_rxn_vec.as_slice(), &[2, 1, 1, 2, 3]);
        assert_eq!(scope.sum_prod_vec.as_slice(), &[1, 2, 1, 3, 2]);
    }
}
