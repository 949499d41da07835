use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use nalgebra::DMatrix;
use scopenet_core::network::derived::ScopeMatrices;
use scopenet_core::network::equation::EquationParser;
use scopenet_core::network::identifiers::MetaboliteId;
use scopenet_core::network::model::ScopeNetwork;
use scopenet_core::network::reaction::Reaction;

fn rows<T: nalgebra::Scalar + Copy>(matrix: &DMatrix<T>) -> Vec<Vec<T>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

#[pyclass]
struct PyScopeNetwork {
    inner: ScopeNetwork,
    scope: ScopeMatrices,
}

#[pymethods]
impl PyScopeNetwork {
    /// Build the network from (reaction id, equation) pairs, in column order
    #[new]
    fn new(reactions: Vec<(String, String)>) -> PyResult<Self> {
        let reactions: Vec<Reaction> = reactions
            .into_iter()
            .map(|(id, equation)| Reaction::new(id, equation))
            .collect();
        let inner = ScopeNetwork::build(&EquationParser::default(), &reactions)
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        let scope = ScopeMatrices::from_matrix(inner.matrix());
        Ok(PyScopeNetwork { inner, scope })
    }

    #[getter]
    fn metabolites(&self) -> Vec<String> {
        self.inner
            .matrix()
            .metabolites()
            .iter()
            .map(|m| m.to_string())
            .collect()
    }

    #[getter]
    fn reactions(&self) -> Vec<String> {
        self.inner
            .matrix()
            .reactions()
            .iter()
            .map(|r| r.to_string())
            .collect()
    }

    #[getter]
    fn dropped_reactions(&self) -> Vec<String> {
        self.inner
            .dropped_reactions()
            .iter()
            .map(|r| r.to_string())
            .collect()
    }

    #[getter]
    fn stoich_matrix(&self) -> Vec<Vec<i32>> {
        rows(self.inner.matrix().values())
    }

    #[getter]
    fn rho(&self) -> Vec<Vec<i32>> {
        rows(&self.scope.rho)
    }

    #[getter]
    fn pi(&self) -> Vec<Vec<i32>> {
        rows(&self.scope.pi)
    }

    #[getter]
    fn rxn_mat(&self) -> Vec<Vec<u8>> {
        rows(&self.scope.rxn_mat)
    }

    #[getter]
    fn prod_mat(&self) -> Vec<Vec<u8>> {
        rows(&self.scope.prod_mat)
    }

    #[getter]
    fn sum_rxn_vec(&self) -> Vec<usize> {
        self.scope.sum_rxn_vec.iter().copied().collect()
    }

    #[getter]
    fn sum_prod_vec(&self) -> Vec<usize> {
        self.scope.sum_prod_vec.iter().copied().collect()
    }

    /// Indices of the given metabolite ids, unknown ids are skipped
    fn project(&self, ids: Vec<String>) -> Vec<usize> {
        let ids: Vec<MetaboliteId> = ids.into_iter().map(MetaboliteId::from).collect();
        self.inner.metabolite_index().project_tolerant(&ids)
    }
}

/// Parse an equation into parallel lists of metabolite ids and net coefficients
#[pyfunction]
fn parse_equation(equation: &str) -> (Vec<String>, Vec<i32>) {
    let parsed = EquationParser::default().parse(equation);
    (
        parsed.metabolites().iter().map(|m| m.to_string()).collect(),
        parsed.coefficients(),
    )
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_equation, m)?)?;
    m.add_class::<PyScopeNetwork>()?;
    Ok(())
}
