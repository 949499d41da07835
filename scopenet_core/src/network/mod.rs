//! Module providing the reaction network: equation parsing, the stoichiometric matrix and the
//! matrices derived from it for scope expansion.

pub mod derived;
pub mod display;
pub mod equation;
pub mod identifiers;
pub mod index;
pub mod matrix;
pub mod model;
pub mod reaction;
pub mod stoichiometry;
