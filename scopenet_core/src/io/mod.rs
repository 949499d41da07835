//! Module for reading network inputs and writing scope expansion inputs
pub mod json;
pub mod kegg;
pub mod lists;
