//! Core rust implementation of scopenet, a crate turning metabolic reaction equations into the
//! stoichiometric and incidence matrices used by scope expansion.

pub mod configuration;
pub mod io;
pub mod network;
