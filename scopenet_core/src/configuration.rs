//! Process wide defaults used when building parsers and display tables
use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

#[derive(Clone, Debug)]
pub struct Configuration {
    /// Identifier prefixes marking a term as a compound (KEGG uses C for compounds and G for glycans)
    pub compound_prefixes: Vec<String>,
    /// Separator marking a reversible equation
    pub reversible_separator: String,
    /// Separator marking an irreversible equation
    pub irreversible_separator: String,
    /// Label returned for compounds or reactions without a display name
    pub unknown_label: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            compound_prefixes: vec!["C".to_string(), "G".to_string()],
            reversible_separator: "<=>".to_string(),
            irreversible_separator: "=>".to_string(),
            unknown_label: "Unknown".to_string(),
        }
    }
}

/// Read the current configuration, recovering the value if a writer panicked
pub(crate) fn current() -> Configuration {
    match CONFIGURATION.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
