//! Read metabolite class lists (currency, nutrient and core metabolites)
//!
//! A list holds one identifier per line. Only the first comma separated field of a line is
//! used, blank lines are ignored.
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::network::identifiers::MetaboliteId;
use crate::network::index::MetaboliteClasses;

/// Identifiers listed in `text`, in order
pub fn parse_id_list(text: &str) -> Vec<MetaboliteId> {
    text.lines()
        .filter_map(|line| {
            let id = line.split(',').next()?.trim();
            if id.is_empty() {
                None
            } else {
                Some(MetaboliteId::new(id))
            }
        })
        .collect()
}

pub fn read_id_list<P: AsRef<Path>>(path: P) -> Result<Vec<MetaboliteId>, ListError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| ListError::UnableToRead {
        path: path.display().to_string(),
        source: err,
    })?;
    Ok(parse_id_list(&text))
}

impl MetaboliteClasses {
    /// Read the three class lists from disk
    pub fn read_lists<P: AsRef<Path>>(
        currency: P,
        energy: P,
        core: P,
    ) -> Result<MetaboliteClasses, ListError> {
        Ok(MetaboliteClasses {
            currency: read_id_list(currency)?,
            energy: read_id_list(energy)?,
            core: read_id_list(core)?,
        })
    }
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("Unable to read metabolite list {path}")]
    UnableToRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
