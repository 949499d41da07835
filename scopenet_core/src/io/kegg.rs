//! Read text returned by the KEGG REST service
//!
//! Fetching is left to the caller, these functions only pick apart responses that have
//! already been retrieved (`/link/reaction/path:map01100` and `/get/<id>` flat file entries).
use log::debug;

use crate::network::identifiers::ReactionId;

/// Reaction ids listed in a `link` response
///
/// Each line has the form `path:map01100\trn:R00005`; lines not of that form are skipped.
pub fn parse_link_response(response: &str) -> Vec<ReactionId> {
    response
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let target = line.split('\t').nth(1)?;
            let (_, id) = target.trim().split_once(':')?;
            if id.is_empty() {
                None
            } else {
                Some(ReactionId::new(id))
            }
        })
        .collect()
}

/// Value of the first line of a flat file entry starting with `field`
///
/// # Examples
/// ```rust
/// use scopenet_core::io::kegg::entry_field;
/// let entry = "ENTRY       R00299\nEQUATION    C00002 + C00031 <=> C00008 + C00668\n///";
/// assert_eq!(entry_field(entry, "EQUATION"), Some("C00002 + C00031 <=> C00008 + C00668"));
/// ```
pub fn entry_field<'a>(entry: &'a str, field: &str) -> Option<&'a str> {
    entry.lines().find_map(|line| {
        let rest = line.strip_prefix(field)?;
        // The field name is followed by padding, guard against longer field names sharing a prefix
        match rest.chars().next() {
            None => Some(""),
            Some(c) if c.is_whitespace() => Some(rest.trim()),
            _ => None,
        }
    })
}

/// Equation of a reaction entry
pub fn entry_equation(entry: &str) -> Option<String> {
    let equation = entry_field(entry, "EQUATION").map(str::to_string);
    if equation.is_none() {
        debug!("Entry has no EQUATION field");
    }
    equation
}

/// Primary name of a compound entry, the text before the first `;`
pub fn entry_name(entry: &str) -> Option<String> {
    let names = entry_field(entry, "NAME")?;
    let name = names.split(';').next().unwrap_or_default().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::read_to_string;
    use std::path::PathBuf;

    fn test_data(name: &str) -> String {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("kegg")
            .join(name);
        read_to_string(path).unwrap()
    }

    #[test]
    fn link_response() {
        let response = "path:map00010\trn:R00200\npath:map00010\trn:R00299\n\nmalformed line\n";
        assert_eq!(
            parse_link_response(response),
            vec![ReactionId::new("R00200"), ReactionId::new("R00299")]
        );
    }

    #[test]
    fn reaction_entry() {
        let entry = test_data("R00299.txt");
        assert_eq!(
            entry_equation(&entry).unwrap(),
            "C00002 + C00031 <=> C00008 + C00668"
        );
        assert_eq!(entry_name(&entry).unwrap(), "ATP:D-glucose 6-phosphotransferase");
    }

    #[test]
    fn compound_entry() {
        let entry = test_data("C00031.txt");
        assert_eq!(entry_name(&entry).unwrap(), "D-Glucose");
        assert_eq!(entry_equation(&entry), None);
    }

    #[test]
    fn field_prefix_must_be_whole_word() {
        let entry = "NAMESPACE   other\nNAME        Pyruvate;\n";
        assert_eq!(entry_field(entry, "NAME"), Some("Pyruvate;"));
        assert_eq!(entry_name(entry).unwrap(), "Pyruvate");
        assert_eq!(entry_field("", "NAME"), None);
    }
}
