//! Parse textual reaction equations (e.g. `2 C00001 + C00002 <=> C00003`) into stoichiometry
use derive_builder::Builder;
use log::debug;

use crate::configuration;
use crate::network::identifiers::MetaboliteId;
use crate::network::stoichiometry::Stoichiometry;

/// Decides which equation terms name a compound
///
/// A token is kept when it starts with one of the allowed prefixes. Terms such as `n H2O` or
/// `Protein` are not compounds and are dropped by the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundFilter {
    prefixes: Vec<String>,
}

impl CompoundFilter {
    pub fn new<S: Into<String>>(prefixes: impl IntoIterator<Item = S>) -> Self {
        CompoundFilter {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn matches(&self, token: &str) -> bool {
        self.prefixes.iter().any(|p| token.starts_with(p.as_str()))
    }
}

impl Default for CompoundFilter {
    fn default() -> Self {
        CompoundFilter::new(configuration::current().compound_prefixes)
    }
}

/// Result of parsing a single equation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedEquation {
    /// Net coefficients, reactants negative and products positive
    pub stoichiometry: Stoichiometry,
    /// Whether the equation used the reversible separator
    pub reversible: bool,
}

impl ParsedEquation {
    pub fn metabolites(&self) -> Vec<MetaboliteId> {
        self.stoichiometry.metabolites()
    }

    pub fn coefficients(&self) -> Vec<i32> {
        self.stoichiometry.coefficients()
    }

    pub fn is_empty(&self) -> bool {
        self.stoichiometry.is_empty()
    }
}

/// Parser for equations of the form `lhs <=> rhs` (reversible) or `lhs => rhs` (irreversible)
///
/// # Examples
/// ```rust
/// use scopenet_core::network::equation::EquationParserBuilder;
/// let parser = EquationParserBuilder::default().build().unwrap();
/// let parsed = parser.parse("2 C00001 => C00004");
/// assert_eq!(parsed.coefficients(), vec![-2, 1]);
/// assert!(!parsed.reversible);
/// ```
#[derive(Builder, Clone, Debug)]
pub struct EquationParser {
    /// Which tokens are kept as compounds
    #[builder(default = "CompoundFilter::default()")]
    filter: CompoundFilter,
    /// Separator of reversible equations
    #[builder(setter(into), default = "configuration::current().reversible_separator")]
    reversible_separator: String,
    /// Separator of irreversible equations
    #[builder(setter(into), default = "configuration::current().irreversible_separator")]
    irreversible_separator: String,
}

impl Default for EquationParser {
    fn default() -> Self {
        let config = configuration::current();
        EquationParser {
            filter: CompoundFilter::new(config.compound_prefixes),
            reversible_separator: config.reversible_separator,
            irreversible_separator: config.irreversible_separator,
        }
    }
}

impl EquationParser {
    pub fn filter(&self) -> &CompoundFilter {
        &self.filter
    }

    /// Whether the equation text marks a reversible reaction
    pub fn is_reversible(&self, equation: &str) -> bool {
        equation.contains(self.reversible_separator.as_str())
    }

    /// Parse an equation into net coefficients
    ///
    /// An equation without either separator gives an empty result rather than an error, as does
    /// one whose coefficients do not fit an `i32` once summed.
    pub fn parse(&self, equation: &str) -> ParsedEquation {
        // The reversible separator contains the irreversible one, so it has to be tried first
        let (sides, reversible) = match equation.split_once(self.reversible_separator.as_str()) {
            Some(sides) => (Some(sides), true),
            None => (
                equation.split_once(self.irreversible_separator.as_str()),
                false,
            ),
        };
        let Some((lhs, rhs)) = sides else {
            debug!("No separator found in equation {:?}", equation);
            return ParsedEquation::default();
        };

        let mut stoichiometry = Stoichiometry::new();
        let reactants = self
            .side_terms(lhs)
            .map(|(metabolite, coefficient)| (metabolite, coefficient.map(|c| -c)));
        for (metabolite, coefficient) in reactants.chain(self.side_terms(rhs)) {
            if coefficient
                .and_then(|c| stoichiometry.accumulate(metabolite, c))
                .is_none()
            {
                debug!("Coefficient out of range in equation {:?}", equation);
                return ParsedEquation {
                    stoichiometry: Stoichiometry::new(),
                    reversible,
                };
            }
        }
        stoichiometry.cancel();

        ParsedEquation {
            stoichiometry,
            reversible,
        }
    }

    /// Compound terms of one side of an equation, with their (unsigned) coefficients
    ///
    /// The coefficient is None when it is written out but too large for an `i32`.
    fn side_terms<'a>(
        &'a self,
        side: &'a str,
    ) -> impl Iterator<Item = (MetaboliteId, Option<i32>)> + 'a {
        split_terms(side).filter_map(|term| {
            let tokens: Vec<&str> = term.split_whitespace().collect();
            let (first, last) = (tokens.first()?, tokens.last()?);
            if !self.filter.matches(last) {
                return None;
            }
            Some((MetaboliteId::new(*last), leading_coefficient(first)))
        })
    }
}

/// Split one side of an equation on `+`, ignoring any `+` inside parentheses such as `(n+1)`
fn split_terms(side: &str) -> impl Iterator<Item = &str> {
    let mut terms = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in side.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '+' if depth == 0 => {
                terms.push(&side[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    terms.push(&side[start..]);
    terms.into_iter().map(str::trim).filter(|t| !t.is_empty())
}

/// Coefficient written before a compound, 1 when the first token is not a plain integer
///
/// None when the token is a plain integer that does not fit an `i32`.
fn leading_coefficient(token: &str) -> Option<i32> {
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        token.parse().ok()
    } else {
        Some(1)
    }
}
