//! Structural name parsing
//!
//! Names are canonicalized with [`normalize_text`], stripped of a leading
//! honorific and a trailing generational suffix, then split into
//! given / middles / family.

use super::text::normalize_text;
use std::collections::HashSet;

/// Leading titles dropped when the name has more than two tokens
const HONORIFICS: &[&str] = &["MR", "MRS", "MS", "MISS", "DR", "PROF", "REV", "SIR", "MADAM"];

/// Trailing suffix spellings and their canonical abbreviation
const SUFFIXES: &[(&str, &str)] = &[
    ("JR", "JR"),
    ("JUNIOR", "JR"),
    ("SR", "SR"),
    ("SENIOR", "SR"),
    ("I", "I"),
    ("II", "II"),
    ("III", "III"),
    ("IV", "IV"),
    ("V", "V"),
    ("VI", "VI"),
];

/// A name broken into its structural parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub given: String,
    pub middles: Vec<String>,
    pub family: String,
    /// Canonical suffix abbreviation, empty when absent
    pub suffix: String,
}

fn join_nonempty<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn initial(s: &str) -> &str {
    s.char_indices()
        .nth(1)
        .map_or(s, |(end, _)| &s[..end])
}

fn canonical_suffix(token: &str) -> Option<&'static str> {
    SUFFIXES
        .iter()
        .find(|(spelling, _)| *spelling == token)
        .map(|(_, canonical)| *canonical)
}

/// Parse a free-text name. Never fails; empty input yields an empty name.
pub fn parse_name(raw: &str) -> ParsedName {
    let normalized = normalize_text(raw);
    let mut tokens: Vec<&str> = normalized.split_whitespace().collect();

    if tokens.len() > 2 && HONORIFICS.iter().any(|h| *h == tokens[0]) {
        tokens.remove(0);
    }

    let mut suffix = String::new();
    if tokens.len() > 1 {
        if let Some(canonical) = tokens.last().and_then(|t| canonical_suffix(t)) {
            suffix = canonical.to_string();
            tokens.pop();
        }
    }

    match tokens.as_slice() {
        [] => ParsedName {
            suffix,
            ..ParsedName::default()
        },
        [only] => ParsedName {
            given: only.to_string(),
            middles: Vec::new(),
            family: only.to_string(),
            suffix,
        },
        [first, middle @ .., last] => ParsedName {
            given: first.to_string(),
            middles: middle.iter().map(|m| m.to_string()).collect(),
            family: last.to_string(),
            suffix,
        },
    }
}

impl ParsedName {
    /// Given, middles and family, space-joined
    pub fn full(&self) -> String {
        join_nonempty(
            std::iter::once(self.given.as_str())
                .chain(self.middles.iter().map(String::as_str))
                .chain(std::iter::once(self.family.as_str())),
        )
    }

    pub fn given_family(&self) -> String {
        join_nonempty([self.given.as_str(), self.family.as_str()])
    }

    /// Given, family and suffix; equal to [`Self::given_family`] without a suffix
    pub fn given_family_suffix(&self) -> String {
        if self.suffix.is_empty() {
            return self.given_family();
        }
        join_nonempty([self.given.as_str(), self.family.as_str(), self.suffix.as_str()])
    }

    /// Initials of given and middles, then family: `J R R TOLKIEN`
    pub fn initials_family(&self) -> String {
        join_nonempty(
            std::iter::once(initial(&self.given))
                .chain(self.middles.iter().map(|m| initial(m)))
                .chain(std::iter::once(self.family.as_str())),
        )
    }

    /// Initials run together, then family: `JRR TOLKIEN`.
    ///
    /// Empty unless the name has a given name and at least one middle.
    pub fn collapsed_initials(&self) -> String {
        if self.middles.is_empty() || self.given.is_empty() {
            return String::new();
        }
        let initials: String = std::iter::once(initial(&self.given))
            .chain(self.middles.iter().map(|m| initial(m)))
            .collect();
        join_nonempty([initials.as_str(), self.family.as_str()])
    }

    /// Name variants fed to the name-bearing tuple families.
    ///
    /// The ID-combined families use only [`Self::given_family`] instead.
    pub fn variants(&self) -> HashSet<String> {
        let mut out = HashSet::new();
        out.insert(self.full());
        out.insert(self.given_family());
        out.insert(self.initials_family());
        if !self.suffix.is_empty() {
            out.insert(self.given_family_suffix());
        }
        if !self.middles.is_empty() {
            out.insert(self.collapsed_initials());
        }
        out.retain(|v| !v.is_empty());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_honorific_dropped_with_three_tokens() {
        let name = parse_name("MR. JRR Tolkien");
        assert_eq!(name.given, "JRR");
        assert!(name.middles.is_empty());
        assert_eq!(name.family, "TOLKIEN");
        assert_eq!(name.full(), "JRR TOLKIEN");
    }

    #[test]
    fn test_honorific_kept_with_two_tokens() {
        let name = parse_name("Dr Who");
        assert_eq!(name.given, "DR");
        assert_eq!(name.family, "WHO");
    }

    #[test]
    fn test_full_structure_with_suffix() {
        let name = parse_name("Prof. John Ronald Reuel Tolkien Junior");
        assert_eq!(name.given, "JOHN");
        assert_eq!(name.middles, vec!["RONALD", "REUEL"]);
        assert_eq!(name.family, "TOLKIEN");
        assert_eq!(name.suffix, "JR");

        assert_eq!(name.full(), "JOHN RONALD REUEL TOLKIEN");
        assert_eq!(name.given_family(), "JOHN TOLKIEN");
        assert_eq!(name.given_family_suffix(), "JOHN TOLKIEN JR");
        assert_eq!(name.initials_family(), "J R R TOLKIEN");
        assert_eq!(name.collapsed_initials(), "JRR TOLKIEN");

        assert_eq!(
            name.variants(),
            set(&[
                "JOHN RONALD REUEL TOLKIEN",
                "JOHN TOLKIEN",
                "J R R TOLKIEN",
                "JOHN TOLKIEN JR",
                "JRR TOLKIEN",
            ])
        );
    }

    #[test]
    fn test_roman_numeral_suffix() {
        let name = parse_name("Henry Ford II");
        assert_eq!(name.suffix, "II");
        assert_eq!(name.family, "FORD");
        assert_eq!(name.given_family_suffix(), "HENRY FORD II");
    }

    #[test]
    fn test_single_token_suffix_not_extracted() {
        let name = parse_name("Jr");
        assert_eq!(name.given, "JR");
        assert_eq!(name.family, "JR");
        assert_eq!(name.suffix, "");
    }

    #[test]
    fn test_single_token_name() {
        let name = parse_name("Cher");
        assert_eq!(name.given, "CHER");
        assert_eq!(name.family, "CHER");
        assert!(name.middles.is_empty());
        assert_eq!(name.full(), "CHER CHER");
        assert_eq!(name.initials_family(), "C CHER");
        assert_eq!(name.collapsed_initials(), "");
    }

    #[test]
    fn test_two_tokens_no_collapsed_variant() {
        let name = parse_name("Ada Lovelace");
        assert_eq!(name.variants(), set(&["ADA LOVELACE", "A LOVELACE"]));
    }

    #[test]
    fn test_empty_and_garbage_names() {
        for raw in ["", "   ", "...", "漢字"] {
            let name = parse_name(raw);
            assert_eq!(name, ParsedName::default(), "{raw:?}");
            assert!(name.variants().is_empty());
        }
    }

    #[test]
    fn test_suffix_only_after_honorific() {
        // Honorific dropped (3 tokens), then suffix extracted from the remaining 2
        let name = parse_name("Mr Smith Sr");
        assert_eq!(name.given, "SMITH");
        assert_eq!(name.family, "SMITH");
        assert_eq!(name.suffix, "SR");
        assert_eq!(name.given_family_suffix(), "SMITH SMITH SR");
    }
}
