//! Address parsing and canonicalization
//!
//! Addresses arrive either as one free-form line or as a structured
//! record. Both end up as a normalized [`StructuredAddress`] whose first
//! line uses canonical street-type abbreviations.

use super::text::normalize_text;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Whole-word long forms rewritten to their canonical short form in line 1
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("STREET", "ST"),
    ("AVENUE", "AVE"),
    ("ROAD", "RD"),
    ("BOULEVARD", "BLVD"),
    ("DRIVE", "DR"),
    ("LANE", "LN"),
    ("COURT", "CT"),
    ("PLACE", "PL"),
    ("APARTMENT", "APT"),
    ("SUITE", "STE"),
];

/// Tokens that start the unit portion of line 1
const UNIT_DESIGNATORS: &[&str] = &["APT", "UNIT", "STE"];

static TRAILING_POSTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s*([A-Z0-9]{2,})$").expect("static postal pattern is valid")
});

fn default_country() -> String {
    "US".to_string()
}

/// Address broken into postal components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAddress {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

impl Default for StructuredAddress {
    fn default() -> Self {
        Self {
            line1: String::new(),
            line2: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: default_country(),
        }
    }
}

/// An address as supplied by the caller
///
/// Deserializes from a JSON string (free-form) or object (structured).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressInput {
    FreeForm(String),
    Structured(StructuredAddress),
}

impl From<&str> for AddressInput {
    fn from(s: &str) -> Self {
        AddressInput::FreeForm(s.to_string())
    }
}

impl From<StructuredAddress> for AddressInput {
    fn from(addr: StructuredAddress) -> Self {
        AddressInput::Structured(addr)
    }
}

/// Rewrite long street-type words in an already-normalized line
fn abbreviate(line: &str) -> String {
    line.split(' ')
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(long, _)| *long == word)
                .map_or(word, |(_, short)| *short)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Heuristic split of a free-form address on commas.
///
/// Each comma-separated part is normalized on its own; empty parts are
/// dropped before positions are assigned.
fn parse_free_form(raw: &str) -> StructuredAddress {
    let parts: Vec<String> = raw
        .split(',')
        .map(normalize_text)
        .filter(|p| !p.is_empty())
        .collect();

    let mut addr = StructuredAddress::default();
    match parts.as_slice() {
        [] => {}
        [line1] => addr.line1 = line1.clone(),
        [line1, city] => {
            addr.line1 = line1.clone();
            addr.city = city.clone();
        }
        [line1, city, region, ..] => {
            addr.line1 = line1.clone();
            addr.city = city.clone();
            match TRAILING_POSTAL.captures(region) {
                Some(caps) => {
                    addr.state = caps[1].to_string();
                    addr.postal_code = caps[2].to_string();
                }
                None => addr.state = region.clone(),
            }
        }
    }
    addr
}

impl AddressInput {
    /// Resolve to a fully normalized structured address
    pub fn normalize(&self) -> StructuredAddress {
        let addr = match self {
            AddressInput::FreeForm(raw) => parse_free_form(raw),
            AddressInput::Structured(addr) => addr.clone(),
        };

        let country = normalize_text(&addr.country);
        StructuredAddress {
            line1: abbreviate(&normalize_text(&addr.line1)),
            line2: normalize_text(&addr.line2),
            city: normalize_text(&addr.city),
            state: normalize_text(&addr.state),
            postal_code: normalize_text(&addr.postal_code),
            country: if country.is_empty() {
                default_country()
            } else {
                country
            },
        }
    }

    pub fn variants(&self) -> AddressVariants {
        AddressVariants::from_normalized(&self.normalize())
    }
}

/// Normalized renderings of a single address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressVariants {
    #[serde(rename = "ADDR_LINE1_POSTAL", skip_serializing_if = "Option::is_none")]
    pub line1_postal: Option<String>,

    #[serde(rename = "ADDR_LINE1_CITY_STATE", skip_serializing_if = "Option::is_none")]
    pub line1_city_state: Option<String>,

    #[serde(
        rename = "ADDR_LINE1_CITY_STATE_POSTAL",
        skip_serializing_if = "Option::is_none"
    )]
    pub line1_city_state_postal: Option<String>,

    /// Line 1 with the unit designator and everything after it removed
    #[serde(rename = "ADDR_NO_UNIT", skip_serializing_if = "Option::is_none")]
    pub no_unit: Option<String>,
}

/// Pipe-join components, or `None` if any of them is empty
fn all_present(components: &[&str]) -> Option<String> {
    components
        .iter()
        .all(|c| !c.is_empty())
        .then(|| components.join("|"))
}

fn strip_unit(line1: &str) -> Option<String> {
    let words: Vec<&str> = line1.split_whitespace().collect();
    let cut = words
        .iter()
        .position(|w| UNIT_DESIGNATORS.iter().any(|unit| unit == w))?;
    let stripped = words[..cut].join(" ");
    (!stripped.is_empty() && stripped != line1).then_some(stripped)
}

impl AddressVariants {
    pub fn from_normalized(addr: &StructuredAddress) -> Self {
        let StructuredAddress {
            line1,
            city,
            state,
            postal_code,
            ..
        } = addr;

        Self {
            line1_postal: all_present(&[line1.as_str(), postal_code.as_str()]),
            line1_city_state: all_present(&[line1.as_str(), city.as_str(), state.as_str()]),
            line1_city_state_postal: all_present(&[
                line1.as_str(),
                city.as_str(),
                state.as_str(),
                postal_code.as_str(),
            ]),
            no_unit: strip_unit(line1),
        }
    }
}
