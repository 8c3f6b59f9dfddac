//! Phone number canonicalization
//!
//! Only digits survive. The E.164 form follows North American numbering
//! for 10/11-digit inputs and otherwise assumes the digits already carry an
//! international calling code.

use serde::Serialize;

/// Default country whose numbering rules are normative
pub const DEFAULT_COUNTRY: &str = "US";

/// Normalized renderings of a single phone number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhoneVariants {
    /// `+` followed by country code and subscriber number
    #[serde(rename = "PHONE_E164", skip_serializing_if = "Option::is_none")]
    pub e164: Option<String>,

    /// Ten-digit national number for `+1` numbers, otherwise the raw digits
    #[serde(rename = "PHONE_NATIONAL", skip_serializing_if = "Option::is_none")]
    pub national: Option<String>,

    /// Last ten raw digits, when at least ten are present
    #[serde(rename = "PHONE_LAST10", skip_serializing_if = "Option::is_none")]
    pub last10: Option<String>,
}

/// Whether phone rules are defined for `country`; only US numbering is
pub fn has_defined_rules(country: &str) -> bool {
    country.eq_ignore_ascii_case(DEFAULT_COUNTRY)
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// Normalize a free-text phone number.
///
/// Only the US rules are defined. Any other default country is accepted
/// and the US rules are applied unchanged; the CLI warns about it once.
pub fn normalize_phone(raw: &str, _default_country: &str) -> PhoneVariants {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let e164 = match digits.len() {
        11 if digits.starts_with('1') => format!("+{digits}"),
        10 => format!("+1{digits}"),
        n if n >= 10 => format!("+{digits}"),
        _ => String::new(),
    };

    let national = match e164.strip_prefix("+1") {
        Some(rest) if e164.len() == 12 => rest.to_string(),
        _ => digits.clone(),
    };

    let last10 = if digits.len() >= 10 {
        digits[digits.len() - 10..].to_string()
    } else {
        String::new()
    };

    PhoneVariants {
        e164: non_empty(e164),
        national: non_empty(national),
        last10: non_empty(last10),
    }
}
