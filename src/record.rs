//! Record pipeline: raw record in, tuples and tokens out
//!
//! Field normalizers run independently, their variants are combined by
//! [`TupleGenerator`], and every supplied key is applied to every tuple.
//! Records share no state, so batches can be split across threads and the
//! resulting token sets merged with [`union_tokens`].

use crate::crypto::{generate_tokens, TokenKey};
use crate::normalize::{
    collect_id_variants, normalize_dob, normalize_phone, parse_name, AddressInput,
    AddressVariants, DobError, ParsedName, PhoneVariants,
};
use crate::normalize::phone::{has_defined_rules, DEFAULT_COUNTRY};
use crate::tuple::TupleGenerator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Record processing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid date of birth: {0}")]
    InvalidDob(#[from] DobError),
}

/// Identifying attributes of one person, as supplied by a data holder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub name: String,
    /// Missing decodes as empty and is rejected per record by validation
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub addresses: Vec<AddressInput>,
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Pipeline settings that do not affect the protocol tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Country assumed for phone numbers without a calling code
    pub default_country: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            default_country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// Normalized name breakdown reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSummary {
    pub given: String,
    pub middles: Vec<String>,
    pub family: String,
    pub suffix: String,
    pub full: String,
    pub given_family: String,
    pub initials_family: String,
}

impl From<&ParsedName> for NameSummary {
    fn from(name: &ParsedName) -> Self {
        Self {
            given: name.given.clone(),
            middles: name.middles.clone(),
            family: name.family.clone(),
            suffix: name.suffix.clone(),
            full: name.full(),
            given_family: name.given_family(),
            initials_family: name.initials_family(),
        }
    }
}

/// Everything derived from one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutput {
    pub name: NameSummary,
    pub dob: String,
    /// Sorted, capped tuple list
    pub tuples: Vec<String>,
    pub tuple_count: usize,
    /// Sorted token list; absent when no keys were supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<usize>,
}

/// Run one record through the pipeline.
///
/// Fails only on an invalid date of birth, in which case nothing is
/// produced for the record.
pub fn process_record(
    record: &Record,
    keys: &[TokenKey],
    options: &PipelineOptions,
) -> Result<RecordOutput, RecordError> {
    let dob = normalize_dob(&record.dob).inspect_err(|e| {
        tracing::warn!(error = %e, "record rejected");
    })?;

    if !record.phones.is_empty() && !has_defined_rules(&options.default_country) {
        tracing::debug!(country = %options.default_country, "applying US phone rules");
    }

    let name = parse_name(&record.name);
    let phones: Vec<PhoneVariants> = record
        .phones
        .iter()
        .map(|p| normalize_phone(p, &options.default_country))
        .collect();
    let addresses: Vec<AddressVariants> =
        record.addresses.iter().map(AddressInput::variants).collect();
    let ids = collect_id_variants(&record.ids);

    let tuples = TupleGenerator {
        name: &name,
        dob: &dob,
        phones: &phones,
        addresses: &addresses,
        ids: &ids,
    }
    .generate();

    let tokens = (!keys.is_empty()).then(|| {
        let mut tokens: Vec<String> = generate_tokens(keys, &tuples).into_iter().collect();
        tokens.sort_unstable();
        tokens
    });

    tracing::debug!(
        phones = phones.len(),
        addresses = addresses.len(),
        id_variants = ids.len(),
        tuples = tuples.len(),
        tokens = tokens.as_ref().map_or(0, Vec::len),
        "record processed"
    );

    Ok(RecordOutput {
        name: NameSummary::from(&name),
        dob,
        tuple_count: tuples.len(),
        tuples,
        token_count: tokens.as_ref().map(Vec::len),
        tokens,
    })
}

/// Process records independently; results keep input order
pub fn process_batch(
    records: &[Record],
    keys: &[TokenKey],
    options: &PipelineOptions,
) -> Vec<Result<RecordOutput, RecordError>> {
    records
        .iter()
        .map(|record| process_record(record, keys, options))
        .collect()
}

/// Union of the token sets of many records, sorted
pub fn union_tokens<'a>(outputs: impl IntoIterator<Item = &'a RecordOutput>) -> Vec<String> {
    outputs
        .into_iter()
        .filter_map(|out| out.tokens.as_ref())
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
