//! Identifier digit-suffix extraction
//!
//! Identifier formats differ between data holders (prefixes, separators,
//! check characters), so only trailing digit suffixes of each digit run
//! are compared.

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

/// Suffix lengths emitted for every qualifying digit run
const SUFFIX_LENGTHS: [usize; 3] = [4, 5, 6];

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4,}").expect("static digit-run pattern is valid"));

/// Trailing 4/5/6-digit suffixes of every maximal digit run of length >= 4
pub fn id_variants(raw: &str) -> HashSet<String> {
    let mut out = HashSet::new();
    for run in DIGIT_RUN.find_iter(raw) {
        let run = run.as_str();
        for len in SUFFIX_LENGTHS {
            if run.len() >= len {
                out.insert(run[run.len() - len..].to_string());
            }
        }
    }
    out
}

/// Variants across all of a record's identifiers, deduplicated and sorted
pub fn collect_id_variants<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    ids.iter()
        .flat_map(|id| id_variants(id.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
