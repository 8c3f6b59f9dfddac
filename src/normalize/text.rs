//! Unicode canonicalization shared by all field normalizers
//!
//! Output alphabet is `[A-Z0-9 ]` with single interior spaces and no
//! leading or trailing whitespace, which makes the function idempotent.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize free text: NFKD, drop combining marks, uppercase, map
/// everything outside `[A-Z0-9]` to a space, collapse and trim spaces.
pub fn normalize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    let folded = s
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase);

    for ch in folded {
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }

    out
}
