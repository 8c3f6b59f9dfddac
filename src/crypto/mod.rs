/// Keyed token derivation and key material handling for EMTP
///
/// This module implements:
/// - HMAC-SHA256 tokens over domain-separated tuples (token)
/// - Decoding of caller-supplied hex/base64 key material (keys)
///
/// The pipeline core only ever sees raw key bytes; decoding lives in `keys`
/// so callers can swap in their own key distribution.
pub mod keys;
pub mod token;

pub use keys::{decode_key, load_keys, KeyError, KeySource};
pub use token::{generate_tokens, token_for, TokenKey, DOMAIN_PREFIX};
