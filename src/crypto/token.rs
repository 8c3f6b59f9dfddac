//! HMAC-SHA256 match tokens
//!
//! A token is the lowercase hex HMAC-SHA256 of `DOMAIN_PREFIX || tuple`
//! under a caller-supplied key.
//!
//! # Compatibility
//!
//! The prefix is part of the cross-party wire contract. Any change to
//! normalization or tuple families must ship under a new prefix so tokens
//! from different protocol revisions can never collide.

use ring::hmac;
use std::collections::HashSet;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Domain separation prefix for protocol revision 1
pub const DOMAIN_PREFIX: &[u8] = b"EMTP|v1|";

/// Raw key bytes, zeroized on drop.
///
/// Any length is accepted, including zero; minimum-length policy belongs to
/// the caller.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct TokenKey(Vec<u8>);

impl TokenKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn hmac_key(&self) -> hmac::Key {
        hmac::Key::new(hmac::HMAC_SHA256, &self.0)
    }
}

impl From<&[u8]> for TokenKey {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenKey(<{} bytes>)", self.0.len())
    }
}

fn sign(key: &hmac::Key, tuple: &str) -> String {
    let mut ctx = hmac::Context::with_key(key);
    ctx.update(DOMAIN_PREFIX);
    ctx.update(tuple.as_bytes());
    hex::encode(ctx.sign().as_ref())
}

/// Token for a single tuple under a single key
pub fn token_for(key: &TokenKey, tuple: &str) -> String {
    sign(&key.hmac_key(), tuple)
}

/// Tokens for every (key, tuple) pair, deduplicated.
///
/// The set carries no order; callers needing stable output sort it.
pub fn generate_tokens<S: AsRef<str>>(keys: &[TokenKey], tuples: &[S]) -> HashSet<String> {
    let mut tokens = HashSet::with_capacity(keys.len() * tuples.len());
    for key in keys {
        let hmac_key = key.hmac_key();
        for tuple in tuples {
            tokens.insert(sign(&hmac_key, tuple.as_ref()));
        }
    }
    tokens
}
