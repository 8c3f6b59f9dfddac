//! Key material decoding
//!
//! Keys reach the token generator as raw bytes. This module turns the
//! encodings operators actually handle (hex, base64, key files, environment
//! variables) into [`TokenKey`]s. Key generation and rotation are out of
//! scope.
//!
//! Key files and environment variables use prefixed entries:
//!
//! ```text
//! # partner A, 2026 key
//! hex:000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f
//! b64:AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=
//! ```
//!
//! Environment variables hold the same entries separated by commas.

use super::token::TokenKey;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use zeroize::Zeroize;

/// Key decoding errors
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Invalid hex key: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid base64 key: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Key entry must start with 'hex:' or 'b64:' (got {0:?})")]
    UnknownEncoding(String),

    #[error("Failed to read key file '{path}': {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment variable {0} is not set")]
    MissingEnvVar(String),
}

/// Where a key comes from, checked in the order given by the caller
#[derive(Debug, Clone)]
pub enum KeySource {
    /// Inline hex (`--key-hex`)
    Hex(String),
    /// Inline standard base64 (`--key-b64`)
    Base64(String),
    /// File with one prefixed entry per line
    File(PathBuf),
    /// Environment variable with comma-separated prefixed entries
    EnvVar(String),
}

/// Decode a single `hex:` / `b64:` prefixed entry
pub fn decode_key(entry: &str) -> Result<TokenKey, KeyError> {
    let entry = entry.trim();
    if let Some(hex_str) = entry.strip_prefix("hex:") {
        decode_hex(hex_str)
    } else if let Some(b64) = entry.strip_prefix("b64:") {
        decode_base64(b64)
    } else {
        // Only show the first few characters; the rest may be secret
        let shown: String = entry.chars().take(4).collect();
        Err(KeyError::UnknownEncoding(shown))
    }
}

fn decode_hex(s: &str) -> Result<TokenKey, KeyError> {
    Ok(TokenKey::new(hex::decode(s.trim())?))
}

fn decode_base64(s: &str) -> Result<TokenKey, KeyError> {
    Ok(TokenKey::new(STANDARD.decode(s.trim())?))
}

fn decode_entries<'a>(entries: impl Iterator<Item = &'a str>) -> Result<Vec<TokenKey>, KeyError> {
    entries
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(decode_key)
        .collect()
}

impl KeySource {
    fn kind(&self) -> &'static str {
        match self {
            KeySource::Hex(_) => "hex",
            KeySource::Base64(_) => "base64",
            KeySource::File(_) => "file",
            KeySource::EnvVar(_) => "env",
        }
    }

    /// Resolve this source into one or more keys
    pub fn load(&self) -> Result<Vec<TokenKey>, KeyError> {
        match self {
            KeySource::Hex(s) => Ok(vec![decode_hex(s)?]),
            KeySource::Base64(s) => Ok(vec![decode_base64(s)?]),
            KeySource::File(path) => {
                let mut contents = fs::read_to_string(path).map_err(|source| KeyError::File {
                    path: path.clone(),
                    source,
                })?;
                let keys = decode_entries(contents.lines());
                contents.zeroize();
                keys
            }
            KeySource::EnvVar(name) => {
                let mut value = std::env::var(name)
                    .map_err(|_| KeyError::MissingEnvVar(name.clone()))?;
                let keys = decode_entries(value.split(','));
                value.zeroize();
                keys
            }
        }
    }
}

/// Resolve every source, preserving order
pub fn load_keys(sources: &[KeySource]) -> Result<Vec<TokenKey>, KeyError> {
    let mut keys = Vec::new();
    for source in sources {
        let loaded = source.load()?;
        tracing::debug!(source = source.kind(), count = loaded.len(), "loaded keys");
        keys.extend(loaded);
    }
    Ok(keys)
}
