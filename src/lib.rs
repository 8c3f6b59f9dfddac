//! EMTP - Encrypted Match Token Protocol
//!
//! Canonicalizes identifying attributes (name, date of birth, phone,
//! address, identifier numbers) and derives keyed HMAC-SHA256 tokens from
//! them, so two parties can discover overlapping individuals by comparing
//! tokens instead of raw data.
//!
//! Key principles:
//! - Bit-exact determinism across implementations
//! - Pure per-record processing (no shared state, no I/O in the core)
//! - Versioned domain separation (`EMTP|v1|`)
//!
//! ```rust,ignore
//! use emtp::{process_record, PipelineOptions, Record, TokenKey};
//!
//! let record = Record { name: "MR. JRR Tolkien".into(), dob: "1892-01-03".into(), ..Default::default() };
//! let key = TokenKey::new((0u8..32).collect());
//! let out = process_record(&record, &[key], &PipelineOptions::default())?;
//! ```

pub mod crypto;
pub mod normalize;
pub mod record;
pub mod tuple;

pub use crypto::{generate_tokens, token_for, TokenKey, DOMAIN_PREFIX};
pub use record::{
    process_batch, process_record, union_tokens, NameSummary, PipelineOptions, Record,
    RecordError, RecordOutput,
};
pub use tuple::{Field, TupleBuilder, TupleGenerator, MAX_TUPLES};
