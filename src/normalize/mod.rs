//! Field canonicalization for EMTP records
//!
//! Every normalizer here is a pure function of its input. Only date-of-birth
//! normalization can fail; the others degrade to empty output on garbage.
//!
//! - `text`: shared Unicode folding used by every other normalizer
//! - `dob`: strict `YYYY-MM-DD` validation
//! - `name`: honorific/suffix-aware name parsing and name variants
//! - `phone`: digit extraction and E.164 variants
//! - `address`: free-form/structured address parsing and variants
//! - `identifier`: trailing digit-suffix extraction from identifier strings

pub mod address;
pub mod dob;
pub mod identifier;
pub mod name;
pub mod phone;
pub mod text;

pub use address::{AddressInput, AddressVariants, StructuredAddress};
pub use dob::{normalize_dob, DobError};
pub use identifier::{collect_id_variants, id_variants};
pub use name::{parse_name, ParsedName};
pub use phone::{normalize_phone, PhoneVariants};
pub use text::normalize_text;
