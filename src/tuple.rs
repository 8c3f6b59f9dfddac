//! Canonical tuple construction
//!
//! A tuple is a pipe-joined list of `FIELD=value` terms in the fixed order
//! NAME, DOB, PHONE, ADDR, ID. Absent fields are omitted, never emitted
//! empty. Each record yields a fixed set of tuple families; the union is
//! sorted bytewise and capped at [`MAX_TUPLES`].

use crate::normalize::{AddressVariants, ParsedName, PhoneVariants};
use std::collections::HashSet;

/// Maximum number of tuples retained per record
pub const MAX_TUPLES: usize = 256;

/// Tuple fields in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Dob,
    Phone,
    Addr,
    Id,
}

impl Field {
    pub const ORDER: [Field; 5] = [Field::Name, Field::Dob, Field::Phone, Field::Addr, Field::Id];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "NAME",
            Field::Dob => "DOB",
            Field::Phone => "PHONE",
            Field::Addr => "ADDR",
            Field::Id => "ID",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Accumulates field values and renders them in canonical order
#[derive(Debug, Clone, Default)]
pub struct TupleBuilder<'a> {
    values: [Option<&'a str>; 5],
}

impl<'a> TupleBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field; empty values leave the field absent
    pub fn with(mut self, field: Field, value: &'a str) -> Self {
        self.values[field.index()] = (!value.is_empty()).then_some(value);
        self
    }

    pub fn build(&self) -> String {
        Field::ORDER
            .iter()
            .filter_map(|field| {
                self.values[field.index()].map(|value| format!("{}={}", field.label(), value))
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Normalized inputs of one record, ready to be combined into tuples
#[derive(Debug, Clone)]
pub struct TupleGenerator<'a> {
    pub name: &'a ParsedName,
    pub dob: &'a str,
    pub phones: &'a [PhoneVariants],
    pub addresses: &'a [AddressVariants],
    /// Sorted identifier variants across all of the record's identifiers
    pub ids: &'a [String],
}

impl<'a> TupleGenerator<'a> {
    /// Build every tuple family, deduplicate, sort, and cap.
    ///
    /// Once the deduplicated set exceeds [`MAX_TUPLES`] only the bytewise
    /// smallest entries survive; dropped tuples are not reported.
    pub fn generate(&self) -> Vec<String> {
        let mut tuples = HashSet::new();
        let names = self.name.variants();
        let given_family = self.name.given_family();
        let base = TupleBuilder::new().with(Field::Dob, self.dob);

        // NAME+DOB
        for name in &names {
            tuples.insert(base.clone().with(Field::Name, name).build());
        }

        // PHONE+DOB
        for phone in self.phones {
            for value in [&phone.e164, &phone.last10].into_iter().flatten() {
                tuples.insert(base.clone().with(Field::Phone, value).build());
            }
        }

        // ADDR+DOB
        for addr in self.addresses {
            for value in [&addr.line1_postal, &addr.line1_city_state]
                .into_iter()
                .flatten()
            {
                tuples.insert(base.clone().with(Field::Addr, value).build());
            }
        }

        for name in &names {
            let named = base.clone().with(Field::Name, name);

            // NAME+DOB+PHONE
            for phone in self.phones {
                for value in [&phone.e164, &phone.national].into_iter().flatten() {
                    tuples.insert(named.clone().with(Field::Phone, value).build());
                }
            }

            // NAME+DOB+ADDR
            for addr in self.addresses {
                for value in [&addr.line1_postal, &addr.line1_city_state]
                    .into_iter()
                    .flatten()
                {
                    tuples.insert(named.clone().with(Field::Addr, value).build());
                }
            }
        }

        if !self.ids.is_empty() {
            for id in self.ids {
                let with_id = base.clone().with(Field::Id, id);

                // NAME+DOB+ID uses the given/family variant only
                if !given_family.is_empty() {
                    tuples.insert(with_id.clone().with(Field::Name, &given_family).build());
                }

                // DOB+ID
                tuples.insert(with_id.build());

                // PHONE+DOB+ID
                for phone in self.phones {
                    if let Some(last10) = &phone.last10 {
                        tuples.insert(with_id.clone().with(Field::Phone, last10).build());
                    }
                }
            }
        }

        let total = tuples.len();
        let mut sorted: Vec<String> = tuples.into_iter().collect();
        sorted.sort_unstable();
        if total > MAX_TUPLES {
            tracing::debug!(total, kept = MAX_TUPLES, "tuple set truncated");
            sorted.truncate(MAX_TUPLES);
        }
        sorted
    }
}
