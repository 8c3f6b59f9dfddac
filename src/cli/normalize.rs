use emtp::normalize::AddressInput;
use emtp::{process_record, PipelineOptions, Record, TokenKey};

/// Build a record from command-line flags
pub fn record_from_flags(
    name: String,
    dob: String,
    phones: Vec<String>,
    addresses: Vec<String>,
    ids: Vec<String>,
) -> Record {
    Record {
        name,
        dob,
        phones,
        addresses: addresses.into_iter().map(AddressInput::FreeForm).collect(),
        ids,
    }
}

/// Normalize one record and print its JSON output
pub fn execute(
    record: Record,
    keys: Vec<TokenKey>,
    options: PipelineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = process_record(&record, &keys, &options)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
