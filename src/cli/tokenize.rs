//! Batch tokenization of JSON records
//!
//! Records are independent, so the batch is split into chunks that run on
//! tokio's blocking pool. Results are reassembled in input order and a bad
//! record never aborts the batch.

use emtp::{process_record, PipelineOptions, Record, RecordOutput, TokenKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// One input entry; a malformed entry carries its decode error
pub type InputRecord = Result<Record, String>;

/// Per-record result as written to the output
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RecordResult {
    Ok(RecordOutput),
    Error(String),
}

/// Parse an array of records or a single record.
///
/// Only malformed JSON fails the whole input. Each entry is decoded on its
/// own, so one bad entry becomes an error for that position alone.
pub fn parse_records(json: &str) -> Result<Vec<InputRecord>, serde_json::Error> {
    let entries = match serde_json::from_str(json)? {
        Value::Array(items) => items,
        single => vec![single],
    };
    Ok(entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value(entry).map_err(|e| format!("Invalid record: {}", e))
        })
        .collect())
}

async fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        Ok(buf)
    } else {
        tokio::fs::read_to_string(input).await
    }
}

fn tokenize_entry(
    entry: &InputRecord,
    keys: &[TokenKey],
    options: &PipelineOptions,
) -> RecordResult {
    match entry {
        Ok(record) => match process_record(record, keys, options) {
            Ok(output) => RecordResult::Ok(output),
            Err(e) => RecordResult::Error(e.to_string()),
        },
        Err(e) => RecordResult::Error(e.clone()),
    }
}

/// Process records across the blocking pool, keeping input order
pub async fn tokenize_records(
    records: Vec<InputRecord>,
    keys: Vec<TokenKey>,
    options: PipelineOptions,
) -> Result<Vec<RecordResult>, tokio::task::JoinError> {
    let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
    let chunk_size = records.len().div_ceil(workers).max(1);

    let keys: Arc<[TokenKey]> = keys.into();
    let options = Arc::new(options);

    let mut handles = Vec::new();
    let mut records = records.into_iter().peekable();
    while records.peek().is_some() {
        let chunk: Vec<InputRecord> = records.by_ref().take(chunk_size).collect();
        let keys = Arc::clone(&keys);
        let options = Arc::clone(&options);
        handles.push(tokio::task::spawn_blocking(move || {
            chunk
                .iter()
                .map(|entry| tokenize_entry(entry, &keys, &options))
                .collect::<Vec<_>>()
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.extend(handle.await?);
    }
    Ok(results)
}

/// Tokenize an input file and write JSON results
pub async fn execute(
    input: String,
    output: Option<String>,
    keys: Vec<TokenKey>,
    options: PipelineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = read_input(&input)
        .await
        .map_err(|e| format!("Failed to read input '{}': {}", input, e))?;
    let records =
        parse_records(&json).map_err(|e| format!("Failed to parse input '{}': {}", input, e))?;

    if keys.is_empty() {
        tracing::warn!("no keys supplied; emitting tuples only");
    }

    let total = records.len();
    let results = tokenize_records(records, keys, options).await?;
    let rejected = results
        .iter()
        .filter(|r| matches!(r, RecordResult::Error(_)))
        .count();
    tracing::info!(records = total, rejected, "tokenization complete");

    let rendered = serde_json::to_string_pretty(&results)?;
    match output {
        Some(path) => tokio::fs::write(&path, rendered + "\n")
            .await
            .map_err(|e| format!("Failed to write output '{}': {}", path, e))?,
        None => println!("{}", rendered),
    }

    Ok(())
}
