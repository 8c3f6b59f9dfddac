// Integration tests for CLI commands
// These drive the built binary with temporary config and input files so the
// operator's own config and key environment never leak in.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::{NamedTempFile, TempDir};

const ASCENDING_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
const REFERENCE_TOKEN: &str = "a586bc1307ccf85e55b27ddd5379d2535fc547c09e6d892daec27a57174c798f";

fn emtp(config_dir: &TempDir, args: &[&str]) -> Output {
    let config = config_dir.path().join("config.toml");
    Command::new(env!("CARGO_BIN_EXE_emtp"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("EMTP_KEYS")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = emtp(&dir, &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tokenize"));
    assert!(stdout.contains("normalize"));
    assert!(stdout.contains("init-config"));
    assert!(stdout.contains("version"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    let output = emtp(&dir, &["version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("emtp"));
    assert!(stdout.contains("EMTP|v1|"));
}

#[test]
fn test_cli_normalize_reference_vector() {
    let dir = TempDir::new().unwrap();
    let output = emtp(
        &dir,
        &[
            "normalize",
            "--name",
            "MR. JRR Tolkien",
            "--dob",
            "1892-01-03",
            "--key-hex",
            ASCENDING_HEX,
        ],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"]["full"], "JRR TOLKIEN");
    assert_eq!(json["dob"], "1892-01-03");
    assert_eq!(json["tuple_count"], 2);
    let tokens = json["tokens"].as_array().unwrap();
    assert!(tokens.iter().any(|t| t == REFERENCE_TOKEN));
}

#[test]
fn test_cli_normalize_bad_dob_fails() {
    let dir = TempDir::new().unwrap();
    let output = emtp(&dir, &["normalize", "--name", "Ada", "--dob", "1815/12/10"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid date of birth"));
}

#[test]
fn test_cli_tokenize_file() {
    let dir = TempDir::new().unwrap();
    let mut input = NamedTempFile::new().unwrap();
    write!(
        input,
        r#"[
            {{"name": "MR. JRR Tolkien", "dob": "1892-01-03"}},
            {{"name": "Nobody", "dob": "1892-02-30x"}},
            {{"name": "Ada Lovelace", "dob": "1815-12-10",
              "addresses": [{{"line1": "12 St James Square", "city": "London", "state": "LDN", "postal_code": "SW1Y 4JH"}}]}},
            {{"name": "No Dob"}},
            {{"name": "Wrong Type", "dob": 18151210}}
        ]"#
    )
    .unwrap();
    let out_path = dir.path().join("out.json");

    let output = emtp(
        &dir,
        &[
            "tokenize",
            "--input",
            input.path().to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
            "--key-hex",
            ASCENDING_HEX,
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 5);
    assert!(results[0]["ok"]["tokens"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t == REFERENCE_TOKEN));
    assert!(results[1]["error"].is_string());
    assert!(results[2]["ok"]["tuples"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t == "DOB=1815-12-10|ADDR=12 ST JAMES SQUARE|SW1Y 4JH"));
    // Entries that fail to decode or validate stay in place
    assert!(results[3]["error"].is_string());
    assert!(results[4]["error"].is_string());
}

#[test]
fn test_cli_tokenize_key_file_from_config() {
    let dir = TempDir::new().unwrap();
    let key_file = dir.path().join("keys.txt");
    std::fs::write(&key_file, format!("# test key\nhex:{ASCENDING_HEX}\n")).unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!("[keys]\nkey_file = {:?}\n", key_file.to_str().unwrap()),
    )
    .unwrap();

    let mut input = NamedTempFile::new().unwrap();
    write!(input, r#"{{"name": "MR. JRR Tolkien", "dob": "1892-01-03"}}"#).unwrap();

    let output = emtp(&dir, &["tokenize", "--input", input.path().to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(REFERENCE_TOKEN));
}

#[test]
fn test_cli_tokenize_rejects_bad_key() {
    let dir = TempDir::new().unwrap();
    let mut input = NamedTempFile::new().unwrap();
    write!(input, r#"{{"dob": "1892-01-03"}}"#).unwrap();

    let output = emtp(
        &dir,
        &["tokenize", "--input", input.path().to_str().unwrap(), "--key-hex", "xyz"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid hex key"));
}

#[test]
fn test_cli_init_config() {
    let dir = TempDir::new().unwrap();
    let output = emtp(&dir, &["init-config"]);
    assert!(output.status.success());
    assert!(dir.path().join("config.toml").exists());

    // Second run refuses to overwrite
    let output = emtp(&dir, &["init-config"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--force"));
}

#[test]
fn test_cli_tokenize_requires_input() {
    let dir = TempDir::new().unwrap();
    let output = emtp(&dir, &["tokenize"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input") || stderr.contains("required"));
}
