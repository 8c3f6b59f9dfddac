/// Display version information
pub fn execute() {
    println!("emtp {}", env!("CARGO_PKG_VERSION"));
    println!(
        "Match token generator (domain prefix {})",
        String::from_utf8_lossy(emtp::DOMAIN_PREFIX)
    );
}
