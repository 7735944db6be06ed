//! Example program that parses notation given on the command line and reports what kind of
//! System Exclusive message it is. Set `RUST_LOG=sysex_notation=trace` to see the classifier's
//! reasoning.

use sysex_notation::{classify, parse_notation, sysex::Classification, writer::NotationWriteable};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let input = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let Some(parsed) = parse_notation(&input) else {
        eprintln!("usage: inspect <notation>, e.g. inspect F0 41 10 42 12 40 00 7F 00 41 F7");
        return;
    };

    if let Some(error) = &parsed.error {
        println!("{error} at offset {}: `{}`", parsed.index, &input[parsed.index..]);
    }
    println!("bytes: {}", parsed.to_notation());

    match classify(&parsed.bytes) {
        Some(Classification::Matched(verdict)) => {
            println!("format: {}", verdict.format);
            println!(
                "checksum: {:02x} (expected {:02x}) {}",
                verdict.checksum,
                verdict.calculated_checksum,
                if verdict.is_checksum_error { "NG" } else { "OK" }
            );
        }
        Some(Classification::Unrecognized { .. }) => println!("format: unknown, no checksum"),
        None => println!("not a System Exclusive message"),
    }
}
