use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_FILE: &str = "contacts.json";

fn main() {
    // Logs go to stderr so they never interleave with the menu on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let mut data_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                data_path = args.next().map(PathBuf::from);
                if data_path.is_none() {
                    eprintln!("Error: --file requires a path argument");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("Contact Book");
                println!();
                println!("Usage: contact-book [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>      Contacts file path (default: {})", DEFAULT_DATA_FILE);
                println!("  -h, --help             Show this help");
                println!();
                println!("Set RUST_LOG (e.g. RUST_LOG=debug) to change log verbosity.");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    let data_path = data_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
    contact_book::cli::run(&data_path);
}
