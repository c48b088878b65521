//! CLI entry point.
//!
//! # Responsibility
//! - Verify `contacts_core` linkage with a deterministic probe.
//! - Start file logging in `logs/` next to the store file.
//! - Print every contact stored in the default store file.

use contacts_core::{
    default_log_level, default_store_path, init_logging, ContactService, JsonFileStore,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const SEPARATOR: &str = "--------------------";
const LOG_DIR_NAME: &str = "logs";

fn main() -> ExitCode {
    println!("contacts_core ping={}", contacts_core::ping());
    println!("contacts_core version={}", contacts_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("contacts_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store_path = default_store_path()?;
    start_logging(&store_path);

    let service = ContactService::new(JsonFileStore::open(&store_path)?);
    for contact in service.list_all()? {
        println!("{contact}");
        println!("{SEPARATOR}");
    }
    Ok(())
}

// Listing still works without logs; the failure is only reported.
fn start_logging(store_path: &Path) {
    if let Err(err) = init_logging(default_log_level(), log_dir_for(store_path)) {
        eprintln!("contacts_cli: logging disabled: {err}");
    }
}

fn log_dir_for(store_path: &Path) -> PathBuf {
    store_path
        .parent()
        .unwrap_or(store_path)
        .join(LOG_DIR_NAME)
}
