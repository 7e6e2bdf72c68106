//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `carelog_core` linkage.
//! - Inspect an existing store file without printing journal values.
//!
//! Usage:
//! - `carelog_cli` prints ping and version.
//! - `carelog_cli dump <db_path>` lists stored keys with value sizes.

use carelog_core::{KvResult, KvStore, SqliteKvStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            println!("carelog_core ping={}", carelog_core::ping());
            println!("carelog_core version={}", carelog_core::core_version());
            ExitCode::SUCCESS
        }
        [command, db_path] if command == "dump" => match dump(db_path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("dump failed: {err}");
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("usage: carelog_cli [dump <db_path>]");
            ExitCode::from(2)
        }
    }
}

fn dump(db_path: &str) -> KvResult<()> {
    let store = SqliteKvStore::open(db_path)?;
    let keys = store.keys()?;
    for key in &keys {
        let bytes = store.get(key)?.map(|value| value.len()).unwrap_or(0);
        println!("{key}\t{bytes} bytes");
    }
    println!("{} key(s)", keys.len());
    Ok(())
}
