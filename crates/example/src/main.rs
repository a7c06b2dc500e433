//! Load-plan CLI.
//!
//! Discovers a package tree on disk and prints the order in which packages
//! and modules would be loaded, without loading anything.
//!
//! # Usage
//!
//! ```bash
//! ordo-plan <config.toml | root_dir>
//! ```
//!
//! Set `RUST_LOG`-style filters through `ORDO_LOG`, e.g. `ORDO_LOG=debug`.

#![expect(clippy::print_stdout, clippy::print_stderr, reason = "command-line output")]

use example::{config_for, plan};
use ordo_core::{FsDiscovery, TracingConfig, TracingFormat};
use std::path::PathBuf;

fn main() {
    let mut tracing_config = TracingConfig::new().with_format(TracingFormat::Compact);
    if let Ok(filter) = std::env::var("ORDO_LOG") {
        tracing_config = tracing_config.with_env_filter(filter);
    }
    tracing_config.init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: ordo-plan <config.toml | root_dir>");
        eprintln!("Example: ordo-plan ./src/my_app");
        std::process::exit(1);
    }

    let target = PathBuf::from(&args[1]);
    let config = config_for(&target).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match plan(config, FsDiscovery::new()) {
        Ok(plan) => {
            println!("packages:");
            for (i, package) in plan.packages.iter().enumerate() {
                println!("  {:>3}. {package}", i + 1);
            }
            println!("modules:");
            for (i, module) in plan.modules.iter().enumerate() {
                println!("  {:>3}. {module}", i + 1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
