//! `advisor config init`

use crate::cli::ConfigInitArgs;
use std::fs;

/// Commented sample with every section at its default.
const EXAMPLE_CONFIG: &str = include_str!("../../advisor.example.toml");

/// Write the sample configuration to `args.output`.
///
/// Missing parent directories are created. An existing file is only
/// replaced with `--force`.
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.output, EXAMPLE_CONFIG)?;

    println!("✓ Configuration file created: {}", args.output.display());
    println!("  Point [catalog] at train.csv/test.csv and export GOOGLE_API_KEY before serving.");

    Ok(())
}
