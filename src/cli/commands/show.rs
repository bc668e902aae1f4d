use anyhow::Result;
use std::path::Path;

use newscheck::implementations::artifacts::{ load_bundle, load_claims };

use crate::cli::{ ui, OutputFormat };

/// Print a saved result bundle, or a claims file when `claims` is set
pub fn execute(path: &Path, claims: bool, format: OutputFormat) -> Result<()> {
    if claims {
        let incidents = load_claims(path)?;
        match format {
            OutputFormat::Json => {
                let document = serde_json::json!({ "incidents": incidents });
                println!("{}", serde_json::to_string_pretty(&document)?);
            }
            OutputFormat::Text => ui::display_incidents(&incidents),
        }
        return Ok(());
    }

    let bundle = load_bundle(path)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bundle)?),
        OutputFormat::Text => ui::display_bundle(&bundle),
    }
    Ok(())
}
