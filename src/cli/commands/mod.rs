use anyhow::{ anyhow, Result };
use std::fs;
use std::path::Path;

use crate::cli::ui;

pub mod check;
pub mod extract;
pub mod fetch;
pub mod show;

/// Article text from `path`, or typed in when no path is given
pub fn load_article(path: Option<&Path>) -> Result<String> {
    let text = match path {
        Some(path) => {
            ui::print_info(&format!("Loading article from {}", path.display()));
            fs::read_to_string(path).map_err(|e|
                anyhow!("Failed to read article file {}: {}", path.display(), e)
            )?
        }
        None => ui::get_article_text()?,
    };

    if text.trim().is_empty() {
        return Err(anyhow!("Article text is empty"));
    }
    Ok(text)
}
