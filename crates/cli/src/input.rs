//! Text input from flags, files or stdin

use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;

/// Read `--text`, or `--file` (`-` for stdin). `None` when neither is given.
pub fn read_text(text: Option<&str>, file: Option<&Path>) -> Result<Option<String>> {
    if let Some(text) = text {
        return Ok(Some(text.to_string()));
    }

    let Some(path) = file else {
        return Ok(None);
    };

    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read from stdin")?;
        return Ok(Some(text));
    }

    std::fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
