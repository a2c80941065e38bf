//! Hooks command - browse, search, copy and export hook templates

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;
use tweet_scheduler_domain::usecases::{CategorySelection, HookLibrary, copy_to_clipboard};

use crate::args::{HooksArgs, HooksCommands};
use crate::config::AppConfig;
use crate::services::{build_clipboard, load_hooks};

pub async fn execute(args: HooksArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    match args.command {
        HooksCommands::List { json } => {
            let library = load_hooks(&config).await?;
            list(&library, json)
        }
        HooksCommands::Search {
            term,
            category,
            json,
        } => {
            let library = load_hooks(&config).await?;
            search(&library, &category, term.as_deref().unwrap_or(""), json)
        }
        HooksCommands::Copy {
            term,
            category,
            index,
        } => {
            let library = load_hooks(&config).await?;
            let results = matches(&library, &category, term.as_deref().unwrap_or(""))?;
            let Some(hook) = results.get(index) else {
                bail!(
                    "No hook at index {} ({} matching hooks)",
                    index,
                    results.len()
                );
            };

            let clipboard = build_clipboard(&config)?;
            copy_to_clipboard(clipboard.as_ref(), hook).await;
            println!("{}", hook);
            Ok(())
        }
        HooksCommands::Export { path, force } => {
            let library = load_hooks(&config).await?;
            export(&library, path, force)
        }
    }
}

fn list(library: &HookLibrary, json: bool) -> Result<()> {
    if json {
        let categories: Vec<_> = library
            .categories()
            .iter()
            .map(|c| serde_json::json!({"id": c.id, "title": c.title, "count": c.examples.len()}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    println!("Hook categories ({}):", library.categories().len());
    println!();
    for category in library.categories() {
        println!(
            "  {:<12} {} ({} hooks)",
            category.id,
            category.title,
            category.examples.len()
        );
    }

    Ok(())
}

fn search(library: &HookLibrary, category: &str, term: &str, json: bool) -> Result<()> {
    let results = matches(library, category, term)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No hooks found.");
        return Ok(());
    }
    for (index, hook) in results.iter().enumerate() {
        println!("{:>3}. {}", index, hook);
    }

    Ok(())
}

/// Search results; an unknown category id matches nothing and is warned about
fn matches<'a>(library: &'a HookLibrary, category: &str, term: &str) -> Result<Vec<&'a str>> {
    let selection: CategorySelection = category.parse()?;
    if let CategorySelection::Category(id) = &selection {
        if !library.categories().iter().any(|c| &c.id == id) {
            let known: Vec<_> = library.list_categories().iter().map(|(id, _)| *id).collect();
            eprintln!(
                "Warning: unknown hook category: {} (known: {})",
                id,
                known.join(", ")
            );
        }
    }

    Ok(library.search(&selection, term))
}

fn export(library: &HookLibrary, path: Option<PathBuf>, force: bool) -> Result<()> {
    let json = serde_json::to_string_pretty(&library.to_json())
        .context("Failed to serialize hooks")?;

    let Some(path) = path else {
        println!("{}", json);
        return Ok(());
    };

    if path.exists() && !force {
        bail!(
            "Hooks file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    fs::write(&path, json + "\n")
        .with_context(|| format!("Failed to write hooks file: {}", path.display()))?;
    println!(
        "Exported {} hook categories to {}",
        library.categories().len(),
        path.display()
    );

    Ok(())
}
