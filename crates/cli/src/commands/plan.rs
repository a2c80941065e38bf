//! Plan command - preview the schedule sheet layout

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use time::{Date, OffsetDateTime};
use tweet_scheduler_domain::text::split_tweets;
use tweet_scheduler_domain::usecases::layout::{parse_sheet_date, sheet_header};
use tweet_scheduler_domain::usecases::{SheetCursor, SheetRow, plan_layout};

use crate::args::PlanArgs;
use crate::config::AppConfig;
use crate::input::read_text;

pub async fn execute(args: PlanArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let Some(text) = read_text(args.text.as_deref(), args.file.as_deref())? else {
        bail!("No tweets provided: use --text or --file");
    };
    let tweets = split_tweets(&text);
    if tweets.is_empty() {
        bail!("No tweets provided");
    }

    let date = start_date(
        args.start_date.as_deref(),
        config.schedule.start_date.as_deref(),
    )?;
    let cursor = SheetCursor {
        date,
        row: args.row,
        slot: args.slot,
    };

    let rows = plan_layout(&tweets, cursor).context("Failed to plan sheet layout")?;
    tracing::info!(tweets = tweets.len(), rows = rows.len(), "Planned sheet layout");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_rows(&rows);
    }

    Ok(())
}

/// Flag first, then config, then today
fn start_date(flag: Option<&str>, configured: Option<&str>) -> Result<Date> {
    match flag.or(configured) {
        Some(value) => Ok(parse_sheet_date(value)?),
        None => Ok(OffsetDateTime::now_utc().date()),
    }
}

fn print_rows(rows: &[SheetRow]) {
    println!("Columns: {}", sheet_header().join(" | "));
    println!();
    for row in rows {
        println!("Row {} - {} ({})", row.row, row.date, row.day);
        for slot in &row.slots {
            println!(
                "  slot {} [{} {}] {}",
                slot.slot + 1,
                slot.kind,
                slot.characters,
                slot.content.replace('\n', " / ")
            );
        }
    }
}
