//! Schedule sheet layout - previews how tweets are packed into spreadsheet rows
//!
//! Each row starts with the date and weekday, followed by five slots of five
//! columns (`Type`, `Content`, `Characters`, `Image`, `Video`). Tweets fill the
//! slots left to right; a full row moves on to the next calendar day.

use serde::Serialize;
use time::{Date, Month};

/// Tweet slots per sheet row
pub const SLOTS_PER_ROW: usize = 5;

/// Columns per slot
pub const COLUMNS_PER_SLOT: usize = 5;

/// First data row (row 1 holds the header)
pub const FIRST_DATA_ROW: u32 = 2;

/// Header row written to an empty sheet
pub fn sheet_header() -> Vec<String> {
    let mut header = vec!["Date".to_string(), "Day".to_string()];
    for slot in 1..=SLOTS_PER_ROW {
        for column in ["Type", "Content", "Characters", "Image", "Video"] {
            header.push(format!("{} {}", column, slot));
        }
    }
    header
}

/// Errors while planning a layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid sheet date '{0}': expected DD/MM/YYYY")]
    InvalidDate(String),
    #[error("Slot {0} is out of range (0-4)")]
    InvalidSlot(usize),
    #[error("Row {0} is before the first data row")]
    InvalidRow(u32),
    #[error("Date overflow after {0}")]
    DateOverflow(String),
}

/// Position the next tweet is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetCursor {
    pub date: Date,
    pub row: u32,
    /// First empty slot in `row`
    pub slot: usize,
}

impl SheetCursor {
    /// Cursor for an empty sheet
    pub fn start(date: Date) -> Self {
        Self {
            date,
            row: FIRST_DATA_ROW,
            slot: 0,
        }
    }
}

/// One filled slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSlot {
    /// Slot index within the row (0-4)
    pub slot: usize,
    pub kind: &'static str,
    pub content: String,
    /// `=LEN(<col><row>)` formula counting the content characters
    pub characters: String,
}

/// One row update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    pub row: u32,
    pub date: String,
    pub day: String,
    pub slots: Vec<SheetSlot>,
}

/// Spreadsheet column letter holding the content of `slot`
pub fn content_column(slot: usize) -> char {
    (b'D' + (slot * COLUMNS_PER_SLOT) as u8) as char
}

/// Parse a `DD/MM/YYYY` date
pub fn parse_sheet_date(value: &str) -> Result<Date, LayoutError> {
    let invalid = || LayoutError::InvalidDate(value.to_string());

    let parts: Vec<&str> = value.trim().split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(invalid());
    };

    let day: u8 = day.parse().map_err(|_| invalid())?;
    let month: u8 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month = Month::try_from(month).map_err(|_| invalid())?;

    Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}

/// Format a date as `DD/MM/YYYY`
pub fn format_sheet_date(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// Plan the row updates for `tweets`, starting at `cursor`
pub fn plan_layout(tweets: &[String], cursor: SheetCursor) -> Result<Vec<SheetRow>, LayoutError> {
    if cursor.slot >= SLOTS_PER_ROW {
        return Err(LayoutError::InvalidSlot(cursor.slot));
    }
    if cursor.row < FIRST_DATA_ROW {
        return Err(LayoutError::InvalidRow(cursor.row));
    }

    let mut rows = Vec::new();
    let mut date = cursor.date;
    let mut row = cursor.row;
    let mut slot = cursor.slot;
    let mut remaining = tweets.iter().peekable();

    while remaining.peek().is_some() {
        let mut slots = Vec::new();
        while slot < SLOTS_PER_ROW {
            let Some(tweet) = remaining.next() else {
                break;
            };
            slots.push(SheetSlot {
                slot,
                kind: "Text",
                content: tweet.clone(),
                characters: format!("=LEN({}{})", content_column(slot), row),
            });
            slot += 1;
        }

        rows.push(SheetRow {
            row,
            date: format_sheet_date(date),
            day: date.weekday().to_string(),
            slots,
        });

        if slot == SLOTS_PER_ROW {
            slot = 0;
            row += 1;
            date = date
                .next_day()
                .ok_or_else(|| LayoutError::DateOverflow(format_sheet_date(date)))?;
        }
    }

    Ok(rows)
}
