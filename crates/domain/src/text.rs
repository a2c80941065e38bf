//! Tweet buffer helpers

/// Separator inserted between blocks in the tweet buffer
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Append `block` to `buffer`, separated by a blank line when the buffer is non-empty
pub fn append_block(buffer: &str, block: &str) -> String {
    if buffer.is_empty() {
        block.to_string()
    } else {
        format!("{}{}{}", buffer, BLOCK_SEPARATOR, block)
    }
}

/// Split processed text into individual tweets.
///
/// Tweets are separated by blank lines; line breaks inside a tweet are kept.
pub fn split_tweets(text: &str) -> Vec<String> {
    let normalized = normalize_punctuation(&text.replace("\r\n", "\n"));
    let mut tweets = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in normalized.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                tweets.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        tweets.push(current.join("\n"));
    }

    tweets
}

/// Replace typographic quotes and dashes with their ASCII counterparts
pub fn normalize_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' => '\'',
            '\u{2013}' => '-',
            other => other,
        })
        .collect()
}
