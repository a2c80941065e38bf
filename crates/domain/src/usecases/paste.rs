//! Paste event decoding
//!
//! Every image item of a paste event is decoded on its own blocking task. Results
//! are tagged with the item's position in the event and returned in event order,
//! whatever order the decodes finish in.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::stream::{FuturesUnordered, StreamExt};

use crate::model::PastedImage;

/// Content of a single clipboard item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PastePayload {
    /// `data:<mime>;base64,<payload>` as produced by browser file readers
    DataUrl(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Plain text (never treated as an image)
    Text(String),
}

/// One item of a paste event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteItem {
    pub mime_type: String,
    pub payload: PastePayload,
}

impl PasteItem {
    pub fn image_bytes(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: PastePayload::Bytes(data),
        }
    }

    pub fn data_url(data_url: impl Into<String>) -> Self {
        let data_url = data_url.into();
        let mime_type = data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split([';', ',']).next())
            .unwrap_or_default()
            .to_string();
        Self {
            mime_type,
            payload: PastePayload::DataUrl(data_url),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            mime_type: "text/plain".to_string(),
            payload: PastePayload::Text(text.into()),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/") && !matches!(self.payload, PastePayload::Text(_))
    }
}

/// Errors decoding a pasted image
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasteError {
    #[error("Malformed data URL")]
    MalformedDataUrl,
    #[error("Unsupported data URL encoding: {0}")]
    UnsupportedEncoding(String),
    #[error("Invalid base64 payload: {0}")]
    Base64(String),
    #[error("Image is empty")]
    Empty,
    #[error("Decode task failed: {0}")]
    Task(String),
}

/// Result of decoding one image item, tagged with its event index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedItem {
    pub index: usize,
    pub result: Result<PastedImage, PasteError>,
}

/// Decode every image item of a paste event, concurrently.
///
/// Non-image items are skipped. The returned items are sorted by event index.
pub async fn decode_paste_event(items: Vec<PasteItem>) -> Vec<DecodedItem> {
    let mut tasks: FuturesUnordered<_> = items
        .into_iter()
        .enumerate()
        .filter(|(_, item)| item.is_image())
        .map(|(index, item)| async move {
            let result = tokio::task::spawn_blocking(move || decode_item(item))
                .await
                .map_err(|e| PasteError::Task(e.to_string()))
                .and_then(|decoded| decoded);
            DecodedItem { index, result }
        })
        .collect();

    let mut decoded = Vec::with_capacity(tasks.len());
    while let Some(item) = tasks.next().await {
        decoded.push(item);
    }
    decoded.sort_by_key(|item| item.index);

    decoded
}

/// Decode a single image item
pub fn decode_item(item: PasteItem) -> Result<PastedImage, PasteError> {
    let (mime_type, data) = match item.payload {
        PastePayload::Bytes(data) => (item.mime_type, data),
        PastePayload::DataUrl(url) => {
            let (mime_type, data) = decode_data_url(&url)?;
            let mime_type = if mime_type.is_empty() {
                item.mime_type
            } else {
                mime_type
            };
            (mime_type, data)
        }
        PastePayload::Text(_) => return Err(PasteError::UnsupportedEncoding("text".to_string())),
    };

    if data.is_empty() {
        return Err(PasteError::Empty);
    }

    Ok(PastedImage::new(mime_type, data))
}

/// Split a base64 data URL into its MIME type and decoded bytes
fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), PasteError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or(PasteError::MalformedDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(PasteError::MalformedDataUrl)?;

    let mut parts = header.split(';');
    let mime_type = parts.next().unwrap_or_default().to_string();
    if !parts.any(|part| part.eq_ignore_ascii_case("base64")) {
        return Err(PasteError::UnsupportedEncoding(header.to_string()));
    }

    let data = STANDARD
        .decode(payload.trim())
        .map_err(|e| PasteError::Base64(e.to_string()))?;

    Ok((mime_type, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_url(mime: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
    }

    #[test]
    fn test_data_url_item_takes_mime_from_header() {
        let item = PasteItem::data_url(data_url("image/jpeg", b"jpg"));
        assert_eq!(item.mime_type, "image/jpeg");
        assert!(item.is_image());
    }

    #[test]
    fn test_decode_data_url() {
        let image = decode_item(PasteItem::data_url(data_url("image/png", b"\x89PNG"))).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, b"\x89PNG");
    }

    #[test]
    fn test_decode_rejects_non_base64_data_url() {
        let result = decode_item(PasteItem {
            mime_type: "image/svg+xml".to_string(),
            payload: PastePayload::DataUrl("data:image/svg+xml,<svg/>".to_string()),
        });
        assert!(matches!(result, Err(PasteError::UnsupportedEncoding(_))));
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let result = decode_item(PasteItem::data_url("data:image/png;base64,@@@"));
        assert!(matches!(result, Err(PasteError::Base64(_))));
    }

    #[test]
    fn test_decode_rejects_empty_image() {
        let result = decode_item(PasteItem::image_bytes("image/png", vec![]));
        assert_eq!(result, Err(PasteError::Empty));
    }

    #[tokio::test]
    async fn test_decode_event_keeps_event_order_and_skips_text() {
        let items = vec![
            PasteItem::image_bytes("image/png", vec![0; 64 * 1024]),
            PasteItem::text("caption"),
            PasteItem::data_url(data_url("image/gif", b"gif")),
            PasteItem::image_bytes("image/webp", vec![3]),
        ];

        let decoded = decode_paste_event(items).await;

        let indices: Vec<_> = decoded.iter().map(|item| item.index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
        let mimes: Vec<_> = decoded
            .iter()
            .map(|item| item.result.as_ref().unwrap().mime_type.as_str())
            .collect();
        assert_eq!(mimes, vec!["image/png", "image/gif", "image/webp"]);
    }

    #[tokio::test]
    async fn test_decode_event_reports_failures_in_place() {
        let items = vec![
            PasteItem::data_url("data:image/png;base64,@@@"),
            PasteItem::image_bytes("image/png", vec![1]),
        ];

        let decoded = decode_paste_event(items).await;

        assert_eq!(decoded.len(), 2);
        assert!(decoded[0].result.is_err());
        assert!(decoded[1].result.is_ok());
    }
}
