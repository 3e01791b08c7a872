//! Bounded body snippet capture.

use log::warn;

/// Reads up to a snippet's worth of body content from a response.
///
/// Reads chunks until the byte budget for `max_chars` characters is covered
/// or the body ends. Read errors mid-body keep whatever was already
/// collected; an error before any content yields `None`. The caller enforces
/// the probe deadline around this read.
pub async fn read_snippet(mut response: reqwest::Response, max_chars: usize) -> Option<String> {
    // UTF-8 worst case: 4 bytes per character.
    let byte_budget = max_chars.saturating_mul(4);
    let mut buf: Vec<u8> = Vec::new();

    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                buf.extend_from_slice(&chunk);
                if buf.len() >= byte_budget {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Body read failed mid-snippet: {e}");
                if buf.is_empty() {
                    return None;
                }
                break;
            }
        }
    }

    Some(clean_snippet(&buf, max_chars))
}

/// Decodes bytes leniently and collapses whitespace into single spaces,
/// bounded to `max_chars` characters. Invalid byte sequences are replaced,
/// never propagated as errors.
pub fn clean_snippet(bytes: &[u8], max_chars: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect()
}
