//! Positional wire codec.
//!
//! Wire layout (single UTF-8 text frame, no delimiters):
//!
//! ```text
//! client_id (32) || timestamp (ASCII digits) || {json body} || signature (hex)
//! ```
//!
//! There is no length prefix. Boundaries are recovered by position (the id is
//! fixed width) and by brace matching (the JSON body is one balanced object).
//!
//! Parsing rules:
//! - Never slice without checking `is_char_boundary` first.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.
//!
//! Known limitation: the span scanner only understands JSON structurally. It
//! steps over braces inside string literals (quote and escape aware) but
//! otherwise trusts the body to be syntactically valid JSON.

use crate::error::{LobbyError, Result};

/// Fixed width of the client id at the head of every frame.
pub const CLIENT_ID_LEN: usize = 32;

/// Smallest frame that can hold all parts: id, one digit, `{}`.
pub const MIN_FRAME_LEN: usize = CLIENT_ID_LEN + 1 + 2;

/// A frame split into its four logical parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireFrame {
    /// Client id (exactly 32 bytes).
    pub client_id: String,
    /// Timestamp digits as they appeared on the wire.
    pub timestamp: String,
    /// The balanced `{...}` JSON span.
    pub json_body: String,
    /// Everything after the JSON span.
    pub signature: String,
}

impl WireFrame {
    /// Timestamp as milliseconds since the Unix epoch.
    ///
    /// `decode` already guarantees the digits fit a `u64`.
    pub fn timestamp_millis(&self) -> Result<u64> {
        parse_timestamp(&self.timestamp)
    }
}

/// Assemble the wire string for one frame.
pub fn encode(client_id: &str, timestamp: u64, json_body: &str, signature: &str) -> Result<String> {
    if client_id.len() != CLIENT_ID_LEN {
        return Err(LobbyError::MalformedFrame(format!(
            "client id must be {CLIENT_ID_LEN} bytes (got {})",
            client_id.len()
        )));
    }
    match json_span_end(json_body, 0) {
        Some(end) if end + 1 == json_body.len() => {}
        _ => {
            return Err(LobbyError::MalformedFrame(
                "body must be a single balanced JSON object".into(),
            ))
        }
    }

    let ts = timestamp.to_string();
    let mut out = String::with_capacity(CLIENT_ID_LEN + ts.len() + json_body.len() + signature.len());
    out.push_str(client_id);
    out.push_str(&ts);
    out.push_str(json_body);
    out.push_str(signature);
    Ok(out)
}

/// Split a wire string into its four parts.
pub fn decode(raw: &str) -> Result<WireFrame> {
    if raw.len() < MIN_FRAME_LEN {
        return Err(LobbyError::MalformedFrame(format!(
            "frame too short ({} bytes, minimum {MIN_FRAME_LEN})",
            raw.len()
        )));
    }
    if !raw.is_char_boundary(CLIENT_ID_LEN) {
        return Err(LobbyError::MalformedFrame(
            "client id is not 32 single-byte characters".into(),
        ));
    }

    let (client_id, rest) = raw.split_at(CLIENT_ID_LEN);

    let json_start = rest
        .find('{')
        .ok_or_else(|| LobbyError::MalformedFrame("no JSON body".into()))?;
    let json_end = json_span_end(rest, json_start)
        .ok_or_else(|| LobbyError::MalformedFrame("unbalanced JSON body".into()))?;

    let timestamp = &rest[..json_start];
    parse_timestamp(timestamp)?;

    // `json_end` indexes the closing '}' (one byte), so `+ 1` is a char boundary.
    let json_body = &rest[json_start..=json_end];
    let signature = &rest[json_end + 1..];
    tracing::trace!(
        timestamp,
        body_len = json_body.len(),
        signature_len = signature.len(),
        "frame split"
    );

    Ok(WireFrame {
        client_id: client_id.to_owned(),
        timestamp: timestamp.to_owned(),
        json_body: json_body.to_owned(),
        signature: signature.to_owned(),
    })
}

fn parse_timestamp(digits: &str) -> Result<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LobbyError::MalformedFrame(format!(
            "timestamp must be decimal digits (got {digits:?})"
        )));
    }
    digits
        .parse::<u64>()
        .map_err(|e| LobbyError::MalformedFrame(format!("timestamp out of range: {e}")))
}

/// Find the byte index of the `}` closing the object that opens at `start`.
///
/// Returns `None` if `start` is not a `{` or the depth never returns to zero.
fn json_span_end(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(start) != Some(&b'{') {
        return None;
    }

    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
