//! `data:` URLs: the embedded form uploaded files take inside the gallery.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Builds `data:<media_type>;base64,<payload>`.
pub fn encode(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", BASE64.encode(bytes))
}
