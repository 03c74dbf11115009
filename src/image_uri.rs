//! Short `bytes://` URIs for images the app holds in memory.
//!
//! egui caches loaded images by URI and looks them up every frame, so an
//! upload is drawn from a short key registered once with the context, never
//! from its data URL.

use std::sync::Arc;

use egui::load::Bytes;

use crate::file_picker::PickedFile;

/// Hands out unique `bytes://<scope>/<n>.<ext>` URIs.
#[derive(Debug, Default)]
pub struct ImageUris {
    next: u64,
}

impl ImageUris {
    /// Registers the bytes of `file` with `ctx` and returns the URI to draw it with.
    pub fn register(&mut self, ctx: &egui::Context, scope: &str, file: &PickedFile) -> String {
        self.next += 1;
        // The image loader picks a decoder from the extension.
        let uri = match extension_for(&file.media_type) {
            Some(ext) => format!("bytes://{scope}/{}.{ext}", self.next),
            None => format!("bytes://{scope}/{}", self.next),
        };
        log::debug!("registered '{}' as {uri}", file.name);
        ctx.include_bytes(uri.clone(), Bytes::Shared(Arc::clone(&file.bytes)));
        uri
    }

    /// Drops the bytes behind `uri` along with any decoded image and texture.
    pub fn release(ctx: &egui::Context, uri: &str) {
        log::debug!("releasing {uri}");
        ctx.forget_image(uri);
    }
}

fn extension_for(media_type: &str) -> Option<&'static str> {
    image::ImageFormat::from_mime_type(media_type)?
        .extensions_str()
        .first()
        .copied()
}
