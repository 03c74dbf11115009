//! Append-only gallery of submitted images.

use std::collections::HashMap;

/// One submitted image. Never mutated once it is in the gallery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryEntry {
    /// Either an external URL or a `data:` URL produced from an uploaded file.
    pub image_source: String,
    pub alt_text: String,
    pub author_name: String,
    pub author_email: String,
}

/// Author details attached to an image source. Only shown in the overlay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorMeta {
    pub name: String,
    pub email: String,
}

/// Ordered gallery entries plus a side-table from image source to author.
///
/// The only way in is [`GalleryStore::append`]; there is no removal.
/// Sources are not required to be unique: when the same source is appended
/// twice, lookups keep returning the author of the first entry.
#[derive(Default)]
pub struct GalleryStore {
    entries: Vec<GalleryEntry>,
    authors: HashMap<String, AuthorMeta>,
}

impl GalleryStore {
    pub fn append(&mut self, entry: GalleryEntry) {
        self.authors
            .entry(entry.image_source.clone())
            .or_insert_with(|| AuthorMeta {
                name: entry.author_name.clone(),
                email: entry.author_email.clone(),
            });
        log::debug!(
            "gallery: appended entry #{} ({})",
            self.entries.len(),
            entry.alt_text
        );
        self.entries.push(entry);
    }

    /// Author of the first entry whose source matches exactly.
    pub fn lookup(&self, image_source: &str) -> Option<&AuthorMeta> {
        self.authors.get(image_source)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &GalleryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
