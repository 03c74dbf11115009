//! Full-size view of one gallery image with its author.

use crate::gallery::GalleryStore;

/// Shown for author fields that are missing or empty.
pub const PLACEHOLDER: &str = "N/A";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayView {
    pub image_source: String,
    pub author_line: String,
    pub email_line: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Hidden,
    Visible(OverlayView),
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(PLACEHOLDER)
}

impl Overlay {
    /// Opens the overlay for `image_source`, replacing whatever was shown.
    ///
    /// An unknown source still opens, with placeholder author lines.
    pub fn open(&mut self, store: &GalleryStore, image_source: &str) {
        let author = store.lookup(image_source);
        if author.is_none() {
            log::warn!("no gallery entry for the activated image source");
        }
        let name = or_placeholder(author.map(|a| a.name.as_str()));
        let email = or_placeholder(author.map(|a| a.email.as_str()));

        *self = Self::Visible(OverlayView {
            image_source: image_source.to_owned(),
            author_line: format!("Author: {name}"),
            email_line: format!("Email: {email}"),
        });
    }

    pub fn dismiss(&mut self) {
        *self = Self::Hidden;
    }

    pub fn view(&self) -> Option<&OverlayView> {
        match self {
            Self::Hidden => None,
            Self::Visible(view) => Some(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::GalleryEntry;

    fn store_with(name: &str, email: &str) -> GalleryStore {
        let mut store = GalleryStore::default();
        store.append(GalleryEntry {
            image_source: "https://example.com/s.jpg".to_owned(),
            alt_text: "Sunset".to_owned(),
            author_name: name.to_owned(),
            author_email: email.to_owned(),
        });
        store
    }

    #[test]
    fn shows_author_of_matching_entry() {
        let store = store_with("Ann", "a@b.com");
        let mut overlay = Overlay::default();
        overlay.open(&store, "https://example.com/s.jpg");

        let view = overlay.view().expect("visible");
        assert_eq!(view.image_source, "https://example.com/s.jpg");
        assert_eq!(view.author_line, "Author: Ann");
        assert_eq!(view.email_line, "Email: a@b.com");
    }

    #[test]
    fn unknown_source_still_opens_with_placeholders() {
        let store = store_with("Ann", "a@b.com");
        let mut overlay = Overlay::default();
        overlay.open(&store, "https://example.com/other.jpg");

        let view = overlay.view().expect("visible");
        assert_eq!(view.image_source, "https://example.com/other.jpg");
        assert_eq!(view.author_line, "Author: N/A");
        assert_eq!(view.email_line, "Email: N/A");
    }

    #[test]
    fn empty_metadata_falls_back_per_field() {
        let store = store_with("Ann", "");
        let mut overlay = Overlay::default();
        overlay.open(&store, "https://example.com/s.jpg");

        let view = overlay.view().expect("visible");
        assert_eq!(view.author_line, "Author: Ann");
        assert_eq!(view.email_line, "Email: N/A");
    }

    #[test]
    fn reopening_after_dismiss_shows_the_same_thing() {
        let store = store_with("Ann", "a@b.com");
        let mut overlay = Overlay::default();

        overlay.open(&store, "https://example.com/s.jpg");
        let first = overlay.view().cloned();
        overlay.dismiss();
        assert_eq!(overlay, Overlay::Hidden);

        overlay.open(&store, "https://example.com/s.jpg");
        assert_eq!(overlay.view().cloned(), first);
    }
}
