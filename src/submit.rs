//! Turning a draft into a gallery entry.
//!
//! [`validate`] runs synchronously and either refuses the draft or yields a
//! [`ValidSubmission`]. Resolving that into a [`GalleryEntry`] is async since
//! an uploaded file has to be encoded as a data URL first. Nothing stops a
//! second submission from being started while an earlier one is still
//! resolving; they complete in whatever order their decodes finish.

use crate::data_url;
use crate::error::FormError;
use crate::file_picker::PickedFile;
use crate::form::{DraftSubmission, InputPanel};
use crate::gallery::{GalleryEntry, GalleryStore};

/// Coarse check: an address needs an `@` and a `.` somewhere.
pub fn looks_like_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Source {
    File(PickedFile),
    Url(String),
}

/// How the image reached the gallery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Upload,
    Url,
}

impl SourceKind {
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Upload => {
                "Image added to gallery (client-side only)! In a real app, this would be uploaded to a server."
            }
            Self::Url => {
                "Image added to gallery (via URL)! Note: Server-side validation recommended for external URLs."
            }
        }
    }
}

/// A draft that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidSubmission {
    source: Source,
    alt_text: String,
    author_name: String,
    author_email: String,
}

/// A resolved submission, ready to be appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submitted {
    pub entry: GalleryEntry,
    pub kind: SourceKind,
    /// The uploaded file behind a data URL source, kept so the UI can draw
    /// it without going through the data URL.
    pub upload: Option<PickedFile>,
}

pub fn validate(draft: DraftSubmission) -> Result<ValidSubmission, FormError> {
    let DraftSubmission {
        author_email,
        author_name,
        alt_text,
        file,
        url,
    } = draft;

    if author_email.is_empty() || author_name.is_empty() || alt_text.is_empty() {
        return Err(FormError::MissingField);
    }
    // A chosen file wins over a URL.
    let source = match file {
        Some(file) => Source::File(file),
        None if !url.is_empty() => Source::Url(url),
        None => return Err(FormError::MissingField),
    };
    if !looks_like_email(&author_email) {
        return Err(FormError::InvalidEmail);
    }

    Ok(ValidSubmission {
        source,
        alt_text,
        author_name,
        author_email,
    })
}

/// Encodes a picked file as a `data:` URL.
pub async fn read_as_data_url(file: PickedFile) -> String {
    data_url::encode(&file.media_type, &file.bytes)
}

impl ValidSubmission {
    pub fn kind(&self) -> SourceKind {
        match self.source {
            Source::File(_) => SourceKind::Upload,
            Source::Url(_) => SourceKind::Url,
        }
    }

    /// Produces the final image source. URLs are used verbatim.
    pub async fn resolve(self) -> Submitted {
        let kind = self.kind();
        let (image_source, upload) = match self.source {
            Source::File(file) => (read_as_data_url(file.clone()).await, Some(file)),
            Source::Url(url) => (url, None),
        };
        Submitted {
            entry: GalleryEntry {
                image_source,
                alt_text: self.alt_text,
                author_name: self.author_name,
                author_email: self.author_email,
            },
            kind,
            upload,
        }
    }
}

/// Appends a resolved submission and clears the form. Returns the text to
/// show the user.
pub fn complete(
    store: &mut GalleryStore,
    panel: &mut InputPanel,
    submitted: Submitted,
) -> &'static str {
    log::info!(
        "submission by '{}' added to gallery ({:?})",
        submitted.entry.author_name,
        submitted.kind
    );
    store.append(submitted.entry);
    panel.reset();
    submitted.kind.success_message()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> DraftSubmission {
        DraftSubmission {
            author_email: "a@b.com".to_owned(),
            author_name: "Ann".to_owned(),
            alt_text: "Sunset".to_owned(),
            file: None,
            url: "https://example.com/s.jpg".to_owned(),
        }
    }

    fn png() -> PickedFile {
        PickedFile::new("s.png", "image/png", b"\x89PNG\r\n\x1a\n".to_vec())
    }

    #[test]
    fn every_required_field_is_checked() {
        let cases: [fn(&mut DraftSubmission); 4] = [
            |d| d.author_email.clear(),
            |d| d.author_name.clear(),
            |d| d.alt_text.clear(),
            |d| d.url.clear(),
        ];
        for clear in cases {
            let mut d = draft();
            clear(&mut d);
            assert_eq!(validate(d), Err(FormError::MissingField));
        }
    }

    #[test]
    fn missing_field_is_reported_before_a_bad_email() {
        let mut d = draft();
        d.author_email = "nope".to_owned();
        d.alt_text.clear();
        assert_eq!(validate(d), Err(FormError::MissingField));
    }

    #[test]
    fn email_needs_at_sign_and_dot() {
        for email in ["ab.com", "a@bcom", "plain"] {
            let mut d = draft();
            d.author_email = email.to_owned();
            assert_eq!(validate(d), Err(FormError::InvalidEmail), "{email}");
        }
        // Deliberately loose.
        assert!(looks_like_email(".@"));
    }

    #[test]
    fn url_resolves_verbatim() {
        let valid = validate(draft()).expect("valid draft");
        assert_eq!(valid.kind(), SourceKind::Url);

        let submitted = pollster::block_on(valid.resolve());
        assert_eq!(submitted.entry.image_source, "https://example.com/s.jpg");
        assert_eq!(submitted.entry.alt_text, "Sunset");
        assert_eq!(submitted.kind, SourceKind::Url);
        assert_eq!(submitted.upload, None);
    }

    #[test]
    fn file_wins_over_url_and_becomes_a_data_url() {
        let mut d = draft();
        d.file = Some(png());
        let valid = validate(d).expect("valid draft");
        assert_eq!(valid.kind(), SourceKind::Upload);

        let submitted = pollster::block_on(valid.resolve());
        assert_eq!(
            submitted.entry.image_source,
            "data:image/png;base64,iVBORw0KGgo="
        );
        assert_eq!(submitted.upload, Some(png()));
    }

    #[test]
    fn complete_appends_and_resets() {
        let mut store = GalleryStore::default();
        let mut panel = InputPanel::default();
        panel.author_name = "Ann".to_owned();
        panel.set_url("https://example.com/s.jpg".to_owned());

        let submitted = pollster::block_on(validate(draft()).expect("valid").resolve());
        let message = complete(&mut store, &mut panel, submitted);

        assert_eq!(message, SourceKind::Url.success_message());
        assert_eq!(store.len(), 1);
        assert_eq!(panel.draft(), DraftSubmission::default());
    }
}
