//! The "Add Your Image" panel and the preview it drives.

use crate::error::FormError;
use crate::file_picker::PickedFile;

/// What the preview region should display. Always derived from the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preview<'a> {
    Hidden,
    /// A file is chosen but its data URL is not ready yet.
    Loading,
    /// The decoded file of selection `serial`.
    File { serial: u64, data_url: &'a str },
    Url(&'a str),
}

/// Snapshot of the panel at the moment "Submit Image" is pressed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftSubmission {
    pub author_email: String,
    pub author_name: String,
    pub alt_text: String,
    pub file: Option<PickedFile>,
    pub url: String,
}

/// A file preview waiting for its data URL.
#[derive(Debug)]
pub struct PendingPreview {
    pub serial: u64,
    pub file: PickedFile,
}

struct SelectedFile {
    serial: u64,
    file: PickedFile,
    data_url: Option<String>,
}

/// Input fields of the image form.
///
/// The text fields are edited in place by the UI. The image source is only
/// changed through [`InputPanel::choose_file`] and [`InputPanel::set_url`],
/// which keep file and URL mutually exclusive.
#[derive(Default)]
pub struct InputPanel {
    pub author_email: String,
    pub author_name: String,
    pub alt_text: String,
    url: String,
    file: Option<SelectedFile>,
    next_serial: u64,
}

impl InputPanel {
    /// Selects `file` as the image source.
    ///
    /// Non-image files are refused and the selection is cleared. On success
    /// the caller is expected to decode the returned file and hand the result
    /// to [`InputPanel::file_decoded`]; the URL field is only cleared then.
    pub fn choose_file(&mut self, file: PickedFile) -> Result<PendingPreview, FormError> {
        if !file.is_image() {
            log::info!("rejected '{}' with media type '{}'", file.name, file.media_type);
            self.file = None;
            return Err(FormError::UnsupportedFileType);
        }

        self.next_serial += 1;
        let serial = self.next_serial;
        self.file = Some(SelectedFile {
            serial,
            file: file.clone(),
            data_url: None,
        });
        Ok(PendingPreview { serial, file })
    }

    /// Shows a finished file decode. Results for a file that is no longer
    /// selected are dropped.
    pub fn file_decoded(&mut self, serial: u64, data_url: String) {
        match &mut self.file {
            Some(selected) if selected.serial == serial => {
                selected.data_url = Some(data_url);
                self.url.clear();
            }
            _ => log::debug!("dropping stale preview #{serial}"),
        }
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// Replaces the URL text. A non-empty URL clears the file selection.
    pub fn set_url(&mut self, url: String) {
        if !url.is_empty() {
            self.file = None;
        }
        self.url = url;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|selected| selected.file.name.as_str())
    }

    /// Serial of the current file selection, if a file is selected.
    pub fn selected_serial(&self) -> Option<u64> {
        self.file.as_ref().map(|selected| selected.serial)
    }

    pub fn preview(&self) -> Preview<'_> {
        let decoded = self
            .file
            .as_ref()
            .and_then(|s| s.data_url.as_deref().map(|data_url| (s.serial, data_url)));
        if let Some((serial, data_url)) = decoded {
            Preview::File { serial, data_url }
        } else if !self.url.is_empty() {
            Preview::Url(&self.url)
        } else if self.file.is_some() {
            Preview::Loading
        } else {
            Preview::Hidden
        }
    }

    /// Current values with surrounding whitespace trimmed.
    pub fn draft(&self) -> DraftSubmission {
        DraftSubmission {
            author_email: self.author_email.trim().to_owned(),
            author_name: self.author_name.trim().to_owned(),
            alt_text: self.alt_text.trim().to_owned(),
            file: self.file.as_ref().map(|selected| selected.file.clone()),
            url: self.url.trim().to_owned(),
        }
    }

    /// Empties every field and hides the preview.
    pub fn reset(&mut self) {
        self.author_email.clear();
        self.author_name.clear();
        self.alt_text.clear();
        self.url.clear();
        self.file = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> PickedFile {
        PickedFile::new("s.png", "image/png", b"\x89PNG".to_vec())
    }

    #[test]
    fn url_is_previewed_verbatim() {
        let mut panel = InputPanel::default();
        panel.set_url("not really an image".to_owned());
        assert_eq!(panel.preview(), Preview::Url("not really an image"));

        panel.set_url(String::new());
        assert_eq!(panel.preview(), Preview::Hidden);
    }

    #[test]
    fn typing_a_url_clears_the_file() {
        let mut panel = InputPanel::default();
        let pending = panel.choose_file(png()).expect("png accepted");
        panel.file_decoded(pending.serial, "data:image/png;base64,iVBORw==".to_owned());

        panel.set_url("https://example.com/s.jpg".to_owned());

        assert_eq!(panel.selected_file_name(), None);
        assert_eq!(panel.preview(), Preview::Url("https://example.com/s.jpg"));
        assert!(panel.draft().file.is_none());
    }

    #[test]
    fn decoded_file_takes_over_the_url() {
        let mut panel = InputPanel::default();
        panel.set_url("https://example.com/s.jpg".to_owned());

        let pending = panel.choose_file(png()).expect("png accepted");
        // Until the decode lands the URL is still what is on screen.
        assert_eq!(panel.preview(), Preview::Url("https://example.com/s.jpg"));

        panel.file_decoded(pending.serial, "data:image/png;base64,iVBORw==".to_owned());
        assert_eq!(panel.url(), "");
        assert_eq!(
            panel.preview(),
            Preview::File {
                serial: pending.serial,
                data_url: "data:image/png;base64,iVBORw=="
            }
        );
    }

    #[test]
    fn file_without_decode_shows_loading() {
        let mut panel = InputPanel::default();
        let pending = panel.choose_file(png()).expect("png accepted");
        assert_eq!(panel.preview(), Preview::Loading);
        assert_eq!(panel.selected_file_name(), Some("s.png"));
        assert_eq!(panel.selected_serial(), Some(pending.serial));

        panel.clear_file();
        assert_eq!(panel.preview(), Preview::Hidden);
        assert_eq!(panel.selected_serial(), None);
    }

    #[test]
    fn non_image_file_is_rejected_and_cleared() {
        let mut panel = InputPanel::default();
        panel.choose_file(png()).expect("png accepted");

        let err = panel
            .choose_file(PickedFile::new("notes.txt", "text/plain", b"hi".to_vec()))
            .expect_err("text refused");

        assert_eq!(err, FormError::UnsupportedFileType);
        assert_eq!(panel.selected_file_name(), None);
        assert_eq!(panel.preview(), Preview::Hidden);
    }

    #[test]
    fn stale_decode_is_ignored() {
        let mut panel = InputPanel::default();
        let first = panel.choose_file(png()).expect("png accepted");
        panel.set_url("https://example.com/s.jpg".to_owned());

        panel.file_decoded(first.serial, "data:image/png;base64,old".to_owned());

        assert_eq!(panel.url(), "https://example.com/s.jpg");
        assert_eq!(panel.preview(), Preview::Url("https://example.com/s.jpg"));
    }

    #[test]
    fn draft_trims_text_and_reset_clears_everything() {
        let mut panel = InputPanel {
            author_email: "  a@b.com ".to_owned(),
            author_name: "\tAnn".to_owned(),
            alt_text: "Sunset  ".to_owned(),
            ..Default::default()
        };
        panel.set_url(" https://example.com/s.jpg ".to_owned());

        let draft = panel.draft();
        assert_eq!(draft.author_email, "a@b.com");
        assert_eq!(draft.author_name, "Ann");
        assert_eq!(draft.alt_text, "Sunset");
        assert_eq!(draft.url, "https://example.com/s.jpg");

        panel.reset();
        assert_eq!(panel.draft(), DraftSubmission::default());
        assert_eq!(panel.preview(), Preview::Hidden);
    }
}
