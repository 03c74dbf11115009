// Cross-platform file picker. Both backends read the chosen file into memory and drop it into a
// single-slot mailbox that the app drains once per frame with `take_picked_file`.
// On wasm we create a hidden <input type=file> and read it with a FileReader; on desktop we use
// rfd::FileDialog. Android has no picker.

use std::sync::{Arc, Mutex, PoisonError};

/// A user-chosen file, already read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    /// Declared MIME type. May be empty when the platform does not know it.
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl PickedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error("failed to read '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read '{name}': {message}")]
    Browser { name: String, message: String },
}

type Picked = Result<PickedFile, PickError>;

static PICKED: Mutex<Option<Picked>> = Mutex::new(None);

fn deliver(picked: Picked) {
    *PICKED.lock().unwrap_or_else(PoisonError::into_inner) = Some(picked);
}

/// Takes the most recently picked file, if one arrived since the last call.
pub fn take_picked_file() -> Option<Picked> {
    PICKED.lock().unwrap_or_else(PoisonError::into_inner).take()
}

/// Whether this platform has a file picker at all.
pub const fn is_available() -> bool {
    cfg!(any(target_arch = "wasm32", not(target_os = "android")))
}

#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::Uint8Array;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast as _;
    use wasm_bindgen::JsValue;
    use web_sys::{FileReader, HtmlInputElement};

    use super::{deliver, PickError, PickedFile};

    fn js_message(value: &JsValue) -> String {
        value.as_string().unwrap_or_else(|| format!("{value:?}"))
    }

    pub fn open_image_picker() {
        log::debug!("file_picker: open_image_picker called");
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Keep the input off-screen instead of display:none (some browsers block clicks on display:none)
        let Ok(input) = document.create_element("input") else {
            return;
        };
        let Ok(input) = input.dyn_into::<HtmlInputElement>() else {
            return;
        };

        // No `accept` filter: non-image files must reach the media type check.
        input.set_type("file");
        let _ = input.set_attribute("style", "position: fixed; left: -9999px; width: 1px; height: 1px; opacity: 0;");

        // Append to body so click is allowed
        if let Some(body) = document.body() {
            let _ = body.append_child(&input);
        }

        let onchange = Closure::wrap(Box::new(move |ev: web_sys::Event| {
            let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
                return;
            };
            let file = input.files().and_then(|files| files.get(0));
            input.remove();
            let Some(file) = file else {
                return;
            };

            let name = file.name();
            let media_type = file.type_();
            let reader = match FileReader::new() {
                Ok(reader) => reader,
                Err(err) => {
                    deliver(Err(PickError::Browser { name, message: js_message(&err) }));
                    return;
                }
            };
            let reader2 = reader.clone();
            let onload_name = name.clone();
            let onload = Closure::once(Box::new(move |_e: JsValue| {
                let picked = match reader2.result() {
                    Ok(result) => {
                        let bytes = Uint8Array::new(&result).to_vec();
                        Ok(PickedFile::new(onload_name, media_type, bytes))
                    }
                    Err(err) => Err(PickError::Browser { name: onload_name, message: js_message(&err) }),
                };
                deliver(picked);
            }) as Box<dyn FnOnce(_)>);
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
            if let Err(err) = reader.read_as_array_buffer(&file) {
                deliver(Err(PickError::Browser { name, message: js_message(&err) }));
            }
        }) as Box<dyn FnMut(_)>);

        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget(); // keep alive

        // Trigger the native file dialog
        input.click();
    }
}

#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
mod native {
    use std::path::Path;

    use super::{deliver, PickError, PickedFile};

    const OCTET_STREAM: &str = "application/octet-stream";

    /// Declared media type of a local file, judged by its extension.
    pub fn media_type_of(path: &Path) -> &'static str {
        image::ImageFormat::from_path(path)
            .map(|format| format.to_mime_type())
            .unwrap_or(OCTET_STREAM)
    }

    pub fn read_picked(path: &Path) -> Result<PickedFile, PickError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bytes = std::fs::read(path).map_err(|source| PickError::Read {
            name: name.clone(),
            source,
        })?;
        Ok(PickedFile::new(name, media_type_of(path), bytes))
    }

    pub fn open_image_picker() {
        log::debug!("file_picker: open_image_picker called");
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            deliver(read_picked(&path));
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn media_type_follows_extension() {
            assert_eq!(media_type_of(Path::new("sunset.png")), "image/png");
            assert_eq!(media_type_of(Path::new("photo.JPG")), "image/jpeg");
            assert_eq!(media_type_of(Path::new("notes.txt")), OCTET_STREAM);
            assert_eq!(media_type_of(Path::new("no_extension")), OCTET_STREAM);
        }

        #[test]
        fn missing_file_reports_read_error() {
            let err = read_picked(Path::new("/definitely/not/here.png")).expect_err("missing file");
            assert!(err.to_string().contains("here.png"), "unexpected message: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::open_image_picker;

#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
pub use native::open_image_picker;

#[cfg(all(not(target_arch = "wasm32"), target_os = "android"))]
pub fn open_image_picker() {}
