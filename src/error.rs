/// Reasons a user action on the image form is refused.
///
/// The `Display` text is exactly what the user is shown.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error(
        "Please fill in author email, name, image description, and either upload a file or provide an image URL."
    )]
    MissingField,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please select an image file.")]
    UnsupportedFileType,
}
