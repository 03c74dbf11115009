//! The small "Enter your data here" form that sits next to the gallery.
//!
//! Unlike the image form, values are checked as typed (no trimming) and the
//! fields are left alone after a successful submission.

use crate::submit::looks_like_email;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("Please fill in all fields of the contact form.")]
    MissingField,

    #[error("Please enter a valid email address for the contact form.")]
    InvalidEmail,
}

#[derive(Clone, Debug, Default)]
pub struct ContactForm {
    pub email: String,
    pub name: String,
    pub message: String,
}

impl ContactForm {
    /// Validates the form and returns the confirmation text.
    pub fn submit(&self) -> Result<String, ContactError> {
        if self.email.is_empty() || self.name.is_empty() || self.message.is_empty() {
            return Err(ContactError::MissingField);
        }
        if !looks_like_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(format!(
            "Contact Form Submitted!\nName: {}\nEmail: {}\nMessage: {}",
            self.name, self.email, self.message
        ))
    }
}
