use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Messages waiting to be acknowledged. Only the front one is on screen and
/// it blocks the rest of the UI until dismissed.
#[derive(Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text.into());
    }

    pub fn error(&mut self, err: &dyn std::error::Error) {
        self.push(NoticeKind::Error, err.to_string());
    }

    fn push(&mut self, kind: NoticeKind, text: String) {
        self.queue.push_back(Notice { kind, text });
    }

    pub fn current(&self) -> Option<&Notice> {
        self.queue.front()
    }

    pub fn dismiss_current(&mut self) {
        self.queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;

    #[test]
    fn shown_one_at_a_time_in_order() {
        let mut notices = Notices::default();
        notices.error(&FormError::InvalidEmail);
        notices.info("added");

        let first = notices.current().expect("queued");
        assert_eq!(first.kind, NoticeKind::Error);
        assert_eq!(first.text, "Please enter a valid email address.");

        notices.dismiss_current();
        assert_eq!(notices.current().map(|n| n.text.as_str()), Some("added"));

        notices.dismiss_current();
        assert!(notices.current().is_none());
    }
}
