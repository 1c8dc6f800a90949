use axum::response::sse::Event;
use chrono::{DateTime, SecondsFormat, TimeZone};
use std::fmt;

/// An immutable text payload delivered to every registered sink by one
/// broadcast. Messages are built fresh for each broadcast and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
}

impl Message {
    /// A bare `\r` would end an event-stream field early, so carriage returns
    /// are folded into line feeds, which the framing splits into `data:` lines.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let text = if text.contains('\r') {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text
        };
        Self { text }
    }

    /// The notification sent whenever the update trigger fires, stamped with
    /// an RFC 3339 timestamp at second precision.
    pub fn update_triggered<Tz>(at: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self::new(format!(
            "Update triggered at {}",
            at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Renders the message as an event-stream frame: one `data:` line per
    /// line of text, terminated by a blank line.
    pub fn frame(&self) -> String {
        let mut frame = String::with_capacity(self.text.len() + 8);
        for line in self.text.split('\n') {
            frame.push_str("data: ");
            frame.push_str(line);
            frame.push('\n');
        }
        frame.push('\n');
        frame
    }

    pub(crate) fn to_event(&self) -> Event {
        Event::default().data(self.text())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_update_triggered_formats_utc_timestamp_with_z() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let message = Message::update_triggered(at);
        assert_eq!(message.text(), "Update triggered at 2024-03-09T14:05:07Z");
    }

    #[test]
    fn test_update_triggered_keeps_local_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = offset.with_ymd_and_hms(2024, 3, 9, 16, 5, 7).unwrap();
        let message = Message::update_triggered(at);
        assert_eq!(
            message.text(),
            "Update triggered at 2024-03-09T16:05:07+02:00"
        );
    }

    #[test]
    fn test_frame_single_line() {
        let message = Message::new("Update triggered at 2024-03-09T14:05:07Z");
        assert_eq!(
            message.frame(),
            "data: Update triggered at 2024-03-09T14:05:07Z\n\n"
        );
    }

    #[test]
    fn test_new_folds_carriage_returns_into_line_feeds() {
        let message = Message::new("a\r\nb\rc");
        assert_eq!(message.text(), "a\nb\nc");
        assert_eq!(message.frame(), "data: a\ndata: b\ndata: c\n\n");
    }

    #[test]
    fn test_frame_splits_multiline_text() {
        let message = Message::new("first\nsecond");
        assert_eq!(message.frame(), "data: first\ndata: second\n\n");
    }
}
