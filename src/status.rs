use chrono::{DateTime, Local};
use std::collections::VecDeque;

use crate::config::MAX_STATUS_MESSAGES;
use crate::error::CommandError;

#[derive(Clone, Debug)]
pub struct StatusEntry {
    pub clock_time: DateTime<Local>,
    pub message: String,
}

/// Current status line plus a bounded history of what it showed.
#[derive(Debug)]
pub struct StatusLog {
    current: String,
    pub entries: VecDeque<StatusEntry>,
}

impl Default for StatusLog {
    fn default() -> Self {
        Self {
            current: "Disconnected".to_string(),
            entries: VecDeque::with_capacity(MAX_STATUS_MESSAGES),
        }
    }
}

impl StatusLog {
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn set(&mut self, message: impl Into<String>) {
        let message = message.into();

        // The backend and the UI often report the same thing back to back
        let repeated = self
            .entries
            .back()
            .is_some_and(|entry| entry.message == message);
        if !repeated {
            if self.entries.len() >= MAX_STATUS_MESSAGES {
                self.entries.pop_front();
            }
            self.entries.push_back(StatusEntry {
                clock_time: Local::now(),
                message: message.clone(),
            });
        }

        self.current = message;
    }

    pub fn error(&mut self, error: &CommandError) {
        self.set(format!("Error: {error}"));
    }

    /// Follows the status carried by a snapshot without logging it again.
    pub fn sync(&mut self, status: &str) {
        if self.current != status {
            self.set(status);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
