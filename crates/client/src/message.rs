//! Bounded log of messages shown under the map.
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct MessageEntry {
    pub text: String,
    /// Step counter at the time the message was pushed.
    pub step: u64,
    pub level: MessageLevel,
}

/// Circular buffer of messages displayed to the player.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, step: u64, level: MessageLevel, text: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(MessageEntry {
            text: text.into(),
            step,
            level,
        });
    }

    pub fn info(&mut self, step: u64, text: impl Into<String>) {
        self.push(step, MessageLevel::Info, text);
    }

    pub fn warn(&mut self, step: u64, text: impl Into<String>) {
        self.push(step, MessageLevel::Warning, text);
    }

    pub fn error(&mut self, step: u64, text: impl Into<String>) {
        self.push(step, MessageLevel::Error, text);
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }
}
