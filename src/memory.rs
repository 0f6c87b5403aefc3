//! Bounded conversational memory.
//!
//! Holds the ordered transcript of a chat session and enforces a sliding
//! window over the most recent exchanges so long conversations don't grow
//! the prompt without bound.

use serde::{Deserialize, Serialize};

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single conversation message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered log of conversation messages, bounded to the most recent
/// `window` user/assistant exchange pairs plus at most one system message.
///
/// The system message, when present, is always the first entry and always
/// survives trimming.
#[derive(Debug, Clone)]
pub struct SessionMemory {
    messages: Vec<Message>,
    window: usize,
}

impl SessionMemory {
    /// Create an empty memory bounded to `window` exchange pairs.
    pub fn new(window: usize) -> Self {
        Self {
            messages: Vec::new(),
            window,
        }
    }

    /// Append a message to the tail and trim to the window.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.trim();
    }

    /// Insert a system message at the head iff none exists yet.
    ///
    /// Idempotent: repeat calls leave the log unchanged.
    pub fn ensure_system_message(&mut self, text: &str) {
        if self.system_message().is_none() {
            self.messages.insert(0, Message::system(text));
        }
    }

    /// The system message, if one has been set.
    pub fn system_message(&self) -> Option<&Message> {
        self.messages.first().filter(|m| m.role == Role::System)
    }

    /// All messages in chronological order (system message first, if any).
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The last `k` exchange pairs (at most `2k` non-system messages),
    /// in chronological order.
    pub fn recent(&self, k: usize) -> &[Message] {
        let tail = self.conversation();
        let keep = (2 * k).min(tail.len());
        &tail[tail.len() - keep..]
    }

    /// All non-system messages in chronological order.
    pub fn conversation(&self) -> &[Message] {
        match self.system_message() {
            Some(_) => &self.messages[1..],
            None => &self.messages,
        }
    }

    /// Remove every message, including the system message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop the oldest non-system messages until the window bound holds.
    fn trim(&mut self) {
        let head = usize::from(self.system_message().is_some());
        let max_tail = 2 * self.window;
        while self.messages.len() - head > max_tail {
            self.messages.remove(head);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(window: usize, exchanges: usize) -> SessionMemory {
        let mut memory = SessionMemory::new(window);
        for i in 0..exchanges {
            memory.append(Message::user(format!("question {}", i)));
            memory.append(Message::assistant(format!("answer {}", i)));
        }
        memory
    }

    #[test]
    fn test_window_bound() {
        let memory = filled(3, 10);
        assert_eq!(memory.conversation().len(), 6);
        // Oldest exchanges were dropped, newest kept
        assert_eq!(memory.conversation()[0].content, "question 7");
        assert_eq!(memory.conversation()[5].content, "answer 9");
    }

    #[test]
    fn test_recent_never_exceeds_two_k() {
        let memory = filled(10, 8);
        assert!(memory.recent(3).len() <= 6);
        assert!(memory.recent(100).len() <= 16);
    }

    #[test]
    fn test_recent_preserves_order() {
        let memory = filled(10, 4);
        let recent = memory.recent(2);
        assert_eq!(recent.len(), 4);
        assert_eq!(recent[0].content, "question 2");
        assert_eq!(recent[1].content, "answer 2");
        assert_eq!(recent[2].content, "question 3");
        assert_eq!(recent[3].content, "answer 3");
    }

    #[test]
    fn test_ensure_system_message_idempotent() {
        let mut memory = SessionMemory::new(5);
        memory.append(Message::user("hi"));
        memory.ensure_system_message("You are a helpful AI assistant.");
        memory.ensure_system_message("A different prompt");

        let system: Vec<_> = memory
            .messages()
            .iter()
            .filter(|m| m.role == Role::System)
            .collect();
        assert_eq!(system.len(), 1);
        assert_eq!(system[0].content, "You are a helpful AI assistant.");
        assert_eq!(memory.messages()[0].role, Role::System);
    }

    #[test]
    fn test_system_message_survives_trimming() {
        let mut memory = SessionMemory::new(2);
        memory.ensure_system_message("system");
        for i in 0..20 {
            memory.append(Message::user(format!("q{}", i)));
            memory.append(Message::assistant(format!("a{}", i)));
        }
        assert_eq!(memory.messages()[0].role, Role::System);
        assert_eq!(memory.len(), 5);
    }

    #[test]
    fn test_clear_resets_to_empty() {
        let mut memory = filled(5, 3);
        memory.ensure_system_message("system");
        memory.clear();
        assert!(memory.is_empty());
        assert_eq!(memory.len(), 0);
        assert!(memory.system_message().is_none());
    }
}
