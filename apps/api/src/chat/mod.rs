//! The floating career-assistant chat. A running transcript exchanging single
//! request/response turns — entirely independent of the entitlement machine.

pub mod handlers;

use crate::models::chat::{ChatMessage, ChatRole};

/// Transcript plus the one-turn-at-a-time guard.
pub struct ChatState {
    pub transcript: Vec<ChatMessage>,
    pub turn_in_flight: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            turn_in_flight: false,
        }
    }

    /// Records the outgoing user message and returns the history to send with
    /// it (everything before this turn).
    pub fn begin_turn(&mut self, text: &str) -> Vec<ChatMessage> {
        let history = self.transcript.clone();
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            text: text.to_string(),
        });
        self.turn_in_flight = true;
        history
    }

    pub fn complete_turn(&mut self, reply: String) {
        self.transcript.push(ChatMessage {
            role: ChatRole::Model,
            text: reply,
        });
        self.turn_in_flight = false;
    }

    /// A failed turn stays in the transcript as an apology from the model, so
    /// the conversation is never left dangling on a user message.
    pub fn fail_turn(&mut self) {
        self.transcript.push(ChatMessage {
            role: ChatRole::Model,
            text: "Sorry, I encountered an error. Please try again.".to_string(),
        });
        self.turn_in_flight = false;
    }
}
