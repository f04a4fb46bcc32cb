//! Card is a pair <prompt, answer> with a stable identity.
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Why a new card was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("answer must not be empty")]
    EmptyAnswer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub prompt: String,
    pub answer: String,
}

impl Card {
    /// Creates a card with a freshly generated identifier.
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Creates a card from user input. Both fields are trimmed and must be
    /// non-empty afterwards.
    pub fn validated(prompt: &str, answer: &str) -> Result<Self, ValidationError> {
        let prompt = prompt.trim();
        let answer = answer.trim();

        if prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        if answer.is_empty() {
            return Err(ValidationError::EmptyAnswer);
        }

        Ok(Self::new(prompt, answer))
    }

    /// Copy of this card under a new identifier, used when a card goes back
    /// into the queue after a wrong answer.
    pub fn requeued(&self) -> Self {
        Self::new(self.prompt.clone(), self.answer.clone())
    }
}
