use crate::conversation::ConversationError;
use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Engine(#[from] ModelError),
    #[error(transparent)]
    Conversation(#[from] ConversationError),
}

impl AgentError {
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Engine(err) => err.user_message(),
            AgentError::Conversation(err) => err.user_message(),
        }
    }
}
