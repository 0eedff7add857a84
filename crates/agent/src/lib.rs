pub mod assistant;
pub mod llm;
pub mod prompt;

pub use assistant::{AssistantReply, ChatAssistant};
pub use llm::{LlmClient, LlmError};
pub use prompt::{
    CartItemSummary, ChatContext, DietaryContext, PromptVariant, ShoppingContext,
    MAX_USER_MESSAGE_CHARS,
};
