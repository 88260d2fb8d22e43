use serde::{Deserialize, Serialize};
use teloxide::types::MessageId;

#[derive(Clone, Default, Serialize, Deserialize, Debug, PartialEq)]
pub enum DialogueState {
    #[default]
    Start,
    /// The next text message becomes the custom auto-reply; holds the prompt to clean up.
    AwaitingCustomText(MessageId),
}
