use std::sync::Arc;

use teloxide::dispatching::dialogue::{Dialogue, ErasedStorage, InMemStorage, Storage};

pub mod model;

pub use model::DialogueState;

pub type BotDialogue = Dialogue<DialogueState, ErasedStorage<DialogueState>>;

pub struct DialogueService;

impl DialogueService {
    pub fn get_dialogue_storage() -> Arc<ErasedStorage<DialogueState>> {
        InMemStorage::<DialogueState>::new().erase()
    }
}
