use std::sync::Arc;

use veil_core::Tokenizer;

#[derive(Clone)]
pub struct AppState {
    tokenizer: Arc<dyn Tokenizer>,
}

impl AppState {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { tokenizer }
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }
}
