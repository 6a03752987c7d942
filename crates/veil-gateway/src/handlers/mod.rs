mod health;
mod tokens;

pub use health::health_handler;
pub use tokens::{detokenize_handler, tokenize_handler};
