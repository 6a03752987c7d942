//! HTTP transport for the tokenizer.
//!
//! Exposes `POST /tokenize`, `POST /detokenize` and `GET /health` on top of
//! any [`Tokenizer`](veil_core::Tokenizer) implementation.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
