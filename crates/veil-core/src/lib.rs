//! Core types and traits for the Veil pseudonymization service.
//!
//! This crate provides the shared vocabulary used by the token generator,
//! the storage backends, the tokenizer service and the HTTP gateway.

pub mod error;
pub mod repository;
pub mod token;
pub mod tokenizer;

pub use error::{StorageError, TokenizerError};
pub use repository::{InsertOutcome, Mapping, ReadRepository, Repository};
pub use token::Token;
pub use tokenizer::Tokenizer;
