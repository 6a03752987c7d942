//! Token issuance and lookup.
//!
//! This crate provides [`TokenizerService`], which pairs a repository with
//! a token generator. Core types are re-exported from `veil_core`.

pub mod service;

pub use service::{TokenizerService, MAX_ISSUE_ATTEMPTS};
pub use veil_core::{Token, Tokenizer, TokenizerError};
