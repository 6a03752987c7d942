pub mod entropy;
pub mod random;

pub use entropy::{EntropySource, OsEntropy, SeededEntropy};
pub use random::{RandomGenerator, TOKEN_BYTES, TOKEN_LENGTH};

use veil_core::Token;

/// Trait for generating candidate tokens.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is enforced by the repository at insert time, so a generator
/// only has to make collisions improbable, not impossible.
pub trait Generator: Send + Sync + 'static {
    /// Produces a fresh candidate token.
    fn generate(&self) -> Token;
}
