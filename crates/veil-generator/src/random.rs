use crate::entropy::{EntropySource, OsEntropy};
use crate::Generator;
use veil_core::Token;

/// Bytes of entropy behind every token (192 bits).
pub const TOKEN_BYTES: usize = 24;

/// Length of an encoded token: 24 bytes in unpadded base64.
pub const TOKEN_LENGTH: usize = 32;

/// Mints tokens from raw entropy encoded as URL-safe base64.
///
/// Tokens are independent of the identifier they will be paired with, so
/// nothing about the identifier can be inferred from the token.
#[derive(Debug, Clone)]
pub struct RandomGenerator<E = OsEntropy> {
    entropy: E,
}

impl<E: EntropySource> RandomGenerator<E> {
    pub fn new(entropy: E) -> Self {
        Self { entropy }
    }
}

impl Default for RandomGenerator<OsEntropy> {
    fn default() -> Self {
        Self::new(OsEntropy)
    }
}

impl<E: EntropySource> Generator for RandomGenerator<E> {
    fn generate(&self) -> Token {
        let mut bytes = [0u8; TOKEN_BYTES];
        self.entropy.fill(&mut bytes);
        Token::encode(bytes)
    }
}
