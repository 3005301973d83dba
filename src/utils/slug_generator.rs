//! Random slug generation.
//!
//! Slugs are drawn from the operating system CSPRNG so that issued links
//! cannot be predicted or enumerated from one another.

use thiserror::Error;

/// Characters a slug is built from: `a-z`, `A-Z`, `0-9` and `_`.
pub const SLUG_ALPHABET: &[u8; 63] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

/// Largest multiple of the alphabet size that fits in a byte. Bytes at or above
/// this value are discarded so every character stays equally likely.
const REJECTION_BOUND: u8 = (u8::MAX / SLUG_ALPHABET.len() as u8) * SLUG_ALPHABET.len() as u8;

/// Errors that can occur while generating a slug.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("random source failure: {0}")]
    RandomSource(#[from] getrandom::Error),
}

/// Produces candidate slugs.
///
/// Implementations hold no mutable state and are safe to share between
/// concurrent callers. Failures are not retried internally.
#[cfg_attr(test, mockall::automock)]
pub trait SlugGenerator: Send + Sync {
    /// Generates a new candidate slug.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if the underlying random source fails.
    fn generate(&self) -> Result<String, GeneratorError>;
}

/// Fixed-length slug generator backed by `getrandom`.
#[derive(Debug, Clone)]
pub struct RandomSlugGenerator {
    length: usize,
}

impl RandomSlugGenerator {
    /// Creates a generator producing slugs of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl SlugGenerator for RandomSlugGenerator {
    fn generate(&self) -> Result<String, GeneratorError> {
        let mut slug = String::with_capacity(self.length);
        let mut buffer = vec![0u8; self.length.max(8) * 2];

        while slug.len() < self.length {
            getrandom::fill(&mut buffer)?;

            for &byte in &buffer {
                if byte >= REJECTION_BOUND {
                    continue;
                }
                slug.push(SLUG_ALPHABET[(byte % SLUG_ALPHABET.len() as u8) as usize] as char);
                if slug.len() == self.length {
                    break;
                }
            }
        }

        Ok(slug)
    }
}
