//! Synthetic identifiers for blank, anonymous and colliding names
//!
//! Generated names have the form `<method><tag><letters>_<field>_<name>`.
//! The letters come from a [`LetterSource`]; production code uses the
//! operating system's secure generator, tests can plug in a fixed sequence.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::warn;

/// Alphabet the random part of a synthetic name is drawn from
pub const LETTERS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of random letters in a synthetic name
pub const DEFAULT_LENGTH: usize = 4;

/// Tag for blank or anonymous parameters
pub const TAG_UNNAMED: &str = "Un";

/// Tag for blank or anonymous results
pub const TAG_RESULT_UNNAMED: &str = "ResUn";

/// Tag for a renamed span variable
pub const TAG_SPAN: &str = "Spn";

/// Source of uniformly distributed indexes into [`LETTERS`]
pub trait LetterSource {
    /// Return an index in `0..bound`
    fn pick(&mut self, bound: usize) -> Result<usize, rand::Error>;
}

/// Cryptographically secure letter source backed by [`OsRng`]
#[derive(Debug, Default, Clone, Copy)]
pub struct OsLetterSource;

impl LetterSource for OsLetterSource {
    fn pick(&mut self, bound: usize) -> Result<usize, rand::Error> {
        let bound = u32::try_from(bound.max(1)).unwrap_or(u32::MAX);
        // Rejection sampling keeps every index equally likely
        let zone = u32::MAX - (u32::MAX % bound);
        let mut bytes = [0u8; 4];
        loop {
            OsRng.try_fill_bytes(&mut bytes)?;
            let value = u32::from_le_bytes(bytes);
            if value < zone {
                return Ok((value % bound) as usize);
            }
        }
    }
}

/// Generates synthetic identifiers for one extraction run
pub struct NameGenerator {
    source: Box<dyn LetterSource>,
}

impl std::fmt::Debug for NameGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameGenerator").finish_non_exhaustive()
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::secure()
    }
}

impl NameGenerator {
    /// Generator drawing letters from the operating system
    pub fn secure() -> Self {
        Self::with_source(OsLetterSource)
    }

    /// Generator drawing letters from `source`
    pub fn with_source(source: impl LetterSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// `<method><tag><length letters>_<field_index>_<name_index>`
    ///
    /// Never fails: when the letter source errors the first letter of the
    /// alphabet is used instead.
    pub fn synthetic(
        &mut self,
        method: &str,
        field_index: usize,
        name_index: usize,
        length: usize,
        tag: &str,
    ) -> String {
        let letters: String = (0..length)
            .map(|_| {
                let index = match self.source.pick(LETTERS.len()) {
                    Ok(index) => index % LETTERS.len(),
                    Err(e) => {
                        warn!("Secure random source failed, using fallback letter: {e}");
                        0
                    }
                };
                char::from(LETTERS[index])
            })
            .collect();
        format!("{method}{tag}{letters}_{field_index}_{name_index}")
    }
}

/// Keep only the characters of `text` that may appear in a Go identifier
///
/// Used to turn a printed type such as `*pkg.Item` into a name fragment.
pub fn identifier_fragment(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Tag for an anonymous parameter of type `type_text`
pub fn unnamed_param_tag(type_text: &str) -> String {
    format!("{TAG_UNNAMED}{}", identifier_fragment(type_text))
}
