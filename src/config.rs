//! Settings for building a [`TokenIndex`].

use indexmap::IndexMap;

use crate::base::{Corpus, Idx};
use crate::errors::{T2IError, T2IResult};
use crate::token_index::{TokenIndex, check_delimiter, create_index};

pub const DEFAULT_DELIMITER: &str = " ";
pub const UNK_TOKEN: &str = "<unk>";
pub const EOS_TOKEN: &str = "<eos>";

/// Builder for a [`TokenIndex`].
///
/// ```
/// use t2i::TokenIndexBuilder;
///
/// let t2i = TokenIndexBuilder::default()
///     .delimiter("|")
///     .unk_token("<oov>")
///     .build("a|b|a")
///     .unwrap();
/// assert_eq!(t2i.unk_idx(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TokenIndexBuilder {
    delimiter: String,
    unk_token: String,
    eos_token: String,
    seed: Option<IndexMap<String, Idx>>,
}

impl Default for TokenIndexBuilder {
    fn default() -> Self {
        TokenIndexBuilder {
            delimiter: DEFAULT_DELIMITER.to_string(),
            unk_token: UNK_TOKEN.to_string(),
            eos_token: EOS_TOKEN.to_string(),
            seed: None,
        }
    }
}

impl TokenIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// String the sentences are split on.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn unk_token(mut self, token: impl Into<String>) -> Self {
        self.unk_token = token.into();
        self
    }

    pub fn eos_token(mut self, token: impl Into<String>) -> Self {
        self.eos_token = token.into();
        self
    }

    /// Start from an existing mapping instead of an empty one.
    ///
    /// Seeded tokens keep their indices; new tokens are numbered from `seed.len()`.
    /// The seed's indices must be exactly `0..seed.len()`, otherwise
    /// [`TokenIndexBuilder::build`] fails with [`T2IError::SparseSeed`].
    pub fn seed(mut self, seed: IndexMap<String, Idx>) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn get_delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn get_unk_token(&self) -> &str {
        &self.unk_token
    }

    pub fn get_eos_token(&self) -> &str {
        &self.eos_token
    }

    /// Index every token of `corpus`, then add the unknown and end tokens if missing.
    ///
    /// Fails on an empty delimiter or a seed that is not numbered `0..len`.
    pub fn build<'a>(self, corpus: impl Into<Corpus<'a>>) -> T2IResult<TokenIndex> {
        check_delimiter(&self.delimiter)?;
        if let Some(seed) = &self.seed {
            check_seed(seed)?;
        }
        let t2i = create_index(corpus.into(), &self.delimiter, self.seed.unwrap_or_default());
        Ok(TokenIndex::from_mapping(t2i, self.unk_token, self.eos_token))
    }
}

/// New tokens are numbered from `seed.len()`, so the seed must use every index below it once.
fn check_seed(seed: &IndexMap<String, Idx>) -> T2IResult<()> {
    let mut seen = vec![false; seed.len()];
    for &idx in seed.values() {
        match seen.get_mut(idx) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(T2IError::SparseSeed(idx)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let builder = TokenIndexBuilder::new();
        assert_eq!(builder.get_delimiter(), " ");
        assert_eq!(builder.get_unk_token(), "<unk>");
        assert_eq!(builder.get_eos_token(), "<eos>");
    }

    #[test]
    fn custom_special_tokens() {
        let t2i = TokenIndexBuilder::new()
            .unk_token("UNK")
            .eos_token("EOS")
            .build("x y")
            .unwrap();
        assert_eq!(t2i.unk_token(), "UNK");
        assert_eq!(t2i.eos_token(), "EOS");
        assert_eq!(t2i.get("UNK"), 2);
        assert_eq!(t2i.get("EOS"), 3);
        assert!(!t2i.contains("<unk>"));
    }

    #[test]
    fn special_tokens_already_in_corpus_keep_their_index() {
        let t2i = TokenIndexBuilder::new().build("<eos> a <unk>").unwrap();
        assert_eq!(t2i.eos_idx(), 0);
        assert_eq!(t2i.unk_idx(), 2);
        assert_eq!(t2i.len(), 3);
    }

    #[test]
    fn seeded_build_continues_numbering() {
        let seed: IndexMap<String, Idx> = [("a".to_string(), 0), ("b".to_string(), 1)]
            .into_iter()
            .collect();
        let t2i = TokenIndexBuilder::new().seed(seed).build("b c").unwrap();
        assert_eq!(t2i.get("a"), 0);
        assert_eq!(t2i.get("b"), 1);
        assert_eq!(t2i.get("c"), 2);
        assert_eq!(t2i.unk_idx(), 3);
        assert_eq!(t2i.eos_idx(), 4);
    }

    #[test]
    fn seed_with_gaps_is_rejected() {
        let seed: IndexMap<String, Idx> = [("a".to_string(), 1)].into_iter().collect();
        let result = TokenIndexBuilder::new().seed(seed).build("b");
        assert_eq!(result.unwrap_err(), T2IError::SparseSeed(1));
    }

    #[test]
    fn seed_with_shared_index_is_rejected() {
        let seed: IndexMap<String, Idx> = [("a".to_string(), 0), ("b".to_string(), 0)]
            .into_iter()
            .collect();
        let result = TokenIndexBuilder::new().seed(seed).build("c");
        assert_eq!(result.unwrap_err(), T2IError::SparseSeed(0));
    }

    #[test]
    fn shuffled_dense_seed_is_accepted() {
        let seed: IndexMap<String, Idx> = [("a".to_string(), 1), ("b".to_string(), 0)]
            .into_iter()
            .collect();
        let t2i = TokenIndexBuilder::new().seed(seed).build("c").unwrap();
        assert_eq!(t2i.get("c"), 2);
        for (token, idx) in t2i.iter() {
            assert_eq!(t2i.token(idx), Some(token));
        }
    }

    #[test]
    fn empty_delimiter_is_rejected() {
        let result = TokenIndexBuilder::new().delimiter("").build("abc");
        assert_eq!(result.unwrap_err(), T2IError::EmptyDelimiter);
    }
}
