use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;

use crate::base::{Batch, Corpus, Decoded, Idx, IndexedCorpus, Tokenizer};
use crate::config::{DEFAULT_DELIMITER, EOS_TOKEN, TokenIndexBuilder, UNK_TOKEN};
use crate::errors::{T2IError, T2IResult};

/// Bidirectional mapping between tokens and indices.
///
/// Tokens missing from the vocabulary look up as the unknown token's index.
/// Indices missing from the vocabulary are an error on the way back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIndex {
    t2i: IndexMap<String, Idx>,
    i2t: HashMap<Idx, String>,
    unk_token: String,
    unk_idx: Idx,
    eos_token: String,
}

pub(crate) fn check_delimiter(delimiter: &str) -> T2IResult<()> {
    if delimiter.is_empty() {
        return Err(T2IError::EmptyDelimiter);
    }
    Ok(())
}

/// Trim the sentence and split it on `delimiter`. A blank sentence has no tokens.
fn tokenize<'s, 'd>(sentence: &'s str, delimiter: &'d str) -> impl Iterator<Item = &'s str> {
    let sentence = sentence.trim();
    (!sentence.is_empty())
        .then(|| sentence.split(delimiter))
        .into_iter()
        .flatten()
}

/// Index of `token`, giving it the next free index (`t2i.len()`) if it has none.
fn insert_if_absent(t2i: &mut IndexMap<String, Idx>, token: &str) -> Idx {
    if let Some(&idx) = t2i.get(token) {
        return idx;
    }
    let idx = t2i.len();
    t2i.insert(token.to_string(), idx);
    idx
}

/// Add every token of `corpus` to `t2i` in order of first appearance.
pub(crate) fn create_index(
    corpus: Corpus<'_>,
    delimiter: &str,
    mut t2i: IndexMap<String, Idx>,
) -> IndexMap<String, Idx> {
    for sentence in corpus.iter() {
        for token in tokenize(sentence, delimiter) {
            insert_if_absent(&mut t2i, token);
        }
    }
    t2i
}

impl TokenIndex {
    /// Build an index from scratch, splitting on spaces and using `<unk>`/`<eos>`.
    ///
    /// Use [`TokenIndex::builder`] for other delimiters or special tokens.
    pub fn build<'a>(corpus: impl Into<Corpus<'a>>) -> Self {
        let t2i = create_index(corpus.into(), DEFAULT_DELIMITER, IndexMap::new());
        TokenIndex::from_mapping(t2i, UNK_TOKEN, EOS_TOKEN)
    }

    pub fn builder() -> TokenIndexBuilder {
        TokenIndexBuilder::default()
    }

    /// Wrap an existing token to index mapping.
    ///
    /// The unknown token and then the end token are appended at `t2i.len()` when
    /// missing. The indices of `t2i` are trusted as given; if two tokens share an
    /// index the later one wins on the way back, except that the unknown token's
    /// index always decodes to the unknown token.
    pub fn from_mapping(
        mut t2i: IndexMap<String, Idx>,
        unk_token: impl Into<String>,
        eos_token: impl Into<String>,
    ) -> Self {
        let unk_token = unk_token.into();
        let eos_token = eos_token.into();

        let unk_idx = insert_if_absent(&mut t2i, &unk_token);
        insert_if_absent(&mut t2i, &eos_token);

        let mut i2t = HashMap::with_capacity(t2i.len());
        for (token, &idx) in &t2i {
            if let Some(previous) = i2t.insert(idx, token.clone()) {
                log::warn!("tokens {previous:?} and {token:?} share index {idx}");
            }
        }
        i2t.insert(unk_idx, unk_token.clone());

        log::debug!("token index with {} tokens, {unk_token:?} at {unk_idx}", t2i.len());

        TokenIndex {
            t2i,
            i2t,
            unk_token,
            unk_idx,
            eos_token,
        }
    }

    /// A new index with the tokens of `corpus` added after the existing ones.
    ///
    /// Existing tokens keep their indices; `self` is left untouched.
    pub fn extend<'a>(&self, corpus: impl Into<Corpus<'a>>) -> Self {
        self.extend_unchecked(corpus.into(), DEFAULT_DELIMITER)
    }

    pub fn extend_with<'a>(&self, corpus: impl Into<Corpus<'a>>, delimiter: &str) -> T2IResult<Self> {
        check_delimiter(delimiter)?;
        Ok(self.extend_unchecked(corpus.into(), delimiter))
    }

    fn extend_unchecked(&self, corpus: Corpus<'_>, delimiter: &str) -> Self {
        let t2i = create_index(corpus, delimiter, self.t2i.clone());
        log::debug!("extending token index by {} tokens", t2i.len() - self.t2i.len());
        TokenIndex::from_mapping(t2i, self.unk_token.clone(), self.eos_token.clone())
    }

    /// Indices for every token of every sentence, splitting on spaces.
    ///
    /// A single sentence gives `Batch::Single`, a list of sentences gives
    /// `Batch::Many` with one entry per sentence.
    pub fn index<'a>(&self, corpus: impl Into<Corpus<'a>>) -> IndexedCorpus {
        self.index_unchecked(corpus.into(), DEFAULT_DELIMITER)
    }

    pub fn index_with<'a>(
        &self,
        corpus: impl Into<Corpus<'a>>,
        delimiter: &str,
    ) -> T2IResult<IndexedCorpus> {
        check_delimiter(delimiter)?;
        Ok(self.index_unchecked(corpus.into(), delimiter))
    }

    fn index_unchecked(&self, corpus: Corpus<'_>, delimiter: &str) -> IndexedCorpus {
        corpus.map(|sentence| tokenize(sentence, delimiter).map(|token| self.get(token)).collect())
    }

    /// Turn indices back into tokens.
    ///
    /// With a `joiner` each sentence comes back as one string, otherwise as a
    /// list of tokens. Fails on the first index with no token.
    pub fn unindex(
        &self,
        indexed_corpus: impl Into<IndexedCorpus>,
        joiner: Option<&str>,
    ) -> T2IResult<Batch<Decoded>> {
        indexed_corpus.into().try_map(|ids| {
            let tokens = self.lookup_tokens(&ids)?;
            Ok(match joiner {
                Some(joiner) => Decoded::Joined(tokens.join(joiner)),
                None => Decoded::Tokens(tokens.into_iter().map(str::to_string).collect()),
            })
        })
    }

    fn lookup_tokens(&self, ids: &[Idx]) -> T2IResult<Vec<&str>> {
        ids.iter()
            .map(|&idx| self.token(idx).ok_or(T2IError::UnknownIndex(idx)))
            .collect()
    }

    /// Index of a single token, or the unknown index if it is not in the vocabulary.
    pub fn get(&self, token: &str) -> Idx {
        match self.t2i.get(token) {
            Some(&idx) => idx,
            None => {
                log::trace!("{token:?} is unknown, using {}", self.unk_idx);
                self.unk_idx
            }
        }
    }

    pub fn token(&self, idx: Idx) -> Option<&str> {
        self.i2t.get(&idx).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.t2i.contains_key(token)
    }

    pub fn t2i(&self) -> &IndexMap<String, Idx> {
        &self.t2i
    }

    pub fn i2t(&self) -> &HashMap<Idx, String> {
        &self.i2t
    }

    pub fn unk_token(&self) -> &str {
        &self.unk_token
    }

    pub fn unk_idx(&self) -> Idx {
        self.unk_idx
    }

    pub fn eos_token(&self) -> &str {
        &self.eos_token
    }

    pub fn eos_idx(&self) -> Idx {
        self.t2i[self.eos_token.as_str()]
    }

    /// Number of tokens, including the unknown and end tokens.
    pub fn len(&self) -> usize {
        self.t2i.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t2i.is_empty()
    }

    /// `(token, index)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Idx)> {
        self.t2i.iter().map(|(token, &idx)| (token.as_str(), idx))
    }
}

/// Index of a single token, as [`TokenIndex::get`].
///
/// The key is one token and is not split, so `t2i["the cat"]` looks up the token
/// `"the cat"`. Use [`TokenIndex::index`] for sentences.
impl Index<&str> for TokenIndex {
    type Output = Idx;

    fn index(&self, token: &str) -> &Idx {
        self.t2i.get(token).unwrap_or(&self.unk_idx)
    }
}

impl Tokenizer for TokenIndex {
    fn encode(&self, text: &str) -> Vec<Idx> {
        tokenize(text, DEFAULT_DELIMITER)
            .map(|token| self.get(token))
            .collect()
    }

    fn decode(&self, ids: &[Idx]) -> T2IResult<String> {
        Ok(self.lookup_tokens(ids)?.join(DEFAULT_DELIMITER))
    }
}

impl fmt::Display for TokenIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenIndex(size: {}, unk: {:?}, eos: {:?})",
            self.len(),
            self.unk_token,
            self.eos_token
        )
    }
}
