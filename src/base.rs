use crate::errors::T2IResult;

pub type Idx = usize;

/// One item or an ordered list of items.
///
/// Operations accept either shape and hand back the same shape they were given,
/// so a single sentence in yields a single result out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch<T> {
    Single(T),
    Many(Vec<T>),
}

/// A single sentence or an ordered list of sentences.
pub type Corpus<'a> = Batch<&'a str>;

/// Indices for a single sentence or for an ordered list of sentences.
pub type IndexedCorpus = Batch<Vec<Idx>>;

impl<T> Batch<T> {
    pub fn len(&self) -> usize {
        match self {
            Batch::Single(_) => 1,
            Batch::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Batch::Single(_))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Batch::Single(item) => std::slice::from_ref(item).iter(),
            Batch::Many(items) => items.iter(),
        }
    }

    /// Always the list form; a single item becomes a one-element list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Batch::Single(item) => vec![item],
            Batch::Many(items) => items,
        }
    }

    /// The lone item of a `Single`, or `None` for `Many`.
    pub fn into_single(self) -> Option<T> {
        match self {
            Batch::Single(item) => Some(item),
            Batch::Many(_) => None,
        }
    }

    /// Apply `f` to every item, keeping the shape.
    pub fn map<U, F>(self, mut f: F) -> Batch<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Batch::Single(item) => Batch::Single(f(item)),
            Batch::Many(items) => Batch::Many(items.into_iter().map(f).collect()),
        }
    }

    /// Like [`Batch::map`], stopping at the first error.
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<Batch<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(match self {
            Batch::Single(item) => Batch::Single(f(item)?),
            Batch::Many(items) => Batch::Many(items.into_iter().map(f).collect::<Result<_, _>>()?),
        })
    }
}

impl<'a> From<&'a str> for Corpus<'a> {
    fn from(sentence: &'a str) -> Self {
        Batch::Single(sentence)
    }
}

impl<'a> From<&'a String> for Corpus<'a> {
    fn from(sentence: &'a String) -> Self {
        Batch::Single(sentence.as_str())
    }
}

impl<'a> From<Vec<&'a str>> for Corpus<'a> {
    fn from(sentences: Vec<&'a str>) -> Self {
        Batch::Many(sentences)
    }
}

impl<'a> From<&[&'a str]> for Corpus<'a> {
    fn from(sentences: &[&'a str]) -> Self {
        Batch::Many(sentences.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Corpus<'a> {
    fn from(sentences: [&'a str; N]) -> Self {
        Batch::Many(sentences.to_vec())
    }
}

impl<'a> From<&'a [String]> for Corpus<'a> {
    fn from(sentences: &'a [String]) -> Self {
        Batch::Many(sentences.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for Corpus<'a> {
    fn from(sentences: &'a Vec<String>) -> Self {
        Batch::from(sentences.as_slice())
    }
}

impl From<Vec<Idx>> for IndexedCorpus {
    fn from(ids: Vec<Idx>) -> Self {
        Batch::Single(ids)
    }
}

impl From<&[Idx]> for IndexedCorpus {
    fn from(ids: &[Idx]) -> Self {
        Batch::Single(ids.to_vec())
    }
}

impl<const N: usize> From<[Idx; N]> for IndexedCorpus {
    fn from(ids: [Idx; N]) -> Self {
        Batch::Single(ids.to_vec())
    }
}

impl From<Vec<Vec<Idx>>> for IndexedCorpus {
    fn from(sentences: Vec<Vec<Idx>>) -> Self {
        Batch::Many(sentences)
    }
}

impl From<&[Vec<Idx>]> for IndexedCorpus {
    fn from(sentences: &[Vec<Idx>]) -> Self {
        Batch::Many(sentences.to_vec())
    }
}

/// A sentence turned back into tokens, joined into one string if a joiner was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Tokens(Vec<String>),
    Joined(String),
}

impl Decoded {
    pub fn tokens(&self) -> Option<&[String]> {
        match self {
            Decoded::Tokens(tokens) => Some(tokens),
            Decoded::Joined(_) => None,
        }
    }

    pub fn joined(&self) -> Option<&str> {
        match self {
            Decoded::Tokens(_) => None,
            Decoded::Joined(text) => Some(text),
        }
    }
}

pub trait Tokenizer {
    /// Encode one sentence into a list of indices.
    fn encode(&self, text: &str) -> Vec<Idx>;

    /// Decode a list of indices back into one sentence.
    fn decode(&self, ids: &[Idx]) -> T2IResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sentence_corpus() {
        let corpus = Corpus::from("the cat sat");
        assert!(corpus.is_single());
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.into_vec(), vec!["the cat sat"]);
    }

    #[test]
    fn owned_sentences_borrow_as_corpus() {
        let sentences = vec!["a b".to_string(), "c".to_string()];
        let corpus = Corpus::from(&sentences);
        assert_eq!(corpus, Batch::Many(vec!["a b", "c"]));
    }

    #[test]
    fn flat_ids_are_a_single_sentence() {
        assert_eq!(IndexedCorpus::from([0, 1, 4]), Batch::Single(vec![0, 1, 4]));
        assert_eq!(
            IndexedCorpus::from(vec![vec![0], vec![1, 2]]),
            Batch::Many(vec![vec![0], vec![1, 2]])
        );
    }

    #[test]
    fn map_keeps_shape() {
        let single = Batch::Single(2).map(|x| x * 10);
        assert_eq!(single, Batch::Single(20));

        let many = Batch::Many(vec![1, 2, 3]).map(|x| x + 1);
        assert_eq!(many, Batch::Many(vec![2, 3, 4]));
    }

    #[test]
    fn try_map_stops_at_first_error() {
        let mut seen = Vec::new();
        let result: Result<Batch<i32>, i32> = Batch::Many(vec![1, -2, 3]).try_map(|x| {
            seen.push(x);
            if x < 0 { Err(x) } else { Ok(x) }
        });
        assert_eq!(result, Err(-2));
        assert_eq!(seen, vec![1, -2]);
    }

    #[test]
    fn empty_many_is_empty() {
        let corpus: Corpus = Batch::Many(Vec::new());
        assert!(corpus.is_empty());
        assert_eq!(corpus.iter().count(), 0);
    }
}
