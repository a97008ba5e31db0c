//! # t2i
//!
//! Map the tokens of a text corpus to integer indices and back.
//!
//! ```
//! use t2i::{Batch, Decoded, TokenIndex};
//!
//! let t2i = TokenIndex::build(["the cat sat", "the dog ran"]);
//! assert_eq!(t2i.index("the fox ran"), Batch::Single(vec![0, 5, 4]));
//!
//! let decoded = t2i.unindex([0, 1, 4], Some(" ")).unwrap();
//! assert_eq!(decoded, Batch::Single(Decoded::Joined("the cat ran".to_string())));
//! ```

mod base;
mod config;
mod errors;
mod token_index;

pub use base::{Batch, Corpus, Decoded, Idx, IndexedCorpus, Tokenizer};
pub use config::{DEFAULT_DELIMITER, EOS_TOKEN, TokenIndexBuilder, UNK_TOKEN};
pub use errors::{T2IError, T2IResult};
pub use token_index::TokenIndex;
