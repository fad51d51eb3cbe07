pub mod lexical;
pub mod semantic;

pub use lexical::LexicalIndex;
pub use semantic::{EmbeddingOutcome, EmbeddingRetriever};
