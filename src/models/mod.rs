mod generation;
mod word;

pub use generation::{GeneratedParagraph, SentenceReply, WordEntry, WordSentences};
pub use word::{NewWord, Word, WordStatus};
