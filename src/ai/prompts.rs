//! Prompt templates. Both builders are pure: same input, same bytes out.
//!
//! The JSON blocks at the end of each prompt are the reply shapes that
//! [`crate::ai::response`] parses, so change them together.

use crate::models::Word;

pub const PARAGRAPH_JSON_CONTRACT: &str = r#"At the end of your response, output JSON with the following structure:

{
  "paragraph": "<the generated paragraph>",
  "words": [
    {
      "word": "<word>",
      "pronunciation": "<how to pronounce it in simple phonetics>",
      "meanings": ["<meaning 1>", "<meaning 2>"]
    },
    ...
  ]
}
Include only the tough or uncommon words (from the given list or naturally hard-to-pronounce words in the paragraph) in the JSON output.
Output must be plain JSON without extra text or explanation."#;

pub const SENTENCE_JSON_CONTRACT: &str = r#"Output JSON in this format:
[
  {
    "word": "<the wordID>",
    "sentences": [
      "<sentence for meaning 1>",
      "<sentence for meaning 2>",
      ...
    ]
  },
  ...
]

Output only JSON. No explanations."#;

pub fn paragraph_prompt(topic: &str, words: &[String]) -> String {
    let words_list = words.join(", ");
    format!(
        "Write a vivid and engaging paragraph (150-200 words) that naturally incorporates these vocabulary words: {words_list}.
Guidelines:
1. Use any 2-3 words once (if there are any), and fit them naturally into the context.
2. Make the paragraph educational, interesting, and conversational.
3. Ensure smooth sentence flow without sounding forced or robotic.
4. The paragraph must be suitable for both pronunciation and typing practice. Include a variety of sentence lengths and rhythms to improve user experience.

Optional Topics: {topic}
If the topics are provided, align the paragraph with it.
If not, use creative everyday scenarios like travel, introspection, or unusual events to make the writing vivid and memorable.

{PARAGRAPH_JSON_CONTRACT}
"
    )
}

/// Word ids are written as plain decimal text (`WordID: 42`); the reply must
/// echo that text back in its `word` field.
pub fn sentence_prompt(words: &[Word]) -> String {
    let mut prompt = format!(
        "For the given words, generate example sentences that cover **all their meanings** in natural and conversational language.

Guidelines:
1. For each meaning of each word, generate **one sentence**.
2. The sentences should be simple, clear, and easy to understand.
3. Do not define the word explicitly; use it naturally in the context of the sentence.
4. Do not number the sentences or mention the meanings again.
5. Try to generate new sentences every time you call this prompt.

{SENTENCE_JSON_CONTRACT}

WordIDs, Words and Meanings:
"
    );

    for word in words {
        prompt.push_str(&format!(
            "WordID: {}\nWord: {}\nMeanings: {}\n\n",
            word.id,
            word.word,
            word.meanings.join(", ")
        ));
    }

    prompt
}
