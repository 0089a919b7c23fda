use crate::vocabulary::{MIN_VOCABULARY_ITEMS, Theme};

pub const SYSTEM_PROMPT: &str = r#"
You are a Japanese teacher who writes vocabulary lists for students.
You answer with a single JSON document and nothing else.
"#;

const EXPECTED_SHAPE: &str = r#"
{
  "vocabulary": [
    {
      "kanji": "食べる",
      "romaji": "taberu",
      "english": "eat",
      "parts": [
        {
          "kanji": "食",
          "romaji": "ta"
        },
        {
          "kanji": "べる",
          "romaji": "beru"
        }
      ]
    }
  ]
}
"#;

const BAD_EXAMPLE: &str = r#"
{
  "kanji": "晴れ",
  "romaji": "hare",
  "english": "sunny",
  "parts": [
    {
      "kanji": "晴",
      "romaji": ["seki", "haru"]
    },
    ...
  ]
  ...
}
"#;

pub fn build_vocabulary_prompt(theme: &Theme) -> String {
    format!(
        "Generate a structured JSON output for Japanese vocabulary related to the theme \"{theme}\".\n\
         The output should be an array of vocabulary items, each containing kanji, romaji, english translation, \
         and parts (individual kanji/kana components).\n\
         Ensure the output is valid JSON that can be parsed directly and follows this structure:\n\
         {EXPECTED_SHAPE}\n\
         The romaji of each part must be the sound that specific kanji or kana fragment has inside this word. \
         Never list alternative readings.\n\
         Here is an example of bad output:\n\
         {BAD_EXAMPLE}\n\
         This is bad because the romaji of the part does not represent the word. \
         Instead of listing seki and haru, it should just say \"ha\" because that is what 晴 represents in 晴れ.\n\n\
         Generate at least {MIN_VOCABULARY_ITEMS} vocabulary items related to the given theme.\n\
         Do not send any other information. Return only raw JSON and nothing else.",
        theme = theme.as_str(),
    )
}
