use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{VocabError, VocabResult};
use crate::extract::extract_vocabulary;
use crate::llm::{SYSTEM_PROMPT, TextGenerator, build_vocabulary_prompt};
use crate::utils::pluralize;
use crate::vocabulary::{MIN_VOCABULARY_ITEMS, Theme, VocabularyDocument};

/// Runs one theme through prompt, generation and extraction.
#[derive(Clone)]
pub struct VocabularyImporter {
    generator: Arc<dyn TextGenerator>,
}

impl VocabularyImporter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// Validates the raw theme before anything is sent upstream.
    pub async fn generate(&self, raw_theme: Option<&str>) -> VocabResult<VocabularyDocument> {
        let theme = Theme::parse(raw_theme)?;
        self.generate_for(&theme).await
    }

    pub async fn generate_for(&self, theme: &Theme) -> VocabResult<VocabularyDocument> {
        info!(theme = theme.as_str(), model = self.model(), "Generating vocabulary");

        let prompt = build_vocabulary_prompt(theme);
        let reply = self
            .generator
            .generate(SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|err| VocabError::Upstream(format!("{err:#}")))?;
        debug!(reply_len = reply.len(), "Model replied");

        let document = extract_vocabulary(&reply)?;
        if !document.meets_minimum() {
            warn!(
                theme = theme.as_str(),
                "Model returned {}, expected at least {}",
                pluralize("vocabulary item", document.len()),
                MIN_VOCABULARY_ITEMS
            );
        }

        Ok(document)
    }
}
