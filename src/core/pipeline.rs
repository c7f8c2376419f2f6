/// The main prompt pipeline: scene text → structured prompt.
///
/// Wires together registry derivation, bucketing, section composition and
/// formatting.
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::classifier::{classify, Buckets};
use crate::core::composer::{compose, ComposeInput, Section};
use crate::core::formatter::format;
use crate::core::vocabulary::{PackLibrary, PresetLibrary, Vocabulary, VocabularyError};
use crate::schema::options::{OptionsError, PromptOptions};
use crate::schema::pack::{CustomPackSource, CustomPackStatus, Pack, PackError};

/// File name offered for the downloadable prompt.
pub const DOWNLOAD_FILE_NAME: &str = "kling_prompt.txt";
/// Content type of the downloadable prompt.
pub const DOWNLOAD_CONTENT_TYPE: &str = "text/plain";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("master scene description is empty")]
    EmptyInput,
    #[error("vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),
    #[error("options error: {0}")]
    Options(#[from] OptionsError),
    #[error("pack error: {0}")]
    Pack(#[from] PackError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything one invocation needs from the caller.
#[derive(Debug, Clone, Default)]
pub struct PromptRequest {
    pub master_text: String,
    pub character_name: Option<String>,
    pub character_sheet: Option<String>,
    pub negative: Option<String>,
    pub custom_pack: CustomPackSource,
    pub options: PromptOptions,
}

impl PromptRequest {
    pub fn new(master_text: impl Into<String>) -> Self {
        Self {
            master_text: master_text.into(),
            ..Self::default()
        }
    }

    pub fn character_name(mut self, name: impl Into<String>) -> Self {
        self.character_name = Some(name.into());
        self
    }

    pub fn character_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.character_sheet = Some(sheet.into());
        self
    }

    pub fn negative(mut self, negative: impl Into<String>) -> Self {
        self.negative = Some(negative.into());
        self
    }

    pub fn custom_pack(mut self, source: CustomPackSource) -> Self {
        self.custom_pack = source;
        self
    }

    pub fn options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }
}

/// The result of one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct PromptOutput {
    pub text: String,
    pub sections: Vec<Section>,
    pub custom_pack: CustomPackStatus,
}

impl PromptOutput {
    /// User-facing notices about how the request was handled.
    pub fn notices(&self) -> Vec<String> {
        match &self.custom_pack {
            CustomPackStatus::NotSupplied => Vec::new(),
            CustomPackStatus::Loaded { source } => {
                vec![format!("Custom pack loaded from {}.", source)]
            }
            CustomPackStatus::Invalid { reason } => vec![format!(
                "Custom pack ignored ({}); using built-in vocabulary only.",
                reason
            )],
        }
    }

    /// Write the prompt text to `dir/kling_prompt.txt` and return the path.
    pub fn write_download(&self, dir: &Path) -> Result<PathBuf, PipelineError> {
        let path = dir.join(DOWNLOAD_FILE_NAME);
        std::fs::write(&path, &self.text)?;
        Ok(path)
    }
}

/// The prompt engine. Built via `PromptPerfecter::builder()`.
///
/// Holds immutable base data. Each call to [`perfect`](Self::perfect)
/// derives its own vocabulary (base ∪ story pack ∪ custom pack), so one
/// engine can be shared between callers.
#[derive(Debug, Clone)]
pub struct PromptPerfecter {
    base: Vocabulary,
    packs: PackLibrary,
    presets: PresetLibrary,
}

/// Builder for constructing a `PromptPerfecter`.
pub struct PromptPerfecterBuilder {
    vocabulary_path: Option<PathBuf>,
    extra_pack_path: Option<PathBuf>,
    /// Directly provided vocabulary (for testing without files).
    vocabulary: Option<Vocabulary>,
    /// Directly provided pack library (for testing without files).
    packs: Option<PackLibrary>,
    /// Directly provided presets (for testing without files).
    presets: Option<PresetLibrary>,
}

impl PromptPerfecter {
    pub fn builder() -> PromptPerfecterBuilder {
        PromptPerfecterBuilder {
            vocabulary_path: None,
            extra_pack_path: None,
            vocabulary: None,
            packs: None,
            presets: None,
        }
    }

    /// The base vocabulary before any pack is merged.
    pub fn base_vocabulary(&self) -> &Vocabulary {
        &self.base
    }

    /// The vocabulary a request will match against, plus the custom pack status.
    pub fn derive_vocabulary(&self, request: &PromptRequest) -> (Vocabulary, CustomPackStatus) {
        let mut vocab = self.base.clone();

        match self.packs.get(request.options.pack) {
            Some(pack) => {
                let added = vocab.merge_pack(pack);
                log::debug!("story pack '{}' added {} terms", request.options.pack.id(), added);
            }
            None => log::debug!("story pack '{}' has no data", request.options.pack.id()),
        }

        let (custom, status) = request.custom_pack.resolve();
        let added = vocab.merge_pack(&custom);
        if added > 0 {
            log::debug!("custom pack added {} terms", added);
        }

        (vocab, status)
    }

    /// Turn a scene description into a structured prompt.
    pub fn perfect(&self, request: &PromptRequest) -> Result<PromptOutput, PipelineError> {
        if request.master_text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let options = &request.options;

        // 1. Per-invocation vocabulary
        let (vocab, custom_pack) = self.derive_vocabulary(request);

        // 2. Bucket the scene text
        let buckets: Buckets = classify(
            &request.master_text,
            &vocab,
            request.character_name.as_deref(),
            options.classifier,
        );

        // 3. Compose sections
        let input = ComposeInput {
            character_sheet: request.character_sheet.as_deref(),
            negative: request.negative.as_deref(),
            preset_terms: self.presets.terms(options.style_preset),
        };
        let sections = compose(&buckets, options, input);

        // 4. Format
        let text = format(&sections, options.brevity, options.show_labels);

        log::info!(
            "composed {} sections ({} chars) from {} chars of scene text",
            sections.len(),
            text.len(),
            request.master_text.len()
        );

        Ok(PromptOutput {
            text,
            sections,
            custom_pack,
        })
    }
}

impl PromptPerfecterBuilder {
    /// Replace the built-in base vocabulary with a RON file.
    pub fn vocabulary_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.vocabulary_path = Some(path.into());
        self
    }

    /// Merge a pack file (JSON, or RON by extension) into the base
    /// vocabulary of every request.
    pub fn extra_pack_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.extra_pack_path = Some(path.into());
        self
    }

    /// Provide a vocabulary directly (for testing without files).
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Provide story packs directly (for testing without files).
    pub fn with_packs(mut self, packs: PackLibrary) -> Self {
        self.packs = Some(packs);
        self
    }

    /// Provide style presets directly (for testing without files).
    pub fn with_presets(mut self, presets: PresetLibrary) -> Self {
        self.presets = Some(presets);
        self
    }

    pub fn build(self) -> Result<PromptPerfecter, PipelineError> {
        let mut base = match (self.vocabulary, &self.vocabulary_path) {
            (Some(vocab), _) => vocab,
            (None, Some(path)) => Vocabulary::load_from_ron(path)?,
            (None, None) => Vocabulary::builtin()?,
        };

        if let Some(ref path) = self.extra_pack_path {
            let pack = Pack::load_from_file(path)?;
            let added = base.merge_pack(&pack);
            log::debug!("extra pack {} added {} terms", path.display(), added);
        }

        let packs = match self.packs {
            Some(packs) => packs,
            None => PackLibrary::builtin()?,
        };
        let presets = match self.presets {
            Some(presets) => presets,
            None => PresetLibrary::builtin()?,
        };

        Ok(PromptPerfecter {
            base,
            packs,
            presets,
        })
    }
}
