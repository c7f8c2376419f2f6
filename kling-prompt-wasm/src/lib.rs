//! WASM bindings for kling-prompt — powers the browser front end.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use kling_prompt::core::composer::Section;
use kling_prompt::core::pipeline::{
    PipelineError, PromptPerfecter, PromptRequest, DOWNLOAD_CONTENT_TYPE, DOWNLOAD_FILE_NAME,
};
use kling_prompt::schema::options::{Brevity, PromptOptions, StylePreset};
use kling_prompt::schema::pack::{CustomPackSource, CustomPackStatus, StoryPack};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(Deserialize)]
struct RequestInput {
    master_text: String,
    #[serde(default)]
    character_name: Option<String>,
    #[serde(default)]
    character_sheet: Option<String>,
    #[serde(default)]
    negative: Option<String>,
    /// Pasted or uploaded custom pack, as JSON text.
    #[serde(default)]
    custom_pack: Option<String>,
    #[serde(default)]
    options: PromptOptions,
}

#[derive(Serialize)]
struct DownloadInfo {
    file_name: &'static str,
    content_type: &'static str,
}

#[derive(Serialize)]
struct PromptResponse {
    text: String,
    sections: Vec<Section>,
    custom_pack: CustomPackStatus,
    notices: Vec<String>,
    download: DownloadInfo,
}

#[derive(Serialize)]
struct ChoiceInfo {
    id: &'static str,
    label: &'static str,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn build_request(input: RequestInput) -> PromptRequest {
    let custom_pack = match input.custom_pack {
        Some(json) => CustomPackSource::Pasted(json),
        None => CustomPackSource::None,
    };
    PromptRequest {
        master_text: input.master_text,
        character_name: input.character_name,
        character_sheet: input.character_sheet,
        negative: input.negative,
        custom_pack,
        options: input.options,
    }
}

fn perfect_json(engine: &PromptPerfecter, request_json: &str) -> Result<String, String> {
    let input: RequestInput =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid request JSON: {e}"))?;
    let request = build_request(input);

    let output = engine.perfect(&request).map_err(|e| match e {
        PipelineError::EmptyInput => "Please paste your master scene description.".to_string(),
        other => format!("Prompt error: {other}"),
    })?;

    let response = PromptResponse {
        notices: output.notices(),
        text: output.text,
        sections: output.sections,
        custom_pack: output.custom_pack,
        download: DownloadInfo {
            file_name: DOWNLOAD_FILE_NAME,
            content_type: DOWNLOAD_CONTENT_TYPE,
        },
    };
    serde_json::to_string(&response).map_err(|e| format!("Serialization error: {e}"))
}

fn story_packs_json() -> String {
    let packs: Vec<ChoiceInfo> = StoryPack::ALL
        .iter()
        .map(|p| ChoiceInfo {
            id: p.id(),
            label: p.label(),
        })
        .collect();
    serde_json::to_string(&packs).unwrap_or_else(|_| "[]".to_string())
}

fn style_presets_json() -> String {
    let presets: Vec<ChoiceInfo> = StylePreset::ALL
        .iter()
        .map(|p| ChoiceInfo {
            id: p.id(),
            label: p.label(),
        })
        .collect();
    serde_json::to_string(&presets).unwrap_or_else(|_| "[]".to_string())
}

fn brevity_modes_json() -> String {
    serde_json::to_string(&Brevity::ALL).unwrap_or_else(|_| "[]".to_string())
}

// ---------------------------------------------------------------------------
// PromptStudio — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct PromptStudio {
    engine: PromptPerfecter,
}

#[wasm_bindgen]
impl PromptStudio {
    /// Create a studio backed by the built-in vocabulary, packs and presets.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PromptStudio, JsError> {
        let engine = PromptPerfecter::builder()
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(PromptStudio { engine })
    }

    /// Perfect a prompt described by a JSON string.
    ///
    /// Expected JSON shape:
    /// ```json
    /// {
    ///   "master_text": "Alaric stands in the glowing workshop...",
    ///   "character_name": "Alaric",
    ///   "character_sheet": "tall, lean, messy silver hair",
    ///   "negative": "blurry, low-res",
    ///   "custom_pack": "{\"OBJECTS\": [\"brass key\"]}",
    ///   "options": { "pack": "clockwork_alchemist", "brevity": "concise" }
    /// }
    /// ```
    pub fn perfect(&self, request_json: &str) -> Result<String, JsError> {
        perfect_json(&self.engine, request_json).map_err(|e| JsError::new(&e))
    }

    /// Return JSON array of story packs (`id`, `label`).
    pub fn story_packs() -> String {
        story_packs_json()
    }

    /// Return JSON array of style presets (`id`, `label`).
    pub fn style_presets() -> String {
        style_presets_json()
    }

    /// Return JSON array of brevity modes.
    pub fn brevity_modes() -> String {
        brevity_modes_json()
    }

    /// Return the default options as JSON.
    pub fn default_options() -> String {
        serde_json::to_string(&PromptOptions::default()).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PromptPerfecter {
        PromptPerfecter::builder().build().unwrap()
    }

    #[test]
    fn perfect_round_trips_json() {
        let json = perfect_json(
            &engine(),
            r#"{"master_text": "A tense night in the harbor.", "options": {"style_preset": "none"}}"#,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let text = value["text"].as_str().unwrap();
        assert!(text.contains("Environment / Background: harbor"));
        assert!(text.contains("Mood / Emotion: tense"));
        assert_eq!(value["custom_pack"]["status"], "not_supplied");
        assert_eq!(value["download"]["file_name"], "kling_prompt.txt");
    }

    #[test]
    fn invalid_custom_pack_is_reported_not_fatal() {
        let json = perfect_json(
            &engine(),
            r#"{"master_text": "A tense night.", "custom_pack": "{broken"}"#,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["custom_pack"]["status"], "invalid");
        assert_eq!(value["notices"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_master_text_is_a_warning() {
        let err = perfect_json(&engine(), r#"{"master_text": "   "}"#).unwrap_err();
        assert!(err.contains("master scene description"));
    }

    #[test]
    fn bad_request_json() {
        assert!(perfect_json(&engine(), "{").is_err());
    }

    #[test]
    fn choice_lists() {
        let packs: serde_json::Value = serde_json::from_str(&story_packs_json()).unwrap();
        assert_eq!(packs.as_array().unwrap().len(), StoryPack::ALL.len());
        assert_eq!(packs[0]["id"], "general");

        let presets: serde_json::Value = serde_json::from_str(&style_presets_json()).unwrap();
        assert_eq!(presets.as_array().unwrap().len(), StylePreset::ALL.len());

        assert_eq!(brevity_modes_json(), r#"["concise","standard","verbose"]"#);
    }
}
