/// Pipeline integration tests — end-to-end scene-to-prompt generation.
use kling_prompt::core::pipeline::{
    PipelineError, PromptPerfecter, PromptRequest, DOWNLOAD_FILE_NAME,
};
use kling_prompt::schema::options::{Brevity, ClassifierStrategy, PromptOptions, StylePreset};
use kling_prompt::schema::pack::{CustomPackSource, CustomPackStatus};
use std::path::{Path, PathBuf};

const ALARIC: &str = "Alaric stands in the glowing workshop, wearing a tattered coat, \
    clutching a brass pocketwatch. Golden lantern light, tense mood, cinematic anime style, mid-shot.";

fn engine() -> PromptPerfecter {
    PromptPerfecter::builder().build().unwrap()
}

fn scene() -> String {
    std::fs::read_to_string("tests/fixtures/scene.txt").unwrap()
}

#[test]
fn alaric_scene_default_options() {
    let request = PromptRequest::new(ALARIC).options(PromptOptions {
        max_terms_per_section: 10,
        ..PromptOptions::default()
    });
    let output = engine().perfect(&request).unwrap();

    let expected = "\
Main Character: Alaric, Golden, tattered coat
Secondary / Objects: pocketwatch, lantern
Environment / Background: workshop
Lighting & Color: golden, lantern light, glowing
Camera & Composition: mid-shot
Mood / Emotion: tense
Style & Quality: cinematic, anime, motion graphics, highly detailed, dramatic shadows, crisp lines";
    assert_eq!(output.text, expected);
    assert_eq!(output.custom_pack, CustomPackStatus::NotSupplied);
    assert!(output.notices().is_empty());
}

#[test]
fn alaric_scene_without_labels() {
    let request = PromptRequest::new(ALARIC).options(PromptOptions {
        show_labels: false,
        style_preset: StylePreset::None,
        ..PromptOptions::default()
    });
    let output = engine().perfect(&request).unwrap();
    let lines: Vec<&str> = output.text.lines().collect();
    assert_eq!(lines[0], "Alaric, Golden, tattered coat");
    assert_eq!(lines.last().copied(), Some("cinematic, anime"));
    assert!(!output.text.contains(':'));
}

#[test]
fn explicit_name_and_sheet_lead_character_line() {
    let request = PromptRequest::new("the alchemist waits in the forge at dusk")
        .character_name("Alaric")
        .character_sheet("tall, lean, messy silver hair, sharp eyes")
        .negative("blurry, low-res, extra fingers");
    let output = engine().perfect(&request).unwrap();
    let lines: Vec<&str> = output.text.lines().collect();
    assert_eq!(
        lines[0],
        "Main Character: Alaric, alchemist, tall, lean, messy silver hair, sharp eyes"
    );
    assert_eq!(
        lines.last().copied(),
        Some("Negative: blurry, low-res, extra fingers")
    );
}

#[test]
fn config_file_with_custom_pack_file() {
    let options = PromptOptions::load_from_ron(Path::new("tests/fixtures/options.ron")).unwrap();
    let request = PromptRequest::new(scene())
        .custom_pack(CustomPackSource::File(PathBuf::from(
            "tests/fixtures/custom_pack.json",
        )))
        .options(options);
    let output = engine().perfect(&request).unwrap();

    assert!(matches!(output.custom_pack, CustomPackStatus::Loaded { .. }));
    let lines: Vec<&str> = output.text.lines().collect();
    assert!(lines.contains(&"Secondary / Objects: brass pocketwatch, lantern, gears"));
    assert!(lines.contains(&"Style & Quality: noir, high contrast, film grain"));
    for line in &lines {
        let terms = line.split_once(": ").map(|(_, t)| t).unwrap_or(line);
        assert!(terms.split(", ").count() <= 3, "over cap: {}", line);
    }
}

#[test]
fn ron_custom_pack_terms_are_matched() {
    let request = PromptRequest::new("ash fall drifts over the forge, cinders everywhere")
        .custom_pack(CustomPackSource::File(PathBuf::from(
            "tests/fixtures/custom_pack.ron",
        )))
        .options(PromptOptions {
            style_preset: StylePreset::None,
            ..PromptOptions::default()
        });
    let output = engine().perfect(&request).unwrap();
    assert!(output.text.contains("Lighting & Color: ash fall"));
    assert!(output.text.contains("Style & Quality: cinders"));
}

#[test]
fn broken_custom_pack_falls_back_to_builtin() {
    let request = PromptRequest::new(ALARIC).custom_pack(CustomPackSource::File(
        PathBuf::from("tests/fixtures/broken_pack.json"),
    ));
    let output = engine().perfect(&request).unwrap();
    assert!(matches!(output.custom_pack, CustomPackStatus::Invalid { .. }));
    assert!(output.text.contains("Environment / Background: workshop"));
    assert!(output.notices()[0].contains("built-in vocabulary only"));
}

#[test]
fn empty_master_text_generates_nothing() {
    let result = engine().perfect(&PromptRequest::new(""));
    assert!(matches!(result, Err(PipelineError::EmptyInput)));
}

#[test]
fn heuristic_classifier_adds_unlisted_nouns() {
    let text = "Lys climbs through the pawnshop storeroom, past piles of blueprints.";
    let base = PromptRequest::new(text).options(PromptOptions {
        style_preset: StylePreset::None,
        ..PromptOptions::default()
    });
    let plain = engine().perfect(&base).unwrap();
    assert!(!plain.text.contains("pawnshop"));

    let heuristic = base.clone().options(PromptOptions {
        style_preset: StylePreset::None,
        classifier: ClassifierStrategy::VocabularyWithNouns,
        ..PromptOptions::default()
    });
    let output = engine().perfect(&heuristic).unwrap();
    assert!(output
        .text
        .contains("Environment / Background: pawnshop, storeroom"));
    assert!(output.text.contains("Secondary / Objects: blueprint"));
}

#[test]
fn concise_mode_strips_articles_from_literals() {
    let request = PromptRequest::new("An anime duel at dawn")
        .negative("a blurry background, the wrong hands")
        .options(PromptOptions {
            brevity: Brevity::Concise,
            style_preset: StylePreset::None,
            ..PromptOptions::default()
        });
    let output = engine().perfect(&request).unwrap();
    assert!(output.text.contains("Style & Quality: anime"));
    assert!(output.text.contains("Negative: blurry background, wrong hands"));
}

#[test]
fn identical_requests_give_identical_bytes() {
    let request = PromptRequest::new(scene()).options(PromptOptions {
        classifier: ClassifierStrategy::VocabularyWithNouns,
        max_terms_per_section: 0,
        ..PromptOptions::default()
    });
    let engine = engine();
    let first = engine.perfect(&request).unwrap().text;
    for _ in 0..5 {
        assert_eq!(engine.perfect(&request).unwrap().text, first);
    }
}

#[test]
fn download_file_written() {
    let dir = tempfile::tempdir().unwrap();
    let output = engine().perfect(&PromptRequest::new(ALARIC)).unwrap();
    let path = output.write_download(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), DOWNLOAD_FILE_NAME);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), output.text);
}

#[test]
fn sketch_vocabulary_matches_under_both_strategies() {
    let text = "An eerie courtyard below the clocktower; a courier with a satchel, \
        braided hair and a locket, pov shot, gritty, film grain.";
    for classifier in [
        ClassifierStrategy::Vocabulary,
        ClassifierStrategy::VocabularyWithNouns,
    ] {
        let request = PromptRequest::new(text).options(PromptOptions {
            style_preset: StylePreset::None,
            classifier,
            ..PromptOptions::default()
        });
        let output = engine().perfect(&request).unwrap();
        let expected = "\
Main Character: An, courier, braided hair, satchel
Secondary / Objects: locket
Environment / Background: clocktower, courtyard
Camera & Composition: pov
Mood / Emotion: gritty, eerie
Style & Quality: film grain";
        assert_eq!(output.text, expected, "{:?}", classifier);
    }
}

#[test]
fn vocabulary_and_extra_pack_files_replace_builtin_base() {
    let engine = PromptPerfecter::builder()
        .vocabulary_file("tests/fixtures/base_vocabulary.ron")
        .extra_pack_file("tests/fixtures/custom_pack.ron")
        .build()
        .unwrap();
    let request = PromptRequest::new("uneasy ash fall over the bell foundry, tense workshop")
        .options(PromptOptions {
            style_preset: StylePreset::None,
            ..PromptOptions::default()
        });
    let output = engine.perfect(&request).unwrap();
    assert_eq!(
        output.text,
        "Environment / Background: bell foundry\nLighting & Color: ash fall\nMood / Emotion: uneasy"
    );
}

#[test]
fn missing_vocabulary_file_fails_build() {
    let result = PromptPerfecter::builder()
        .vocabulary_file("tests/fixtures/does_not_exist.ron")
        .build();
    assert!(matches!(result, Err(PipelineError::Vocabulary(_))));

    let result = PromptPerfecter::builder()
        .extra_pack_file("tests/fixtures/broken_pack.json")
        .build();
    assert!(matches!(result, Err(PipelineError::Pack(_))));
}
