/// Vocabulary and matching integration tests.
use kling_prompt::core::matcher::{contains_bounded, find_terms};
use kling_prompt::core::vocabulary::{PackLibrary, Vocabulary};
use kling_prompt::schema::category::Category;
use kling_prompt::schema::pack::{Pack, StoryPack};
use rustc_hash::FxHashSet;

const SAMPLES: &[&str] = &[
    "Alaric stands in the glowing workshop, wearing a tattered coat, clutching a brass pocketwatch.",
    "An extreme close-up of a netrunner in a rain-soaked alley, neon glow, magenta and cyan.",
    "Wide shot: the knight rides through the enchanted forest at dawn; fog, god rays, epic mood.",
    "CANDLELIGHT flickers over the crypt. A vampire in a Victorian dress. Low key, dutch angle.",
    "cogwheels, gearbox, lamplight, spellbooks, starlighting",
];

#[test]
fn matches_are_present_and_unique_for_every_pack() {
    let base = Vocabulary::builtin().unwrap();
    let packs = PackLibrary::builtin().unwrap();

    for id in StoryPack::ALL {
        let vocab = base.with_pack(packs.get(id).unwrap());
        for text in SAMPLES {
            let haystack = text.to_lowercase();
            for category in Category::ALL {
                let found = vocab.find(text, category);
                let mut seen = FxHashSet::default();
                for term in &found {
                    assert!(
                        contains_bounded(&haystack, term),
                        "{:?}/{:?}: '{}' not in '{}'",
                        id,
                        category,
                        term,
                        text
                    );
                    assert!(seen.insert(term.to_lowercase()), "duplicate '{}'", term);
                }
            }
        }
    }
}

#[test]
fn partial_words_never_match() {
    let vocab = Vocabulary::builtin().unwrap();
    let text = SAMPLES[4];
    assert!(vocab.find(text, Category::Objects).is_empty());
    assert!(vocab.find(text, Category::Lighting).is_empty());
}

#[test]
fn extreme_close_up_only() {
    assert_eq!(
        find_terms("an extreme close-up", ["close-up", "extreme close-up"]),
        vec!["extreme close-up"]
    );
}

#[test]
fn builtin_camera_vocabulary_prefers_longest() {
    let vocab = Vocabulary::builtin().unwrap();
    let found = vocab.find(SAMPLES[1], Category::Camera);
    assert_eq!(found, vec!["extreme close-up"]);
}

#[test]
fn pack_merge_twice_matches_like_once() {
    let base = Vocabulary::builtin().unwrap();
    let packs = PackLibrary::builtin().unwrap();

    for id in StoryPack::ALL {
        let pack = packs.get(id).unwrap();
        let once = base.with_pack(pack);
        let twice = once.with_pack(pack);
        assert_eq!(once, twice, "{:?} not idempotent", id);
        for text in SAMPLES {
            for category in Category::ALL {
                assert_eq!(once.find(text, category), twice.find(text, category));
            }
        }
    }
}

#[test]
fn builtin_packs_use_known_categories() {
    let packs = PackLibrary::builtin().unwrap();
    assert_eq!(packs.len(), StoryPack::ALL.len());
    for id in StoryPack::ALL {
        let pack = packs.get(id).unwrap();
        assert!(pack.unknown_keys().is_empty(), "{:?} has unknown keys", id);
    }
}

#[test]
fn pack_merge_only_adds() {
    let base = Vocabulary::builtin().unwrap();
    let pack = Pack::parse_json(r#"{"MOOD": ["tense", "uneasy"], "EFFECTS": []}"#).unwrap();
    let derived = base.with_pack(&pack);
    for category in Category::ALL {
        for term in base.terms(category) {
            assert!(derived.contains(category, term));
        }
    }
    assert_eq!(derived.len(Category::Mood), base.len(Category::Mood) + 1);
}
