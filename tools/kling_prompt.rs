/// Kling Prompt — command-line front end for the prompt pipeline.
///
/// Usage: kling_prompt [--input <scene.txt>] [--pack <id>] [--preset <id>] [--brevity <mode>] ...
///
/// Reads the master scene description from `--input` or stdin and prints
/// the structured prompt. `--download <dir>` also writes it to
/// `<dir>/kling_prompt.txt`.
use clap::{Parser, ValueEnum};
use kling_prompt::core::pipeline::{PipelineError, PromptPerfecter, PromptRequest};
use kling_prompt::schema::options::{
    Brevity, ClassifierStrategy, PromptOptions, SheetPlacement, StylePreset,
};
use kling_prompt::schema::pack::{CustomPackSource, StoryPack};
use std::io::Read;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClassifierArg {
    Vocabulary,
    Nouns,
}

#[derive(Debug, Parser)]
#[command(name = "kling_prompt", about = "Compress a cinematic scene into a Kling-ready prompt")]
struct Args {
    /// Scene description file; stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Options file (RON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base vocabulary file (RON) replacing the built-in one
    #[arg(long, value_name = "BASE_RON")]
    vocabulary: Option<PathBuf>,

    /// Pack file merged into the base vocabulary for every prompt
    #[arg(long, value_name = "PACK")]
    extra_pack: Option<PathBuf>,

    /// Main character name
    #[arg(long)]
    name: Option<String>,

    /// Character sheet traits, passed through verbatim
    #[arg(long)]
    sheet: Option<String>,

    /// Emit the character sheet as its own reference line
    #[arg(long)]
    sheet_line: bool,

    /// Negative prompt, passed through verbatim
    #[arg(long)]
    negative: Option<String>,

    /// Story pack id (see --list-packs)
    #[arg(long)]
    pack: Option<String>,

    /// Custom pack file (JSON, or RON by extension)
    #[arg(long, conflicts_with = "pack_json")]
    pack_file: Option<PathBuf>,

    /// Custom pack as inline JSON
    #[arg(long)]
    pack_json: Option<String>,

    /// Style preset id (see --list-presets)
    #[arg(long)]
    preset: Option<String>,

    #[arg(long, value_enum)]
    brevity: Option<Brevity>,

    /// Omit section labels
    #[arg(long)]
    no_labels: bool,

    /// Max terms per section; 0 = unlimited
    #[arg(long)]
    max_terms: Option<usize>,

    #[arg(long, value_enum)]
    classifier: Option<ClassifierArg>,

    /// Append generic quality cues
    #[arg(long)]
    quality_anchors: bool,

    /// Also write the prompt to <DIR>/kling_prompt.txt
    #[arg(long, value_name = "DIR")]
    download: Option<PathBuf>,

    /// List story packs and exit
    #[arg(long)]
    list_packs: bool,

    /// List style presets and exit
    #[arg(long)]
    list_presets: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.list_packs {
        for pack in StoryPack::ALL {
            println!("{:<22} {}", pack.id(), pack.label());
        }
        return;
    }
    if args.list_presets {
        for preset in StylePreset::ALL {
            println!("{:<22} {}", preset.id(), preset.label());
        }
        return;
    }

    let options = build_options(&args);
    let master_text = read_master_text(&args);

    let custom_pack = match (&args.pack_file, &args.pack_json) {
        (Some(path), _) => CustomPackSource::File(path.clone()),
        (None, Some(json)) => CustomPackSource::Pasted(json.clone()),
        (None, None) => CustomPackSource::None,
    };

    let mut request = PromptRequest::new(master_text)
        .custom_pack(custom_pack)
        .options(options);
    request.character_name = args.name.clone();
    request.character_sheet = args.sheet.clone();
    request.negative = args.negative.clone();

    let mut builder = PromptPerfecter::builder();
    if let Some(ref path) = args.vocabulary {
        builder = builder.vocabulary_file(path);
    }
    if let Some(ref path) = args.extra_pack {
        builder = builder.extra_pack_file(path);
    }
    let engine = builder.build().unwrap_or_else(|e| {
        eprintln!("ERROR: Failed to load vocabulary: {}", e);
        process::exit(1);
    });

    let output = match engine.perfect(&request) {
        Ok(output) => output,
        Err(PipelineError::EmptyInput) => {
            eprintln!("WARNING: Please provide a master scene description.");
            process::exit(2);
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    for notice in output.notices() {
        eprintln!("NOTE: {}", notice);
    }

    println!("{}", output.text);

    if let Some(ref dir) = args.download {
        match output.write_download(dir) {
            Ok(path) => eprintln!("Saved {}", path.display()),
            Err(e) => {
                eprintln!("ERROR: Failed to write download file: {}", e);
                process::exit(1);
            }
        }
    }
}

fn build_options(args: &Args) -> PromptOptions {
    let mut options = match args.config {
        Some(ref path) => PromptOptions::load_from_ron(path).unwrap_or_else(|e| {
            eprintln!("ERROR: Failed to load config '{}': {}", path.display(), e);
            process::exit(1);
        }),
        None => PromptOptions::default(),
    };

    if let Some(ref id) = args.pack {
        options.pack = StoryPack::from_id(id).unwrap_or_else(|| {
            eprintln!("ERROR: Unknown story pack '{}' (try --list-packs)", id);
            process::exit(1);
        });
    }
    // Unknown presets fall back to no preset terms
    if let Some(ref id) = args.preset {
        options.style_preset = StylePreset::from_id(id).unwrap_or_else(|| {
            eprintln!("WARNING: Unknown style preset '{}', using none", id);
            StylePreset::None
        });
    }
    if let Some(brevity) = args.brevity {
        options.brevity = brevity;
    }
    if let Some(classifier) = args.classifier {
        options.classifier = match classifier {
            ClassifierArg::Vocabulary => ClassifierStrategy::Vocabulary,
            ClassifierArg::Nouns => ClassifierStrategy::VocabularyWithNouns,
        };
    }
    if let Some(max) = args.max_terms {
        options.max_terms_per_section = max;
    }
    if args.no_labels {
        options.show_labels = false;
    }
    if args.sheet_line {
        options.sheet_placement = SheetPlacement::ReferenceLine;
    }
    if args.quality_anchors {
        options.quality_anchors = true;
    }

    options
}

fn read_master_text(args: &Args) -> String {
    match args.input {
        Some(ref path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("ERROR: Failed to read '{}': {}", path.display(), e);
            process::exit(1);
        }),
        None => {
            let mut text = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut text) {
                eprintln!("ERROR: Failed to read stdin: {}", e);
                process::exit(1);
            }
            text
        }
    }
}
