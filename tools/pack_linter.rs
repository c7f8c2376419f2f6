/// Pack Linter — validates custom vocabulary packs before use.
///
/// Usage: pack_linter <pack.json|pack.ron|dir>
///
/// Reports unknown category keys, blank terms, terms duplicated within a
/// category, and terms the base vocabulary already has.
use clap::Parser;
use kling_prompt::core::vocabulary::Vocabulary;
use kling_prompt::schema::category::Category;
use kling_prompt::schema::pack::Pack;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Debug, Parser)]
#[command(name = "pack_linter", about = "Validate custom vocabulary packs")]
struct Args {
    /// Pack file or directory of pack files
    path: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let base = Vocabulary::builtin().unwrap_or_else(|e| {
        eprintln!("ERROR: Failed to load base vocabulary: {}", e);
        process::exit(1);
    });

    let files = if args.path.is_dir() {
        collect_pack_files(&args.path)
    } else if args.path.is_file() {
        vec![args.path.clone()]
    } else {
        eprintln!("ERROR: Path '{}' does not exist", args.path.display());
        process::exit(1);
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for file in &files {
        match Pack::load_from_file(file) {
            Ok(pack) => {
                println!("  Loaded: {}", file.display());
                let (e, w) = lint_pack(&pack, &base);
                errors.extend(e.into_iter().map(|m| format!("{}: {}", file.display(), m)));
                warnings.extend(w.into_iter().map(|m| format!("{}: {}", file.display(), m)));
            }
            Err(e) => errors.push(format!("{}: {}", file.display(), e)),
        }
    }

    println!("\n=== Pack Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} files, {} errors, {} warnings",
        files.len(),
        errors.len(),
        warnings.len()
    );

    if !errors.is_empty() {
        process::exit(1);
    }
}

fn collect_pack_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            match path.extension().and_then(|s| s.to_str()) {
                Some("json") | Some("ron") => files.push(path),
                _ => {}
            }
        }
    }
    files.sort();
    files
}

/// Returns (errors, warnings) for one pack.
fn lint_pack(pack: &Pack, base: &Vocabulary) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for key in pack.unknown_keys() {
        errors.push(format!(
            "unknown category '{}' (terms would be ignored)",
            key
        ));
    }

    for (key, terms) in &pack.terms {
        let Some(category) = Category::from_key(key) else {
            continue;
        };

        let mut seen = FxHashSet::default();
        for term in terms {
            let normalized = term.trim().to_lowercase();
            if normalized.is_empty() {
                warnings.push(format!("{}: blank term", key));
                continue;
            }
            if !seen.insert(normalized.clone()) {
                warnings.push(format!("{}: duplicate term '{}'", key, term));
            } else if base.contains(category, &normalized) {
                warnings.push(format!("{}: '{}' is already in the base vocabulary", key, term));
            }
        }
    }

    (errors, warnings)
}
