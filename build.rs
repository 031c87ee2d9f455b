//! Build script to generate the embedded theme bank
//!
//! Reads every `data/themes/*.tsv` file and generates Rust source with one
//! `RawTheme` per file.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const THEME_DIR: &str = "data/themes";

struct ParsedTheme {
    name: String,
    topics: Vec<String>,
    entries: Vec<(String, String)>,
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    let mut files: Vec<PathBuf> = fs::read_dir(THEME_DIR)
        .unwrap_or_else(|e| panic!("Failed to read {THEME_DIR}: {e}"))
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "tsv"))
        .collect();
    files.sort();

    let themes: Vec<ParsedTheme> = files.iter().map(|path| parse_theme_file(path)).collect();
    generate_theme_bank(&themes, &Path::new(&out_dir).join("themes.rs"));

    // Rebuild if theme lists change
    println!("cargo:rerun-if-changed={THEME_DIR}");
    for path in &files {
        println!("cargo:rerun-if-changed={}", path.display());
    }
}

fn parse_theme_file(path: &Path) -> ParsedTheme {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    let mut theme = ParsedTheme {
        name: path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        topics: Vec::new(),
        entries: Vec::new(),
    };

    for line in content.lines() {
        let line = line.trim();
        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if let Some(name) = comment.strip_prefix("name:") {
                theme.name = name.trim().to_string();
            } else if let Some(topics) = comment.strip_prefix("topics:") {
                theme.topics = topics
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
            }
        } else if let Some((word, clue)) = line.split_once('\t') {
            theme.entries.push((word.trim().to_string(), clue.trim().to_string()));
        }
    }

    theme
}

fn generate_theme_bank(themes: &[ParsedTheme], output_path: &Path) {
    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    let total: usize = themes.iter().map(|t| t.entries.len()).sum();

    writeln!(output, "// Generated theme bank").unwrap();
    writeln!(output, "//").unwrap();
    writeln!(output, "// {} themes, {total} entries", themes.len()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Built-in themes ({} themes, {total} entries)", themes.len()).unwrap();
    writeln!(output, "const THEME_BANK: &[RawTheme] = &[").unwrap();

    for theme in themes {
        writeln!(output, "    RawTheme {{").unwrap();
        writeln!(output, "        name: {:?},", theme.name).unwrap();
        writeln!(output, "        topics: &{:?},", theme.topics).unwrap();
        writeln!(output, "        entries: &[").unwrap();
        for (word, clue) in &theme.entries {
            writeln!(output, "            ({word:?}, {clue:?}),").unwrap();
        }
        writeln!(output, "        ],").unwrap();
        writeln!(output, "    }},").unwrap();
    }

    writeln!(output, "];").unwrap();
}
