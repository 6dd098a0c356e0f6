//! Output formatting helpers for the CLI.

use std::io::IsTerminal;

use comfy_table::presets::NOTHING;
use comfy_table::{Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use sealnote_core::Note;

/// Output mode determines how results are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON output only
    Json,
    /// Plain text, stable for logs and scripts
    #[default]
    Plain,
    /// Human-friendly with colors and formatting (TTY only)
    Pretty,
}

impl OutputMode {
    /// Resolve output mode from flags and environment.
    ///
    /// `--json` wins, `--format plain` or `TERM=dumb` force plain, and pretty
    /// output is only used on a TTY.
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if format_flag == Some("plain") || term_is_dumb {
            return Self::Plain;
        }
        if is_tty {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    /// Resolve against the real stdout and TERM.
    pub fn detect(json_flag: bool, format_flag: Option<&str>) -> Self {
        let term_is_dumb = std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false);
        Self::resolve(
            json_flag,
            format_flag,
            std::io::stdout().is_terminal(),
            term_is_dumb,
        )
    }
}

/// Convert a note to JSON, including its 1-based number.
pub fn note_json(number: usize, note: &Note) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "title": note.title,
        "body": note.body,
    })
}

/// Convert a list of notes to a JSON array.
pub fn notes_json(notes: &[Note]) -> serde_json::Value {
    serde_json::Value::Array(
        notes
            .iter()
            .enumerate()
            .map(|(i, note)| note_json(i + 1, note))
            .collect(),
    )
}

/// Render the numbered list of note titles.
pub fn render_note_list(mode: OutputMode, notes: &[Note]) -> String {
    match mode {
        OutputMode::Json => notes_json(notes).to_string(),
        OutputMode::Plain => notes
            .iter()
            .enumerate()
            .map(|(i, note)| format!("{}. {}", i + 1, note.title))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputMode::Pretty => {
            let mut table = Table::new();
            table.load_preset(NOTHING);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec![Cell::new("#"), Cell::new("Title"), Cell::new("Preview")]);
            for (i, note) in notes.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(&note.title),
                    Cell::new(preview(&note.body, 40)),
                ]);
            }
            table.to_string()
        }
    }
}

/// Render a single note.
pub fn render_note(mode: OutputMode, number: usize, note: &Note) -> String {
    match mode {
        OutputMode::Json => note_json(number, note).to_string(),
        OutputMode::Plain => format!("{}\n\n{}", note.title, note.body),
        OutputMode::Pretty => format!(
            "{} {}\n\n{}",
            format!("{}.", number).dimmed(),
            note.title.bold(),
            note.body
        ),
    }
}

/// First line of `body`, shortened to `max_chars`.
pub fn preview(body: &str, max_chars: usize) -> String {
    let first_line = body.lines().next().unwrap_or_default().trim();
    if first_line.chars().count() <= max_chars {
        return first_line.to_string();
    }
    let mut shortened: String = first_line.chars().take(max_chars.saturating_sub(3)).collect();
    shortened.push_str("...");
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes() -> Vec<Note> {
        vec![Note::new("First", "alpha"), Note::new("Second", "beta\ngamma")]
    }

    #[test]
    fn test_json_exclusive() {
        let mode = OutputMode::resolve(true, Some("plain"), true, false);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn test_term_dumb_forces_plain() {
        assert_eq!(OutputMode::resolve(false, None, true, true), OutputMode::Plain);
    }

    #[test]
    fn test_tty_gets_pretty() {
        assert_eq!(OutputMode::resolve(false, None, true, false), OutputMode::Pretty);
        assert_eq!(OutputMode::resolve(false, None, false, false), OutputMode::Plain);
    }

    #[test]
    fn test_plain_list_is_numbered() {
        let rendered = render_note_list(OutputMode::Plain, &notes());
        assert_eq!(rendered, "1. First\n2. Second");
    }

    #[test]
    fn test_json_list() {
        let rendered = render_note_list(OutputMode::Json, &notes());
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[1]["number"], 2);
        assert_eq!(value[1]["body"], "beta\ngamma");
    }

    #[test]
    fn test_pretty_list_contains_titles() {
        let rendered = render_note_list(OutputMode::Pretty, &notes());
        assert!(rendered.contains("First"));
        assert!(rendered.contains("Second"));
    }

    #[test]
    fn test_plain_note() {
        let rendered = render_note(OutputMode::Plain, 1, &Note::new("T", "B"));
        assert_eq!(rendered, "T\n\nB");
    }

    #[test]
    fn test_preview_shortens() {
        assert_eq!(preview("short\nsecond line", 40), "short");
        assert_eq!(preview("abcdefghij", 6), "abc...");
        assert_eq!(preview("", 6), "");
    }
}
