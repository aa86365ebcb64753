//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::Local;
use serde::Serialize;

use diario_core::photo;
use diario_core::{Category, Gallery, Note, Stats};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single note in full
    pub fn print_note(&self, note: &Note) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", note.id());
                println!(
                    "Author:    {} {}",
                    note.author().emoji(),
                    note.author().name()
                );
                println!("Category:  {}", note.category().label());
                println!(
                    "Written:   {}",
                    note.created_at()
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M")
                );
                if let Some(url) = note.photo() {
                    println!("Photo:     {}", describe_image(url));
                }
                println!("Reactions: {}", reaction_summary(note));
                if !note.text().is_empty() {
                    println!();
                    println!("{}", note.text());
                }
            }
            OutputFormat::Json => print_json(note),
            OutputFormat::Quiet => println!("{}", note.id()),
        }
    }

    /// Print the timeline
    pub fn print_notes(&self, notes: &[&Note]) {
        match self.format {
            OutputFormat::Human => {
                if notes.is_empty() {
                    println!("No notes here yet. Write the first one! 💛");
                    return;
                }
                for note in notes {
                    let preview = if note.text().is_empty() {
                        "(photo)".to_string()
                    } else {
                        truncate_line(note.text(), 40)
                    };
                    let photo_marker = if note.has_photo() && !note.text().is_empty() {
                        " 📷"
                    } else {
                        ""
                    };
                    println!(
                        "{} | {} {:<4} | {:<18} | {} | {}{}",
                        short_id(note),
                        note.author().emoji(),
                        note.author().name(),
                        note.category().label(),
                        note.created_at()
                            .with_timezone(&Local)
                            .format("%Y-%m-%d %H:%M"),
                        preview,
                        photo_marker
                    );
                    if note.reactions().total() > 0 {
                        println!("         {}", reaction_summary(note));
                    }
                }
                println!("\n{} note(s)", notes.len());
            }
            OutputFormat::Json => print_json(notes),
            OutputFormat::Quiet => {
                for note in notes {
                    println!("{}", note.id());
                }
            }
        }
    }

    /// Print the cover gallery
    pub fn print_gallery(&self, gallery: &Gallery) {
        match self.format {
            OutputFormat::Human => {
                if gallery.is_empty() {
                    println!("No cover photos yet. Add your favourites with `diario gallery add`.");
                    return;
                }
                for (i, image) in gallery.images().iter().enumerate() {
                    let marker = if i == 0 { "★" } else { " " };
                    println!("{} {:>2}. {}", marker, i + 1, describe_image(image));
                }
                println!("\n{} photo(s)", gallery.len());
            }
            OutputFormat::Json => print_json(gallery),
            OutputFormat::Quiet => println!("{}", gallery.len()),
        }
    }

    /// Print aggregate counts
    pub fn print_stats(&self, stats: &Stats) {
        match self.format {
            OutputFormat::Human => {
                println!("{} note(s) in total", stats.total);
                println!("{} reaction(s) in total", stats.reactions_total);
                println!();
                println!("By category:");
                for category in Category::ALL {
                    println!(
                        "  {:<20} {}",
                        category.label(),
                        stats.count_for(category)
                    );
                }
            }
            OutputFormat::Json => print_json(stats),
            OutputFormat::Quiet => println!("{}", stats.total),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode output: {}", e),
    }
}

/// First 8 characters of a note ID
pub fn short_id(note: &Note) -> String {
    note.id().to_string()[..8].to_string()
}

/// Reaction counters as `❤️ 2  ⭐️ 0 ...`
fn reaction_summary(note: &Note) -> String {
    note.reactions()
        .iter()
        .map(|(kind, count)| format!("{} {}", kind.emoji(), count))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Short description of an inline image
fn describe_image(data_url: &str) -> String {
    match photo::decode(data_url) {
        Ok((mime, bytes)) => format!("{} ({})", mime, human_size(bytes.len())),
        Err(_) => "(unrecognized image)".to_string(),
    }
}

fn human_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Truncate a string to `max_chars` characters, adding "..." if truncated
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_chars: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diario_core::{Profile, ReactionKind};

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        // Multi-byte characters are never split
        assert_eq!(truncate("cariñitos cariñitos", 8), "cariñ...");
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("single line", 20), "single line");
        assert_eq!(truncate_line("line one\nline two", 20), "line one");
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_describe_image() {
        assert_eq!(
            describe_image("data:image/png;base64,aGk="),
            "image/png (2 B)"
        );
        assert_eq!(describe_image("garbage"), "(unrecognized image)");
    }

    #[test]
    fn test_reaction_summary() {
        let note = Note::new(Profile::Mj, Category::Favores, "x", None).unwrap();
        let summary = reaction_summary(&note);
        assert!(summary.starts_with(ReactionKind::Heart.emoji()));
        assert_eq!(summary.matches(" 0").count(), 4);
    }

    #[test]
    fn test_short_id() {
        let note = Note::new(Profile::Luis, Category::Favores, "x", None).unwrap();
        assert_eq!(short_id(&note).len(), 8);
        assert!(note.id().to_string().starts_with(&short_id(&note)));
    }
}
