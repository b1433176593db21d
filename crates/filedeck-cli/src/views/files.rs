use std::io::{self, Write};

use colored::Colorize;
use filedeck_core::files::{FileRecord, StoreError};
use filedeck_core::router::Location;
use serde_json::Value;

use crate::app::AppContext;

/// Longest field value shown in a preview before it is elided.
const PREVIEW_VALUE_LIMIT: usize = 72;

pub fn file_list(out: &mut dyn Write, ctx: &AppContext) -> io::Result<()> {
    writeln!(out, "{}", "Files".bright_magenta().bold())?;

    if let Some(error) = ctx.files.error() {
        render_store_error(out, ctx, &error)?;
    }

    let files = ctx.files.files();
    if files.is_empty() {
        writeln!(out, "{}", "No files.".bright_black())?;
        return Ok(());
    }

    let id_width = files.iter().map(|f| f.id.len()).max().unwrap_or(0).max(2);
    let name_width = files.iter().map(|f| f.name.len()).max().unwrap_or(0).max(4);
    writeln!(
        out,
        "{}",
        format!(
            "{:<id_width$}  {:<name_width$}  {:>10}  TYPE",
            "ID", "NAME", "SIZE"
        )
        .bright_black()
    )?;
    for file in &files {
        writeln!(
            out,
            "{:<id_width$}  {:<name_width$}  {:>10}  {}",
            file.id.cyan(),
            file.name,
            human_size(file.size),
            file.mime_type().unwrap_or("-")
        )?;
    }
    Ok(())
}

pub fn file_preview(out: &mut dyn Write, ctx: &AppContext, location: &Location) -> io::Result<()> {
    let id = location.param("fileId").unwrap_or_default();

    if let Some(error) = ctx.files.error() {
        render_store_error(out, ctx, &error)?;
    }

    let Some(file) = ctx.files.find(id) else {
        writeln!(out, "{}", format!("File '{}' not found.", id).bright_yellow())?;
        return Ok(());
    };
    render_record(out, &file)
}

fn render_record(out: &mut dyn Write, file: &FileRecord) -> io::Result<()> {
    writeln!(out, "{}", file.name.bright_magenta().bold())?;
    writeln!(out, "  {:<14}{}", "id", file.id)?;
    writeln!(out, "  {:<14}{} ({} bytes)", "size", human_size(file.size), file.size)?;
    for (key, value) in &file.extra {
        writeln!(out, "  {:<14}{}", key, preview_value(value))?;
    }
    Ok(())
}

/// Prints the store's current error as user-facing text.
pub fn render_store_error(
    out: &mut dyn Write,
    ctx: &AppContext,
    error: &StoreError,
) -> io::Result<()> {
    writeln!(out, "{}", error.user_message(ctx.config.ui.locale).red())
}

fn preview_value(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.chars().count() <= PREVIEW_VALUE_LIMIT {
        return text;
    }
    let head: String = text.chars().take(PREVIEW_VALUE_LIMIT).collect();
    format!("{}... ({} chars)", head, text.chars().count())
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::{context, rendered};
    use filedeck_core::config::Locale;

    fn sample() -> Vec<FileRecord> {
        let mut record = FileRecord::new("a1b2", "notes.txt", 2048);
        record
            .extra
            .insert("type".to_string(), Value::from("text/plain"));
        vec![record]
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(12), "12 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_preview_value_elides_long_strings() {
        let long = "x".repeat(100);
        let text = preview_value(&Value::from(long));
        assert!(text.ends_with("... (100 chars)"));
        assert_eq!(preview_value(&Value::from(7)), "7");
    }

    #[tokio::test]
    async fn test_list_renders_rows() {
        let ctx = context(sample(), false);
        ctx.files.fetch_all().await;

        let text = rendered(|out| file_list(out, &ctx));
        assert!(text.contains("a1b2"));
        assert!(text.contains("notes.txt"));
        assert!(text.contains("2.0 KB"));
        assert!(text.contains("text/plain"));
    }

    #[tokio::test]
    async fn test_list_shows_localized_error() {
        let mut ctx = context(sample(), false);
        ctx.config.ui.locale = Locale::Fr;
        ctx.files.fetch_all().await;
        ctx.files.remove("a1b2").await;

        let text = rendered(|out| file_list(out, &ctx));
        assert!(text.contains("Erreur lors de la suppression du fichier"));
        assert!(text.contains("notes.txt"));
    }

    #[tokio::test]
    async fn test_preview_of_unknown_id() {
        let mut ctx = context(sample(), false);
        ctx.session.login("alice").unwrap();
        ctx.files.fetch_all().await;
        let location = ctx.navigate("/preview/zzzz").unwrap();

        let text = rendered(|out| file_preview(out, &ctx, &location));
        assert_eq!(text, "File 'zzzz' not found.\n");
    }

    #[tokio::test]
    async fn test_preview_lists_fields() {
        let mut ctx = context(sample(), false);
        ctx.session.login("alice").unwrap();
        ctx.files.fetch_all().await;
        let location = ctx.navigate("/preview/a1b2").unwrap();

        let text = rendered(|out| file_preview(out, &ctx, &location));
        assert!(text.starts_with("notes.txt\n"));
        assert!(text.contains("type"));
        assert!(text.contains("2048 bytes"));
    }
}
