//! Entry command handlers.

use super::commands::{DisplayFormat, EntryCommands};
use super::context::Context;
use super::files::load_attachment;
use super::print_json;
use mindful::{JournalEntry, MindfulResult, Mood};
use std::path::PathBuf;

/// Handle entry commands.
pub async fn handle_entry_command(ctx: &Context, cmd: EntryCommands) -> MindfulResult<()> {
    match cmd {
        EntryCommands::Add {
            text,
            mood,
            attachments,
        } => add_entry(ctx, &text, mood, attachments).await,
        EntryCommands::List { limit, format } => list_entries(ctx, limit, format).await,
    }
}

async fn add_entry(
    ctx: &Context,
    text: &str,
    mood: Mood,
    paths: Vec<PathBuf>,
) -> MindfulResult<()> {
    let mut attachments = Vec::with_capacity(paths.len());
    for path in &paths {
        attachments.push(load_attachment(path).await?);
    }

    let repository = ctx.repository()?;
    let entry = JournalEntry::new(uuid::Uuid::new_v4().to_string(), text, mood, attachments);
    repository.add_entry(entry.clone()).await?;

    println!("Saved entry {}", entry.id);
    if !entry.attachments.is_empty() {
        println!("  Attachments: {}", entry.attachments.len());
    }
    Ok(())
}

async fn list_entries(ctx: &Context, limit: usize, format: DisplayFormat) -> MindfulResult<()> {
    let entries: Vec<_> = ctx
        .repository()?
        .entries()
        .await?
        .into_iter()
        .take(limit)
        .collect();

    match format {
        DisplayFormat::Json => print_json(&entries)?,
        DisplayFormat::Human => {
            println!("{:-<80}", "");
            for entry in &entries {
                println!(
                    "{}  {}  [{}]",
                    entry.date.format("%Y-%m-%d %H:%M"),
                    entry.id,
                    entry.mood
                );
                println!("{}", entry.content);
                if let Some(reflection) = &entry.ai_reflection {
                    println!("  Reflection: {}", reflection);
                }
                if !entry.tags.is_empty() {
                    println!("  Tags: {}", entry.tags.join(", "));
                }
                println!("{:-<80}", "");
            }
            println!("Total: {} entries", entries.len());
        }
    }
    Ok(())
}
