//! Feed command handlers.

use super::commands::{DisplayFormat, FeedCommands};
use super::context::Context;
use super::files::{extension_for, write_file};
use super::print_json;
use mindful::{FeedPost, MindfulResult, audio};
use serde_json::json;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Handle feed commands.
pub async fn handle_feed_command(ctx: &Context, cmd: FeedCommands) -> MindfulResult<()> {
    match cmd {
        FeedCommands::Generate { entry, save_media } => {
            generate(ctx, entry.as_deref(), save_media).await
        }
        FeedCommands::List { limit, format } => list_posts(ctx, limit, format).await,
        FeedCommands::Like { post_id } => {
            let post = ctx.repository()?.toggle_like(&post_id).await?;
            match post {
                Some(post) => println!(
                    "{} {} ({} likes)",
                    if *post.liked_by_user() { "Liked" } else { "Unliked" },
                    post.id(),
                    post.like_count()
                ),
                None => println!("No post with id {}", post_id),
            }
            Ok(())
        }
    }
}

async fn generate(
    ctx: &Context,
    entry_id: Option<&str>,
    save_media: Option<PathBuf>,
) -> MindfulResult<()> {
    let app = ctx.app()?;

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling generation");
                cancel.cancel();
            }
        })
    };

    println!("Generating post, this can take a few minutes for video...");
    let result = app.generate_post(entry_id, &cancel).await;
    interrupt.abort();
    let post = result?;

    print_post(&post);
    if let Some(dir) = save_media {
        save_post_media(&post, &dir).await?;
    }
    Ok(())
}

async fn save_post_media(post: &FeedPost, dir: &Path) -> MindfulResult<()> {
    let payload = post.media().payload();
    let media_path = dir.join(format!("{}.{}", post.id(), extension_for(&payload.mime_type)));
    write_file(&media_path, &payload.data).await?;
    println!("  Media: {}", media_path.display());

    if let Some(clip) = post.narration_audio() {
        let (bytes, extension) = audio::playable(clip);
        let audio_path = dir.join(format!("{}.{}", post.id(), extension));
        write_file(&audio_path, &bytes).await?;
        println!("  Narration: {}", audio_path.display());
    }
    Ok(())
}

fn print_post(post: &FeedPost) {
    println!(
        "{}  {}  [{}]",
        post.created_at().format("%Y-%m-%d %H:%M"),
        post.id(),
        post.mood_tag()
    );
    println!("  {}", post.caption());
    println!(
        "  {} ({} bytes){}",
        post.media().format(),
        post.media().payload().data.len(),
        if post.narration_audio().is_some() {
            ", narrated"
        } else {
            ""
        }
    );
    println!(
        "  {} likes{}",
        post.like_count(),
        if *post.liked_by_user() { ", liked by you" } else { "" }
    );
}

async fn list_posts(ctx: &Context, limit: usize, format: DisplayFormat) -> MindfulResult<()> {
    let posts: Vec<FeedPost> = ctx
        .repository()?
        .posts()
        .await?
        .into_iter()
        .take(limit)
        .collect();

    match format {
        DisplayFormat::Json => {
            let summaries: Vec<_> = posts
                .iter()
                .map(|post| {
                    json!({
                        "id": post.id(),
                        "entryId": post.source_entry_id(),
                        "caption": post.caption(),
                        "format": post.media().format().to_string(),
                        "mimeType": post.media().payload().mime_type,
                        "likes": post.like_count(),
                        "liked": post.liked_by_user(),
                        "createdAt": post.created_at(),
                        "mood": post.mood_tag(),
                        "narrated": post.narration_audio().is_some(),
                    })
                })
                .collect();
            print_json(&summaries)?;
        }
        DisplayFormat::Human => {
            println!("{:-<80}", "");
            for post in &posts {
                print_post(post);
                println!("{:-<80}", "");
            }
            println!("Total: {} posts", posts.len());
        }
    }
    Ok(())
}
