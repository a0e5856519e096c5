//! Reflection, study, travel and chat handlers.

use super::commands::{ChatCommands, FriendCommands, TaskCommands, TravelCommands};
use super::context::Context;
use super::files::{load_attachment, write_file};
use mindful::{
    ChatSession, FriendProfile, GeminiClient, MindfulResult, Task, VoiceName,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reflect on an entry.
pub async fn reflect(ctx: &Context, entry_id: Option<&str>) -> MindfulResult<()> {
    match ctx.app()?.reflect(entry_id).await? {
        Some(reflection) => {
            println!("Sentiment:  {}", reflection.sentiment);
            println!("Reflection: {}", reflection.reflection);
            println!("Tags:       {}", reflection.tags.join(", "));
        }
        None => println!("Entry is too short to reflect on."),
    }
    Ok(())
}

/// Generate and store a study plan.
pub async fn plan(
    ctx: &Context,
    goal: &str,
    time: &str,
    document: Option<PathBuf>,
) -> MindfulResult<()> {
    let document = match document {
        Some(path) => Some(load_attachment(&path).await?),
        None => None,
    };
    let tasks = ctx.app()?.plan_study(goal, time, document.as_ref()).await?;
    if tasks.is_empty() {
        println!("No tasks were suggested.");
    }
    for task in &tasks {
        print_task(task);
    }
    Ok(())
}

fn print_task(task: &Task) {
    println!(
        "[{}] {:<6} {}{}  ({})",
        if task.completed { "x" } else { " " },
        task.priority.to_string(),
        task.title,
        task.subject
            .as_deref()
            .map(|s| format!(" - {}", s))
            .unwrap_or_default(),
        task.id
    );
}

/// Handle task commands.
pub async fn handle_task_command(ctx: &Context, cmd: TaskCommands) -> MindfulResult<()> {
    let repository = ctx.repository()?;
    match cmd {
        TaskCommands::List => {
            let tasks = repository.tasks().await?;
            for task in &tasks {
                print_task(task);
            }
            println!("Total: {} tasks", tasks.len());
        }
        TaskCommands::Toggle { task_id } => {
            if repository.toggle_task(&task_id).await? {
                println!("Toggled {}", task_id);
            } else {
                println!("No task with id {}", task_id);
            }
        }
    }
    Ok(())
}

/// Handle travel commands.
pub async fn handle_travel_command(ctx: &Context, cmd: TravelCommands) -> MindfulResult<()> {
    let app = ctx.app()?;
    match cmd {
        TravelCommands::Intents => {
            let destinations = app.travel_intents().await?;
            if destinations.is_empty() {
                println!("Write a few entries first.");
            }
            for destination in destinations {
                println!("- {}", destination);
            }
        }
        TravelCommands::Plan {
            destination,
            save_image,
        } => {
            let trip = app.plan_trip(&destination).await?;
            println!("{}", trip.description);
            println!("{:-<80}", "");
            for place in &trip.places {
                println!("- {} <{}>", place.title, place.uri);
            }
            match (&trip.header_image, save_image) {
                (Some(image), Some(path)) => {
                    write_file(&path, &image.data).await?;
                    println!("Header image: {}", path.display());
                }
                (None, Some(_)) => println!("No header image was generated."),
                _ => {}
            }
        }
    }
    Ok(())
}

/// Handle friend persona commands.
pub async fn handle_friend_command(ctx: &Context, cmd: FriendCommands) -> MindfulResult<()> {
    let repository = ctx.repository()?;
    match cmd {
        FriendCommands::Add {
            name,
            personality,
            context,
            voice,
        } => {
            repository
                .add_friend(friend_profile(name, personality, context, voice))
                .await?;
            println!("Saved friend");
        }
        FriendCommands::List => {
            for friend in repository.friends().await? {
                println!("{} ({}): {}", friend.name, friend.voice_name, friend.personality);
            }
        }
    }
    Ok(())
}

fn friend_profile(
    name: String,
    personality: String,
    context: String,
    voice_name: VoiceName,
) -> FriendProfile {
    FriendProfile {
        name,
        personality,
        context,
        voice_name,
        avatar_url: None,
    }
}

/// Start an interactive chat.
pub async fn handle_chat_command(ctx: &Context, cmd: ChatCommands) -> MindfulResult<()> {
    let app = ctx.app()?;
    let session = match cmd {
        ChatCommands::Study { document } => {
            let document = match document.as_deref() {
                Some(path) => Some(load_document(path).await?),
                None => None,
            };
            app.study_chat(document.as_ref())
        }
        ChatCommands::Friend { name } => app.friend_chat(&name).await?,
    };
    chat_loop(session).await
}

async fn load_document(path: &Path) -> MindfulResult<mindful::Attachment> {
    let document = load_attachment(path).await?;
    println!("Loaded {}", document.name);
    Ok(document)
}

async fn chat_loop(mut session: ChatSession<GeminiClient>) -> MindfulResult<()> {
    println!("Type a message, or /exit to leave.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let Ok(Some(line)) = lines.next_line().await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/exit" {
            break;
        }

        match session.send(line).await {
            Ok(reply) => println!("{}\n", reply),
            Err(e) => eprintln!("Could not get a reply: {}\n", e),
        }
    }
    Ok(())
}
