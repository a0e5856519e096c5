//! Mindful CLI binary.
//!
//! This binary provides command-line access to the journal:
//! - Write and list diary entries
//! - Generate, list and like feed posts
//! - Reflect, plan study tasks, plan trips and chat with companions

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, Context, handle_chat_command, handle_config_command,
        handle_entry_command, handle_feed_command, handle_friend_command, handle_task_command,
        handle_travel_command, plan, reflect,
    };

    // Load .env before anything reads the API key
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    #[cfg(feature = "observability")]
    let telemetry = mindful::init_telemetry()?;

    #[cfg(not(feature = "observability"))]
    {
        let directives = std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok();
        tracing_subscriber::fmt()
            .with_env_filter(cli::log_filter(directives.as_deref(), cli.verbose))
            .with_target(false)
            .init();
    }

    let ctx = Context::load(cli.config.as_deref())?;

    // Execute the requested command
    let result = match cli.command {
        Commands::Entry(cmd) => handle_entry_command(&ctx, cmd).await,
        Commands::Feed(cmd) => handle_feed_command(&ctx, cmd).await,
        Commands::Config(cmd) => handle_config_command(&ctx, cmd).await,
        Commands::Reflect { entry } => reflect(&ctx, entry.as_deref()).await,
        Commands::Plan {
            goal,
            time,
            document,
        } => plan(&ctx, &goal, &time, document).await,
        Commands::Task(cmd) => handle_task_command(&ctx, cmd).await,
        Commands::Travel(cmd) => handle_travel_command(&ctx, cmd).await,
        Commands::Friend(cmd) => handle_friend_command(&ctx, cmd).await,
        Commands::Chat(cmd) => handle_chat_command(&ctx, cmd).await,
    };

    #[cfg(feature = "observability")]
    mindful::shutdown_telemetry(telemetry);

    result?;
    Ok(())
}
