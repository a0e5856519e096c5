//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use mindful::{Mood, OutputFormat, VoiceName};
use std::path::PathBuf;

/// Mindful - AI journaling companion with a private multimedia feed
#[derive(Parser, Debug)]
#[command(name = "mindful")]
#[command(about = "AI journaling companion with a private multimedia feed", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file overriding the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Diary entries
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Generated feed posts
    #[command(subcommand)]
    Feed(FeedCommands),

    /// Feed generation preferences
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Reflect on an entry and store the reflection
    Reflect {
        /// Entry to reflect on (defaults to the latest)
        #[arg(long)]
        entry: Option<String>,
    },

    /// Break a study goal into tasks
    Plan {
        /// What you want to achieve
        goal: String,

        /// Time available, e.g. "2 hours" or "1 week"
        #[arg(long, default_value = "1 week")]
        time: String,

        /// Document to base the tasks on
        #[arg(long)]
        document: Option<PathBuf>,
    },

    /// Study tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Travel ideas from the diary
    #[command(subcommand)]
    Travel(TravelCommands),

    /// Companion personas
    #[command(subcommand)]
    Friend(FriendCommands),

    /// Interactive chat
    #[command(subcommand)]
    Chat(ChatCommands),
}

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Write a new entry
    Add {
        /// Entry text
        text: String,

        /// Mood at the time of writing
        #[arg(long, default_value = "NEUTRAL")]
        mood: Mood,

        /// Files to attach (images or PDFs)
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
    },

    /// List entries, newest first
    List {
        /// Maximum number of entries to display
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Output format
        #[arg(long, default_value = "human")]
        format: DisplayFormat,
    },
}

/// Feed subcommands
#[derive(Subcommand, Debug)]
pub enum FeedCommands {
    /// Generate a post from an entry
    Generate {
        /// Entry to generate from (defaults to the latest)
        #[arg(long)]
        entry: Option<String>,

        /// Directory to write the generated media and narration to
        #[arg(long)]
        save_media: Option<PathBuf>,
    },

    /// List posts, newest first
    List {
        /// Maximum number of posts to display
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Output format
        #[arg(long, default_value = "human")]
        format: DisplayFormat,
    },

    /// Like or unlike a post
    Like {
        /// Post identifier
        post_id: String,
    },
}

/// Generation preference subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current preferences
    Show,

    /// Change one or more preferences
    Set {
        /// Visual style, e.g. "Comic Book"
        #[arg(long)]
        art_style: Option<String>,

        /// Caption tone, e.g. "Witty & Fun"
        #[arg(long)]
        caption_tone: Option<String>,

        /// Whether to narrate posts
        #[arg(long)]
        audio: Option<bool>,

        /// IMAGE or VIDEO
        #[arg(long)]
        format: Option<OutputFormat>,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks
    List,

    /// Mark a task done or not done
    Toggle {
        /// Task identifier
        task_id: String,
    },
}

/// Travel subcommands
#[derive(Subcommand, Debug)]
pub enum TravelCommands {
    /// Destinations mentioned in recent entries
    Intents,

    /// Plan a trip
    Plan {
        /// Where to go
        destination: String,

        /// File to write the header image to
        #[arg(long)]
        save_image: Option<PathBuf>,
    },
}

/// Friend persona subcommands
#[derive(Subcommand, Debug)]
pub enum FriendCommands {
    /// Save a persona
    Add {
        /// Display name
        name: String,

        /// Personality description
        #[arg(long)]
        personality: String,

        /// Shared memories and relationship details
        #[arg(long, default_value = "")]
        context: String,

        /// Voice
        #[arg(long, default_value = "Kore")]
        voice: VoiceName,
    },

    /// List saved personas
    List,
}

/// Chat subcommands
#[derive(Subcommand, Debug)]
pub enum ChatCommands {
    /// Chat with a study tutor
    Study {
        /// Document to study
        #[arg(long)]
        document: Option<PathBuf>,
    },

    /// Chat with a saved friend persona
    Friend {
        /// Persona name
        name: String,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DisplayFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
