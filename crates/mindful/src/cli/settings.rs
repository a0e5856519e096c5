//! Generation preference handlers.

use super::commands::ConfigCommands;
use super::context::Context;
use mindful::{GenerationConfig, MindfulResult};
use tracing::info;

/// Handle generation preference commands.
pub async fn handle_config_command(ctx: &Context, cmd: ConfigCommands) -> MindfulResult<()> {
    let repository = ctx.repository()?;
    match cmd {
        ConfigCommands::Show => {
            print_config(&repository.config().await?);
        }
        ConfigCommands::Set {
            art_style,
            caption_tone,
            audio,
            format,
        } => {
            let mut config = repository.config().await?;
            if let Some(art_style) = art_style {
                config = config.with_art_style(art_style);
            }
            if let Some(caption_tone) = caption_tone {
                config = config.with_caption_tone(caption_tone);
            }
            if let Some(audio) = audio {
                config = config.with_include_audio(audio);
            }
            if let Some(format) = format {
                config = config.with_output_format(format);
            }
            repository.update_config(&config).await?;
            info!("Generation preferences updated");
            print_config(&config);
        }
    }
    Ok(())
}

fn print_config(config: &GenerationConfig) {
    println!("Art style:     {}", config.art_style);
    println!("Caption tone:  {}", config.caption_tone);
    println!("Format:        {}", config.output_format);
    println!(
        "Narration:     {}",
        if config.include_audio { "on" } else { "off" }
    );
}
