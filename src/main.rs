use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use luximed_studio::ai::mime;
use luximed_studio::data_uri::DataUri;
use luximed_studio::models::{
    AspectRatio, GeminiModel, GenerationState, IdeaState, ReferenceImage, WatermarkKind,
};
use luximed_studio::studio::{GenerationRequest, Studio};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "luximed-studio")]
#[command(about = "Generate and watermark images with Gemini")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate or edit an image from a prompt plus optional references.
    Generate {
        /// Text prompt describing the desired image or edit.
        prompt: String,

        /// Structure/content reference image (sent before the style image).
        #[arg(long, value_name = "FILE")]
        content_image: Option<PathBuf>,

        /// Style reference image.
        #[arg(long, value_name = "FILE")]
        style_image: Option<PathBuf>,

        /// Output aspect ratio: 1:1, 4:3, 3:4, 16:9 or 9:16.
        #[arg(long, default_value = "1:1")]
        aspect_ratio: AspectRatio,

        /// Model tier: 'flash' or 'pro'.
        #[arg(long, default_value = "flash")]
        model: GeminiModel,

        /// Brand mark overlay: 'none', 'icon' or 'full'.
        #[arg(long, default_value = "none")]
        watermark: WatermarkKind,

        /// Output file; defaults to studio-output.<ext> next to the cwd.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Brainstorm three prompt ideas for a topic.
    Ideas {
        /// Topic or rough idea to riff on.
        topic: String,
    },
}

fn load_reference(path: Option<&Path>) -> Result<Option<ReferenceImage>> {
    match path {
        None => Ok(None),
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read reference image {}", path.display()))?;
            Ok(Some(mime::reference_from_bytes(&bytes)))
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_generate(
    studio: &mut Studio,
    prompt: String,
    content_image: Option<PathBuf>,
    style_image: Option<PathBuf>,
    aspect_ratio: AspectRatio,
    model: GeminiModel,
    watermark: WatermarkKind,
    output: Option<PathBuf>,
) -> Result<()> {
    let request = GenerationRequest {
        prompt,
        content_image: load_reference(content_image.as_deref())?,
        style_image: load_reference(style_image.as_deref())?,
        aspect_ratio,
        model,
        watermark,
    };

    match studio.generate(request).await {
        GenerationState::Success(content) => {
            if let Some(text) = &content.text {
                println!("{}", text);
            }
            if let Some(image_url) = &content.image_url {
                let decoded = DataUri::parse(image_url)?;
                let path = output.unwrap_or_else(|| {
                    PathBuf::from(format!(
                        "studio-output.{}",
                        mime::extension_for(&decoded.mime_type)
                    ))
                });
                std::fs::write(&path, &decoded.data)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Saved image to {}", path.display());
            }
            Ok(())
        }
        GenerationState::Error(message) => {
            error!("Generation failed: {}", message);
            std::process::exit(1);
        }
        GenerationState::Idle => bail!("Prompt must not be blank"),
        GenerationState::Loading => bail!("Generation did not complete"),
    }
}

async fn run_ideas(studio: &mut Studio, topic: String) -> Result<()> {
    match studio.generate_ideas(&topic).await {
        IdeaState::Ready(ideas) if ideas.is_empty() => {
            warn!("No ideas returned. Try again or rephrase the topic.");
            Ok(())
        }
        IdeaState::Ready(ideas) => {
            for idea in ideas {
                println!("- {}", idea);
            }
            Ok(())
        }
        IdeaState::Idle => bail!("Topic must not be blank"),
        IdeaState::Loading => bail!("Idea generation did not complete"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luximed_studio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut studio = match Studio::new() {
        Ok(studio) => studio,
        Err(e) => {
            error!("Failed to initialize studio: {}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Generate {
            prompt,
            content_image,
            style_image,
            aspect_ratio,
            model,
            watermark,
            output,
        } => {
            run_generate(
                &mut studio,
                prompt,
                content_image,
                style_image,
                aspect_ratio,
                model,
                watermark,
                output,
            )
            .await
        }
        Command::Ideas { topic } => run_ideas(&mut studio, topic).await,
    }
}
