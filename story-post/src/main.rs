//! story-post - Create a post on the story-sharing backend

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use libstorycast::service::StorycastService;
use libstorycast::{Result, StorycastError};

#[derive(Parser, Debug)]
#[command(name = "story-post")]
#[command(about = "Create a post with text and media attachments", long_about = None)]
struct Cli {
    /// Post text (read from stdin when omitted and no media is given)
    content: Option<String>,

    /// Attach a media file; repeat for multiple attachments
    #[arg(short, long)]
    media: Vec<PathBuf>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        libstorycast::logging::init_default();
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.format != "text" && cli.format != "json" {
        return Err(StorycastError::InvalidInput(format!(
            "Unknown output format '{}'. Valid options: text, json",
            cli.format
        )));
    }

    let content = match cli.content {
        Some(content) => content,
        // Media-only posts need no text; only block on stdin when there is
        // nothing else to post.
        None if cli.media.is_empty() => read_stdin()?,
        None => String::new(),
    };

    if content.trim().is_empty() && cli.media.is_empty() {
        return Err(StorycastError::InvalidInput(
            "Please add text or media".to_string(),
        ));
    }

    let service = StorycastService::new()?;
    let mut composer = service.composer();
    composer.set_content(content);

    if !cli.media.is_empty() {
        let outcome = composer.select_paths(&cli.media);
        for rejection in &outcome.rejections {
            eprintln!("Skipping media: {}", rejection);
        }
        tracing::info!(
            accepted = outcome.accepted,
            rejected = outcome.rejections.len(),
            "Screened media candidates"
        );
    }

    // The bearer token is read at submission time, never cached earlier
    let token = service.session().load_token()?;
    let post = composer.submit(&token, service.user_id()).await?;

    match cli.format.as_str() {
        "json" => {
            let rendered = serde_json::to_string(&post)
                .map_err(|e| StorycastError::InvalidInput(e.to_string()))?;
            println!("{}", rendered);
        }
        _ => {
            println!("created: {}", post.id);
        }
    }

    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| StorycastError::InvalidInput(format!("Failed to read stdin: {}", e)))?;
    Ok(content)
}
