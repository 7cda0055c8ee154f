use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use chococloud::config::{self, Layout};

/// ChocoCloud: live word clouds from spreadsheet survey answers.
///
/// Reads the keyword column of each answer sheet, counts the phrases
/// people wrote, and serves the results as auto-refreshing word clouds.
#[derive(Parser)]
#[command(name = "chococloud", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the word cloud dashboard
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8501")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,

        /// Page chrome: full, presentation (fullscreen controls) or kiosk (clouds only)
        #[arg(long, value_enum, default_value = "full")]
        layout: Layout,
    },

    /// Count phrases in one worksheet and print the most frequent
    Count {
        /// Worksheet (tab) name, e.g. answerA
        #[arg(default_value = config::SHEET_A)]
        worksheet: String,

        /// How many phrases to show
        #[arg(long, default_value = "20")]
        top: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chococloud=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::Config::load()?;

    match cli.command {
        Commands::Serve { port, bind, layout } => {
            info!(
                spreadsheet = %config.spreadsheet_id,
                refresh_ms = config.refresh_ms,
                "Starting dashboard"
            );
            chococloud::web::run_server(config, layout, port, &bind).await?;
        }

        Commands::Count { worksheet, top } => {
            let source = chococloud::web::open_source(&config)?;
            let counts = chococloud::pipeline::phrase_counts::get_phrase_counts(
                source.as_ref(),
                &worksheet,
                config::TARGET_COL,
            )
            .await?;
            chococloud::output::terminal::display_phrase_counts(
                &worksheet,
                config::TARGET_COL,
                &counts,
                top,
            );
        }
    }

    Ok(())
}
