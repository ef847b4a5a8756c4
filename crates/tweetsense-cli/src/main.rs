mod commands;
mod dashboard;
mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tweetsense_client::{ApiClient, ExploreRequest};
use tweetsense_core::{Environment, SentimentClass};

use crate::commands::ExploreOutputs;

#[derive(Debug, Parser)]
#[command(name = "tweetsense-cli")]
#[command(about = "Tweet sentiment dashboard client")]
struct Cli {
    /// Base URL of the prediction service (overrides `TWEETSENSE_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the service is up
    Health,
    /// List entities and sentiment filters known to the service
    Meta,
    /// Classify a single text
    Predict {
        #[arg(long)]
        text: String,
    },
    /// Query the dataset explorer and print the derived dashboard
    Explore(ExploreArgs),
    /// Classify every row of a CSV file with a `text` column
    Batch {
        #[arg(long)]
        input: PathBuf,

        /// Write the labelled rows to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct ExploreArgs {
    #[arg(long, default_value = "All")]
    entity: String,

    #[arg(long)]
    keyword: Option<String>,

    #[arg(long, default_value = "All")]
    sentiment: String,

    /// Sentiment class the word cloud is drawn from
    #[arg(long, default_value_t = SentimentClass::Neutral)]
    wc_sentiment: SentimentClass,

    #[arg(long, default_value_t = 10)]
    top_entities: u32,

    #[arg(long, default_value_t = 20)]
    leaderboard: u32,

    #[arg(long, default_value_t = 50)]
    samples: u32,

    /// Filter the fetched samples and leaderboard without re-querying
    #[arg(long)]
    search: Option<String>,

    /// Write the (filtered) sample rows to this CSV file
    #[arg(long)]
    export_samples: Option<PathBuf>,

    /// Write the word cloud PNG to this file
    #[arg(long)]
    wordcloud: Option<PathBuf>,
}

impl ExploreArgs {
    fn request(&self) -> ExploreRequest {
        ExploreRequest {
            entity: self.entity.clone(),
            keyword: self.keyword.clone().unwrap_or_default(),
            sentiment: self.sentiment.clone(),
            wc_sentiment: self.wc_sentiment,
            top_entities_n: self.top_entities,
            leaderboard_n: self.leaderboard,
            sample_n: self.samples,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = tweetsense_core::load_app_config()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_base_url(url);
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!matches!(config.env, Environment::Production))
        .init();

    let client = ApiClient::from_config(&config)?;
    tracing::debug!(base_url = %client.base_url(), env = %config.env, "client ready");

    let mut out = std::io::stdout();
    match cli.command {
        Some(Commands::Health) => commands::run_health(&client, &mut out).await?,
        Some(Commands::Meta) => commands::run_meta(&client, &mut out).await?,
        Some(Commands::Predict { text }) => {
            commands::run_predict(&client, &text, &mut out).await?;
        }
        Some(Commands::Explore(args)) => {
            let outputs = ExploreOutputs {
                search: args.search.as_deref(),
                export_samples: args.export_samples.as_deref(),
                wordcloud: args.wordcloud.as_deref(),
            };
            commands::run_explore(&client, args.request(), &outputs, &mut out).await?;
        }
        Some(Commands::Batch { input, output }) => {
            commands::run_batch(&client, &input, output.as_deref(), &mut out).await?;
        }
        None => println!("tweetsense-cli ready; run with --help for commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
