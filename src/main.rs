//! CLI entry point for phrasebook

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phrasebook::commands::list::ListOptions;

#[derive(Parser)]
#[command(name = "phrasebook")]
#[command(version)]
#[command(about = "Browse the posts of a categorized quote blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts or categories
    #[command(alias = "ls")]
    List {
        /// What to list (post, featured, recent, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only posts of this category
        #[arg(long)]
        category: Option<String>,

        /// Maximum number of entries
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        /// Category of the post
        category: String,

        /// Slug of the post
        slug: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "phrasebook=debug,info"
    } else {
        "phrasebook=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List {
            r#type,
            category,
            count,
            json,
        } => {
            let site = phrasebook::Phrasebook::new(&base_dir)?;
            let index = site.index();
            let options = ListOptions {
                category,
                count,
                json,
            };
            phrasebook::commands::list::run(&site, &index, &r#type, &options).await?;
        }

        Commands::Show {
            category,
            slug,
            json,
        } => {
            let site = phrasebook::Phrasebook::new(&base_dir)?;
            let index = site.index();
            if !phrasebook::commands::show::run(&site, &index, &category, &slug, json).await? {
                std::process::exit(1);
            }
        }

        Commands::Version => {
            println!("phrasebook version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
