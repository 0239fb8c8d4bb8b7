use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lens_core::{Category, Result, ADMIN_ACCESS_KEY};
use lens_feed::{FeedController, FeedManager};
use lens_storage::{mock_accounts, ProfileStore, SourceRegistry};
use lens_web::AppState;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Grounded news aggregation for Nepal", long_about = None)]
struct Cli {
    /// Storage backend: memory or file
    #[arg(long, default_value = "file")]
    storage: String,
    /// Data directory for the file backend
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Model backend: gemini or dummy
    #[arg(long, default_value = "gemini")]
    model: String,
    /// API key for the gemini backend
    #[arg(long, env = "GEMINI_API_KEY")]
    api_key: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and print the feed for a category
    Feed {
        #[arg(default_value = "latest")]
        category: String,
        /// Screen out homepage links (source-filtered fetch)
        #[arg(long)]
        filtered: bool,
    },
    /// Search news by free text
    Search { query: String },
    /// Inspect or toggle the configured portals
    Sources {
        #[command(subcommand)]
        command: SourceCommands,
    },
    /// Sign in as one of the mock accounts
    Login { email: String },
    /// Sign out and clear the stored profile
    Logout,
    /// Show the signed-in profile and its favorite category
    Profile,
    /// Record an article interaction for a category
    Interact { category: String },
    /// Run the JSON API server
    Serve {
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

#[derive(Subcommand, Debug)]
enum SourceCommands {
    /// List the portals and their enabled flags
    List,
    /// Flip a portal's enabled flag (requires the access key)
    Toggle {
        id: String,
        #[arg(long)]
        key: String,
    },
}

fn print_feed(controller: &FeedController) {
    if controller.state().articles.is_empty() {
        println!("No articles found. Try another category or search query.");
        return;
    }

    if let Some(hero) = controller.hero() {
        println!("⭐ {} [{}]", hero.title, hero.source);
        println!("   {}", hero.url);
        println!("   {}", hero.excerpt);
        println!();
    }

    println!("{}", controller.section_heading());
    for article in controller.grid() {
        println!("📰 {} [{}]", article.title, article.source);
        println!("   {}", article.url);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = lens_storage::create_store(&cli.storage, cli.data_dir.clone()).await?;
    let model = lens_inference::create_model(&cli.model, cli.api_key.clone())?;
    info!("🧠 Model backend initialized ({})", model.name());

    match cli.command {
        Commands::Feed { category, filtered } => {
            let category: Category = category.parse()?;
            let registry = Arc::new(SourceRegistry::load(store).await?);
            let mut controller = FeedController::new(FeedManager::new(model, registry));

            if filtered {
                controller.select_category_filtered(category).await;
            } else {
                controller.select_category(category).await;
            }
            print_feed(&controller);
        }
        Commands::Search { query } => {
            let registry = Arc::new(SourceRegistry::load(store).await?);
            let mut controller = FeedController::new(FeedManager::new(model, registry));

            controller.search(&query).await;
            print_feed(&controller);
        }
        Commands::Sources { command } => {
            let registry = SourceRegistry::load(store).await?;
            match command {
                SourceCommands::List => {
                    for source in registry.list().await {
                        let mark = if source.enabled { "✅" } else { "🚫" };
                        println!("{} {} ({}) [{}]", mark, source.name, source.domain, source.id);
                    }
                }
                SourceCommands::Toggle { id, key } => {
                    if key != ADMIN_ACCESS_KEY {
                        eprintln!("Invalid access key");
                        std::process::exit(1);
                    }
                    match registry.toggle(&id).await? {
                        Some(enabled) => {
                            println!(
                                "{} is now {}",
                                id,
                                if enabled { "enabled" } else { "disabled" }
                            );
                        }
                        None => eprintln!("Unknown source: {}", id),
                    }
                }
            }
        }
        Commands::Login { email } => {
            let profiles = ProfileStore::load(store).await?;
            let Some(account) = mock_accounts().into_iter().find(|a| a.email == email) else {
                eprintln!("Unknown account: {}", email);
                eprintln!("Available accounts:");
                for account in mock_accounts() {
                    eprintln!("  {} <{}>", account.name, account.email);
                }
                std::process::exit(1);
            };
            profiles.login(account).await?;
        }
        Commands::Logout => {
            let profiles = ProfileStore::load(store).await?;
            profiles.logout().await?;
            println!("Signed out");
        }
        Commands::Profile => {
            let profiles = ProfileStore::load(store).await?;
            match profiles.current().await {
                Some(profile) => {
                    println!("👤 {} <{}>", profile.name, profile.email);
                    for (category, count) in &profile.interests {
                        println!("   {}: {}", category, count);
                    }
                    let favorite = profiles
                        .favorite_category()
                        .await
                        .unwrap_or_else(|| "none".to_string());
                    println!("⭐ Favorite category: {}", favorite);
                }
                None => println!("Not signed in"),
            }
        }
        Commands::Interact { category } => {
            let profiles = ProfileStore::load(store).await?;
            profiles.record_interaction(&category).await?;
        }
        Commands::Serve { port } => {
            let state = AppState::build(store, model).await?;
            lens_web::serve(state, port).await?;
        }
    }

    Ok(())
}
