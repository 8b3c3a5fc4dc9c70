mod api;
mod commands;
mod i18n;

use clap::{Parser, Subcommand};
use delivre_core::config;

#[derive(Parser)]
#[command(
    name = "delivre",
    version,
    about = "3omda Delivre — restaurant menu with WhatsApp ordering"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API.
    Serve,
    /// Show configuration and catalog counts.
    Status,
    /// Create a user who can sign in to the admin API.
    UserAdd {
        #[arg(long)]
        email: String,
        #[arg(long, env = "DELIVRE_PASSWORD")]
        password: String,
        /// Also register the user as an administrator.
        #[arg(long)]
        admin: bool,
    },
    /// Add a dish category.
    CategoryAdd {
        #[arg(long)]
        name: String,
        #[arg(long)]
        name_ar: Option<String>,
        #[arg(long)]
        name_fr: Option<String>,
        /// Position in the category bar (lower first).
        #[arg(long, default_value_t = 0)]
        order: i64,
    },
    /// Print the WhatsApp order link for a dish.
    OrderLink {
        dish_id: String,
        /// Language for dish and restaurant names (en, ar, fr).
        #[arg(long)]
        lang: Option<String>,
        /// Customer name to include in the message.
        #[arg(long)]
        customer: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (cfg, source) = config::load_with_source(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.delivre.log_level)),
        )
        .init();
    source.log();

    match cli.command {
        Commands::Serve => commands::serve(&cfg).await?,
        Commands::Status => commands::status(&cli.config, &cfg).await?,
        Commands::UserAdd {
            email,
            password,
            admin,
        } => commands::user_add(&cfg, &email, &password, admin).await?,
        Commands::CategoryAdd {
            name,
            name_ar,
            name_fr,
            order,
        } => commands::category_add(&cfg, name, name_ar, name_fr, order).await?,
        Commands::OrderLink {
            dish_id,
            lang,
            customer,
        } => commands::order_link(&cfg, &dish_id, lang.as_deref(), customer).await?,
    }

    Ok(())
}
