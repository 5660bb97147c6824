pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "posts")]
#[command(about = "Posts CLI - tokens, migrations and calls against the Posts API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "POSTS_API_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the Posts API"
    )]
    pub url: String,

    #[arg(long, global = true, env = "POSTS_API_TOKEN", hide_env_values = true, help = "Bearer token")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Issue a bearer token signed with the local JWT_SECRET")]
    Token {
        #[arg(help = "User id to embed as the token subject")]
        user_id: i64,
        #[arg(long, default_value = "cli", help = "Display name to embed in the token")]
        name: String,
    },

    #[command(about = "Apply SQL migrations to DATABASE_URL")]
    Migrate,

    #[command(flatten)]
    Posts(commands::posts::PostCommands),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token { user_id, name } => commands::auth::token(user_id, &name, output_format),
        Commands::Migrate => commands::db::migrate(output_format).await,
        Commands::Posts(cmd) => {
            let client = client::PostsClient::new(&cli.url, cli.token)?;
            commands::posts::handle(cmd, &client, output_format).await
        }
    }
}
