use clap::Subcommand;
use serde_json::json;

use crate::cli::client::PostsClient;
use crate::cli::utils::{output_post, output_posts, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum PostCommands {
    #[command(about = "List all posts")]
    List,

    #[command(about = "Show a single post")]
    Show {
        #[arg(help = "Post ID")]
        id: i64,
    },

    #[command(about = "Create a post")]
    Create {
        #[arg(help = "Post title")]
        title: String,
    },

    #[command(about = "Replace the title of a post")]
    Update {
        #[arg(help = "Post ID")]
        id: i64,
        #[arg(help = "New title")]
        title: String,
    },

    #[command(about = "Delete a post")]
    Delete {
        #[arg(help = "Post ID")]
        id: i64,
    },
}

pub async fn handle(
    cmd: PostCommands,
    client: &PostsClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        PostCommands::List => output_posts(output_format, &client.list().await?),
        PostCommands::Show { id } => output_post(output_format, &client.show(id).await?),
        PostCommands::Create { title } => output_post(output_format, &client.create(&title).await?),
        PostCommands::Update { id, title } => {
            output_post(output_format, &client.update(id, &title).await?)
        }
        PostCommands::Delete { id } => {
            client.delete(id).await?;
            output_success(
                output_format,
                &format!("Post {} deleted", id),
                Some(json!({ "id": id })),
            )
        }
    }
}
