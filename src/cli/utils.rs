use serde_json::{json, Value};

use crate::api::format::PostResource;
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a single post
pub fn output_post(output_format: OutputFormat, post: &PostResource) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(post)?),
        OutputFormat::Text => {
            println!("ID:         {}", post.id);
            println!("Title:      {}", post.title);
            println!("Created at: {}", post.created_at);
            println!("Updated at: {}", post.updated_at);
        }
    }
    Ok(())
}

/// Output a list of posts, with a friendly line when there are none
pub fn output_posts(output_format: OutputFormat, posts: &[PostResource]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "data": posts }))?);
        }
        OutputFormat::Text if posts.is_empty() => println!("No posts found"),
        OutputFormat::Text => {
            println!("{:<8} {:<28} TITLE", "ID", "UPDATED");
            for post in posts {
                println!("{:<8} {:<28} {}", post.id, post.updated_at, post.title);
            }
        }
    }
    Ok(())
}
