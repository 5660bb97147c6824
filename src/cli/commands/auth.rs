use serde_json::json;

use crate::auth::JwtKeys;
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;

/// `posts token <user-id>`: sign a token with the local JWT_SECRET
pub fn token(user_id: i64, name: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    let keys = JwtKeys::from_config(security)?;
    let token = keys.issue(user_id, name)?;

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            "Token issued",
            Some(json!({
                "token": token,
                "expires_in_hours": security.jwt_expiry_hours
            })),
        ),
        // Bare token so it can be captured with $(posts token 1)
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
