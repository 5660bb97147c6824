use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::Post;

/// Public wire format of a post: `{ id, title, created_at, updated_at }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResource {
    pub id: i64,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Post> for PostResource {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            created_at: format_timestamp(&post.created_at),
            updated_at: format_timestamp(&post.updated_at),
        }
    }
}

impl From<Post> for PostResource {
    fn from(post: Post) -> Self {
        Self::from(&post)
    }
}

/// Convert a list of posts to their wire format, preserving order
pub fn posts_to_resources(posts: &[Post]) -> Vec<PostResource> {
    posts.iter().map(PostResource::from).collect()
}

/// RFC 3339 in UTC with microsecond precision, e.g. `2024-01-01T00:00:00.000000Z`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn resource_exposes_exactly_four_fields() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let post = Post {
            id: 5,
            title: "Post Modificado".into(),
            created_at: ts,
            updated_at: ts,
        };

        let value = serde_json::to_value(PostResource::from(&post)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 5,
                "title": "Post Modificado",
                "created_at": "2024-01-02T03:04:05.000000Z",
                "updated_at": "2024-01-02T03:04:05.000000Z"
            })
        );
    }

    #[test]
    fn timestamps_parse_back_as_rfc3339() {
        let now = Utc::now();
        let formatted = format_timestamp(&now);
        let parsed = DateTime::parse_from_rfc3339(&formatted).unwrap();
        assert_eq!(parsed.timestamp(), now.timestamp());
    }
}
