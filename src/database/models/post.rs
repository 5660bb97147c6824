use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `posts` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the title and refresh `updated_at`; `id` and `created_at` are untouched
    pub fn retitle(&mut self, title: impl Into<String>) {
        self.title = title.into();
        // Never move backwards, even if the wall clock does
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
