//! Editorial articles. Written outside this crate, only listed here.

use serde::{Deserialize, Serialize};

pub type ArticleId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub category: Option<String>,
    pub content: String,
    pub read_time_minutes: Option<i64>,
    pub created_at: String,
}
