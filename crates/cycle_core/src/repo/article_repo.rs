//! Read-only article listing.

use crate::model::article::Article;
use crate::repo::RepoResult;
use rusqlite::{Connection, Row};

pub trait ArticleRepository {
    /// Lists every article, newest first.
    fn list_articles(&self) -> RepoResult<Vec<Article>>;
}

pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn list_articles(&self) -> RepoResult<Vec<Article>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                title,
                category,
                content,
                read_time_minutes,
                created_at
             FROM articles
             ORDER BY created_at DESC, id DESC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next()? {
            articles.push(parse_article_row(row)?);
        }
        Ok(articles)
    }
}

fn parse_article_row(row: &Row<'_>) -> RepoResult<Article> {
    Ok(Article {
        id: row.get("id")?,
        title: row.get("title")?,
        category: row.get("category")?,
        content: row.get("content")?,
        read_time_minutes: row.get("read_time_minutes")?,
        created_at: row.get("created_at")?,
    })
}
