use async_trait::async_trait;
use chrono::NaiveDateTime;
use im_core::{Article, ArticleStore, Error, Result, StoredArticle};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::{Path, PathBuf};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT NOT NULL,
        title TEXT NOT NULL,
        subtitle TEXT NOT NULL,
        author TEXT NOT NULL,
        publication_date TEXT,
        content TEXT
    )
    "#,
    // Add future migrations here
];

pub struct SQLiteStorage {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| Error::Storage(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

fn row_to_article(row: &SqliteRow) -> std::result::Result<StoredArticle, sqlx::Error> {
    Ok(StoredArticle::new(
        row.try_get("id")?,
        Article {
            url: row.try_get("url")?,
            title: row.try_get("title")?,
            subtitle: row.try_get("subtitle")?,
            author: row.try_get("author")?,
            publication_date: row.try_get::<Option<NaiveDateTime>, _>("publication_date")?,
            content: row.try_get("content")?,
        },
    ))
}

#[async_trait]
impl ArticleStore for SQLiteStorage {
    async fn save_all(&self, articles: &[Article]) -> Result<Vec<StoredArticle>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Storage(format!("Failed to open transaction: {}", e)))?;

        let mut stored = Vec::with_capacity(articles.len());
        for article in articles {
            let result = sqlx::query(
                r#"
                INSERT INTO articles
                (url, title, subtitle, author, publication_date, content)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&article.url)
            .bind(&article.title)
            .bind(&article.subtitle)
            .bind(&article.author)
            .bind(article.publication_date)
            .bind(article.content.as_deref())
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Storage(format!("Failed to store article {}: {}", article.url, e)))?;

            stored.push(StoredArticle::new(result.last_insert_rowid(), article.clone()));
        }

        tx.commit()
            .await
            .map_err(|e| Error::Storage(format!("Failed to commit articles: {}", e)))?;
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<StoredArticle>> {
        let rows = sqlx::query(
            r#"
            SELECT id, url, title, subtitle, author, publication_date, content
            FROM articles
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("Failed to list articles: {}", e)))?;

        rows.iter()
            .map(row_to_article)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Storage(format!("Failed to read article row: {}", e)))
    }
}
