use anyhow::{bail, Result};

use super::schema::Database;
use super::types::{NewWebsite, Website};

impl Database {
    // ========================================================================
    // Website Operations
    // ========================================================================

    /// Insert a website, returning its ID.
    ///
    /// A missing `created_at` is stored as NULL, matching rows imported
    /// before the column existed.
    pub async fn insert_website(&self, website: &NewWebsite) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
                INSERT INTO websites (title, url, is_private, category_id, created_at)
                VALUES (?, ?, ?, ?, ?)
                RETURNING id
            "#,
        )
        .bind(&website.title)
        .bind(&website.url)
        .bind(website.is_private)
        .bind(website.category_id)
        .bind(website.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// All public websites, ordered by ID.
    pub async fn get_public_websites(&self) -> Result<Vec<Website>> {
        let websites: Vec<Website> = sqlx::query_as(
            r#"
                SELECT id, title, url, is_private, last_view, created_at
                FROM websites
                WHERE is_private = 0
                ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = websites.len(), "Loaded public websites");
        Ok(websites)
    }

    /// Record a visit through the website's redirect page at `at` (Unix seconds).
    pub async fn record_view(&self, website_id: i64, at: i64) -> Result<()> {
        let result = sqlx::query("UPDATE websites SET last_view = ? WHERE id = ?")
            .bind(at)
            .bind(website_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            bail!("Website {} does not exist", website_id);
        }
        Ok(())
    }

    /// Change a website's visibility.
    pub async fn set_website_private(&self, website_id: i64, is_private: bool) -> Result<()> {
        let result = sqlx::query("UPDATE websites SET is_private = ? WHERE id = ?")
            .bind(is_private)
            .bind(website_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            bail!("Website {} does not exist", website_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{Database, NewWebsite};

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    fn site(title: &str, is_private: bool) -> NewWebsite {
        NewWebsite {
            title: title.to_string(),
            url: format!("https://{}.example.com", title.to_lowercase()),
            is_private,
            category_id: None,
            created_at: Some(1_700_000_000),
        }
    }

    #[tokio::test]
    async fn test_only_public_websites_returned() {
        let db = test_db().await;

        let public = db.insert_website(&site("Public", false)).await.unwrap();
        db.insert_website(&site("Hidden", true)).await.unwrap();

        let websites = db.get_public_websites().await.unwrap();
        assert_eq!(websites.len(), 1);
        assert_eq!(websites[0].id, public);
        assert!(!websites[0].is_private);
        assert_eq!(websites[0].created_at, Some(1_700_000_000));
        assert_eq!(websites[0].last_view, None);
    }

    #[tokio::test]
    async fn test_public_websites_ordered_by_id() {
        let db = test_db().await;

        let a = db.insert_website(&site("Zeta", false)).await.unwrap();
        let b = db.insert_website(&site("Alpha", false)).await.unwrap();

        let ids: Vec<i64> = db
            .get_public_websites()
            .await
            .unwrap()
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn test_record_view_sets_last_view() {
        let db = test_db().await;

        let id = db.insert_website(&site("Viewed", false)).await.unwrap();
        db.record_view(id, 1_710_000_000).await.unwrap();

        let websites = db.get_public_websites().await.unwrap();
        assert_eq!(websites[0].last_view, Some(1_710_000_000));
    }

    #[tokio::test]
    async fn test_record_view_unknown_website() {
        let db = test_db().await;

        let result = db.record_view(42, 1_710_000_000).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_set_website_private_hides_it() {
        let db = test_db().await;

        let id = db.insert_website(&site("Toggle", false)).await.unwrap();
        db.set_website_private(id, true).await.unwrap();
        assert!(db.get_public_websites().await.unwrap().is_empty());

        db.set_website_private(id, false).await.unwrap();
        assert_eq!(db.get_public_websites().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_created_at_stored_as_null() {
        let db = test_db().await;

        let mut new = site("Legacy", false);
        new.created_at = None;
        db.insert_website(&new).await.unwrap();

        let websites = db.get_public_websites().await.unwrap();
        assert_eq!(websites[0].created_at, None);
    }
}
