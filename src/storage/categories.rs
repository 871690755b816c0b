use anyhow::{bail, Result};

use super::schema::Database;
use super::types::{category_from_row, Category, CategoryRow};

impl Database {
    // ========================================================================
    // Category Operations
    // ========================================================================

    /// Strip control characters and surrounding whitespace from a category
    /// name, rejecting names that end up empty.
    fn sanitize_category_name(name: &str) -> Result<String> {
        let cleaned: String = name.chars().filter(|c| !c.is_control()).collect();
        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            bail!("Category name cannot be empty or whitespace-only");
        }
        Ok(trimmed.to_owned())
    }

    /// Create a category, returning its ID.
    ///
    /// `parent_id` must reference an existing category. Nesting deeper than
    /// one level is stored but never reaches the sitemap.
    pub async fn create_category(&self, name: &str, parent_id: Option<i64>) -> Result<i64> {
        self.create_category_with_order(name, parent_id, 0).await
    }

    /// Create a category with an explicit `sort_order`.
    pub async fn create_category_with_order(
        &self,
        name: &str,
        parent_id: Option<i64>,
        sort_order: i64,
    ) -> Result<i64> {
        let clean_name = Self::sanitize_category_name(name)?;

        if let Some(pid) = parent_id {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM categories WHERE id = ?")
                .bind(pid)
                .fetch_optional(&self.pool)
                .await?;
            if exists.is_none() {
                bail!("Parent category {} does not exist", pid);
            }
        }

        let row: (i64,) = sqlx::query_as(
            "INSERT INTO categories (name, parent_id, sort_order) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&clean_name)
        .bind(parent_id)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Load top-level categories with their direct children attached.
    ///
    /// Both levels are ordered by `sort_order`, then `id`. Grandchildren are
    /// not loaded.
    pub async fn get_top_level_categories(&self) -> Result<Vec<Category>> {
        let roots: Vec<CategoryRow> = sqlx::query_as(
            r#"
                SELECT id, name, parent_id, sort_order
                FROM categories
                WHERE parent_id IS NULL
                ORDER BY sort_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let children: Vec<CategoryRow> = sqlx::query_as(
            r#"
                SELECT c.id, c.name, c.parent_id, c.sort_order
                FROM categories c
                JOIN categories p ON p.id = c.parent_id
                WHERE p.parent_id IS NULL
                ORDER BY c.sort_order, c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut categories: Vec<Category> = roots.into_iter().map(category_from_row).collect();
        for child in children.into_iter().map(category_from_row) {
            if let Some(parent) = categories
                .iter_mut()
                .find(|c| Some(c.id) == child.parent_id)
            {
                parent.children.push(child);
            }
        }

        tracing::debug!(top_level = categories.len(), "Loaded categories");
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Database;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_create_top_level_category() {
        let db = test_db().await;

        let id = db.create_category("Tools", None).await.unwrap();
        assert!(id > 0);

        let categories = db.get_top_level_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Tools");
        assert!(categories[0].is_top_level());
        assert!(categories[0].children.is_empty());
    }

    #[tokio::test]
    async fn test_children_attached_to_parent() {
        let db = test_db().await;

        let dev = db.create_category("Development", None).await.unwrap();
        let design = db.create_category("Design", None).await.unwrap();
        let rust = db.create_category("Rust", Some(dev)).await.unwrap();
        let go = db.create_category("Go", Some(dev)).await.unwrap();
        let icons = db.create_category("Icons", Some(design)).await.unwrap();

        let categories = db.get_top_level_categories().await.unwrap();
        assert_eq!(categories.len(), 2);

        let dev_children: Vec<i64> = categories[0].children.iter().map(|c| c.id).collect();
        assert_eq!(dev_children, vec![rust, go]);
        let design_children: Vec<i64> = categories[1].children.iter().map(|c| c.id).collect();
        assert_eq!(design_children, vec![icons]);
    }

    #[tokio::test]
    async fn test_grandchildren_not_loaded() {
        let db = test_db().await;

        let root = db.create_category("Root", None).await.unwrap();
        let child = db.create_category("Child", Some(root)).await.unwrap();
        db.create_category("Grandchild", Some(child)).await.unwrap();

        let categories = db.get_top_level_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].children.len(), 1);
        assert_eq!(categories[0].children[0].id, child);
        assert!(categories[0].children[0].children.is_empty());
    }

    #[tokio::test]
    async fn test_ordering_by_sort_order_then_id() {
        let db = test_db().await;

        let late = db
            .create_category_with_order("Late", None, 10)
            .await
            .unwrap();
        let early_b = db.create_category_with_order("B", None, 1).await.unwrap();
        let early_a = db.create_category_with_order("A", None, 1).await.unwrap();

        let ids: Vec<i64> = db
            .get_top_level_categories()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![early_b, early_a, late]);
    }

    #[tokio::test]
    async fn test_missing_parent_rejected() {
        let db = test_db().await;

        let result = db.create_category("Orphan", Some(999)).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_name_sanitized() {
        let db = test_db().await;

        db.create_category("  \x07News\x00  ", None).await.unwrap();
        let categories = db.get_top_level_categories().await.unwrap();
        assert_eq!(categories[0].name, "News");
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let db = test_db().await;

        let result = db.create_category(" \t\n ", None).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }
}
