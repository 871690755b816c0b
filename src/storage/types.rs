use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Database-specific errors with user-friendly messages
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The web application holds a lock on the database
    #[error("The directory database is locked by another process. Try again shortly.")]
    InstanceLocked,

    /// Migration failed
    #[error("Database migration failed: {0}")]
    Migration(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Check if a sqlx error indicates database locking
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if is_lock_message(&err.to_string()) {
            return DatabaseError::InstanceLocked;
        }
        DatabaseError::Other(err)
    }
}

/// SQLITE_BUSY (5), SQLITE_LOCKED (6) and SQLITE_CANTOPEN (14) surface as these messages.
pub(crate) fn is_lock_message(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("database is locked")
        || message.contains("database table is locked")
        || message.contains("sqlite_busy")
        || message.contains("sqlite_locked")
        || message.contains("unable to open database file")
}

// ============================================================================
// Data Structures
// ============================================================================

/// A directory category.
///
/// Categories loaded through [`Database::get_top_level_categories`] carry
/// their direct children in `children`; children themselves always have an
/// empty `children` list.
///
/// [`Database::get_top_level_categories`]: super::Database::get_top_level_categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// `None` for top-level categories
    pub parent_id: Option<i64>,
    pub sort_order: i64,
    pub children: Vec<Category>,
}

impl Category {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A website listed in the directory.
///
/// Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Website {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub is_private: bool,
    /// Last time a visitor went through the site's redirect page
    pub last_view: Option<i64>,
    pub created_at: Option<i64>,
}

/// Fields for inserting a website
#[derive(Debug, Clone, Default)]
pub struct NewWebsite {
    pub title: String,
    pub url: String,
    pub is_private: bool,
    pub category_id: Option<i64>,
    pub created_at: Option<i64>,
}

/// Row type for category queries
pub(crate) type CategoryRow = (i64, String, Option<i64>, i64);

pub(crate) fn category_from_row((id, name, parent_id, sort_order): CategoryRow) -> Category {
    Category {
        id,
        name,
        parent_id,
        sort_order,
        children: Vec::new(),
    }
}
