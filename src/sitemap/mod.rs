//! sitemap.xml generation.
//!
//! Generation is split in two pure steps so each can be tested alone:
//!
//! - [`build_entries`] walks categories and websites and decides what goes
//!   into the sitemap, in which order, with which metadata
//! - [`render`] turns those entries into the XML document
//!
//! [`generate_sitemap`] wires both to the database.

mod builder;
mod entry;
mod xml;

pub use builder::{build_entries, website_lastmod};
pub use entry::{ChangeFreq, PageKind, SitemapEntry};
pub use xml::{render, SITEMAP_NS};

use anyhow::{Context, Result};

use crate::routes::UrlResolver;
use crate::storage::Database;
use crate::util::today;

/// Loads the directory from `db` and renders its sitemap for today's date.
///
/// # Errors
///
/// Fails if the database can't be read or a required route can't be
/// resolved. No partial document is returned.
pub async fn generate_sitemap<R: UrlResolver + ?Sized>(
    db: &Database,
    resolver: &R,
) -> Result<String> {
    let categories = db
        .get_top_level_categories()
        .await
        .context("Failed to load categories")?;
    let websites = db
        .get_public_websites()
        .await
        .context("Failed to load public websites")?;

    let entries = build_entries(&categories, &websites, resolver, today())
        .context("Failed to resolve sitemap URLs")?;
    tracing::info!(
        urls = entries.len(),
        categories = categories.len(),
        websites = websites.len(),
        "Generated sitemap"
    );

    render(&entries)
}
