use chrono::NaiveDate;

use super::entry::{PageKind, SitemapEntry};
use crate::routes::{self, RouteError, UrlResolver};
use crate::storage::{Category, Website};
use crate::util::timestamp_to_date;

/// Builds the ordered list of sitemap entries.
///
/// Order: home, each top-level category followed by its direct children,
/// public websites, search, then about if the resolver defines it.
/// Categories with a parent in `categories` are skipped; only the
/// `children` of top-level categories are emitted. Private websites are
/// skipped even if the caller passes them in.
///
/// # Errors
///
/// Fails if any required route (`index`, `category`, `site`, `search`)
/// cannot be resolved. The about route is optional: an undefined or
/// unresolvable about route leaves the entry out and never fails the build.
pub fn build_entries<R: UrlResolver + ?Sized>(
    categories: &[Category],
    websites: &[Website],
    resolver: &R,
    today: NaiveDate,
) -> Result<Vec<SitemapEntry>, RouteError> {
    let mut entries = Vec::with_capacity(3 + categories.len() + websites.len());

    entries.push(SitemapEntry::new(
        PageKind::Home,
        resolver.url_for(routes::INDEX, &[])?,
        today,
    ));

    for category in categories.iter().filter(|c| c.is_top_level()) {
        entries.push(category_entry(PageKind::Category, category, resolver, today)?);
        for child in &category.children {
            entries.push(category_entry(PageKind::Subcategory, child, resolver, today)?);
        }
    }

    for website in websites.iter().filter(|w| !w.is_private) {
        let id = website.id.to_string();
        entries.push(SitemapEntry::new(
            PageKind::Website,
            resolver.url_for(routes::SITE, &[("id", id.as_str())])?,
            website_lastmod(website, today),
        ));
    }

    entries.push(SitemapEntry::new(
        PageKind::Search,
        resolver.url_for(routes::SEARCH, &[])?,
        today,
    ));

    if resolver.has_route(routes::ABOUT) {
        match resolver.url_for(routes::ABOUT, &[]) {
            Ok(loc) => entries.push(SitemapEntry::new(PageKind::About, loc, today)),
            Err(e) => {
                tracing::warn!(error = %e, "About route does not resolve, skipping");
            }
        }
    } else {
        tracing::debug!("No about route defined, skipping");
    }

    Ok(entries)
}

fn category_entry<R: UrlResolver + ?Sized>(
    kind: PageKind,
    category: &Category,
    resolver: &R,
    today: NaiveDate,
) -> Result<SitemapEntry, RouteError> {
    let id = category.id.to_string();
    let loc = resolver.url_for(routes::CATEGORY, &[("id", id.as_str())])?;
    Ok(SitemapEntry::new(kind, loc, today))
}

/// Last-viewed date, else creation date, else `today`.
///
/// A timestamp chrono can't represent is treated as absent.
pub fn website_lastmod(website: &Website, today: NaiveDate) -> NaiveDate {
    website
        .last_view
        .and_then(timestamp_to_date)
        .or_else(|| website.created_at.and_then(timestamp_to_date))
        .unwrap_or(today)
}
