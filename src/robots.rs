//! robots.txt generation.
use crate::routes::{self, RouteError, UrlResolver};

/// Paths crawlers must stay out of: admin, authentication and API endpoints.
const DISALLOWED: &[&str] = &["/admin/", "/auth/", "/api/"];

/// Private listings, either flagged by query string or under `/private/`.
const PRIVATE_DISALLOWED: &[&str] = &["/*?private=*", "/private/"];

/// Seconds between requests.
const CRAWL_DELAY: u32 = 1;

/// Builds the robots.txt body, pointing crawlers at the absolute sitemap URL.
///
/// # Errors
///
/// Fails if the `sitemap` route can't be resolved.
pub fn generate_robots_txt<R: UrlResolver + ?Sized>(resolver: &R) -> Result<String, RouteError> {
    let sitemap_url = resolver.url_for(routes::SITEMAP, &[])?;

    let mut out = String::with_capacity(256);
    out.push_str("User-agent: *\nAllow: /\n\n");

    out.push_str("# Sitemap\n");
    out.push_str(&format!("Sitemap: {sitemap_url}\n\n"));

    out.push_str("# Admin and account areas\n");
    for path in DISALLOWED {
        out.push_str(&format!("Disallow: {path}\n"));
    }
    out.push('\n');

    out.push_str("# Private content\n");
    for path in PRIVATE_DISALLOWED {
        out.push_str(&format!("Disallow: {path}\n"));
    }
    out.push('\n');

    out.push_str("# Crawl delay (seconds)\n");
    out.push_str(&format!("Crawl-delay: {CRAWL_DELAY}\n"));

    tracing::debug!(sitemap = %sitemap_url, "Generated robots.txt");
    Ok(out)
}
