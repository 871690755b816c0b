//! URL resolution for named routes.
//!
//! The generators never build URLs by hand. They ask a [`UrlResolver`] for
//! the absolute URL of a named route (`index`, `category`, `site`, ...),
//! the way a web framework's reverse router would.
use std::collections::BTreeMap;
use thiserror::Error;
use url::Url;

/// Home page.
pub const INDEX: &str = "index";
/// A single category page, takes `id`.
pub const CATEGORY: &str = "category";
/// A website's detail/redirect page, takes `id`.
pub const SITE: &str = "site";
/// Search page.
pub const SEARCH: &str = "search";
/// Optional about page. Not defined by default.
pub const ABOUT: &str = "about";
/// The sitemap document itself.
pub const SITEMAP: &str = "sitemap";

/// Errors that can occur while resolving a route to a URL.
#[derive(Debug, Error)]
pub enum RouteError {
    /// No route with this name is defined.
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// The route template needs a parameter the caller did not supply.
    #[error("Route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },

    /// The template contains an opening brace with no closing one.
    #[error("Malformed template for route '{0}'")]
    MalformedTemplate(String),

    /// The base URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Maps a route name and parameters to an absolute URL.
pub trait UrlResolver {
    /// Resolves `route` to an absolute URL, substituting `params`.
    fn url_for(&self, route: &str, params: &[(&str, &str)]) -> Result<String, RouteError>;

    /// Whether `route` is defined at all.
    fn has_route(&self, route: &str) -> bool;
}

/// A table of path templates anchored at a base URL.
///
/// Templates are absolute paths with `{name}` placeholders, for example
/// `/category/{id}`. Each template segment is appended under the base URL's
/// path, and placeholder values are percent-encoded as part of their segment,
/// so a value containing `/` never splits into two segments.
#[derive(Debug, Clone)]
pub struct RouteTable {
    base_url: Url,
    routes: BTreeMap<String, String>,
}

impl RouteTable {
    /// Creates a table with the default routes of the directory site.
    pub fn new(base_url: &str) -> Result<Self, RouteError> {
        let base_url = Url::parse(base_url)?;
        match base_url.scheme() {
            "http" | "https" => {}
            scheme => return Err(RouteError::UnsupportedScheme(scheme.to_owned())),
        }

        let routes = Self::default_routes()
            .iter()
            .map(|(name, path)| (name.to_string(), path.to_string()))
            .collect();

        Ok(Self { base_url, routes })
    }

    fn default_routes() -> &'static [(&'static str, &'static str)] {
        &[
            (INDEX, "/"),
            (CATEGORY, "/category/{id}"),
            (SITE, "/site/{id}"),
            (SEARCH, "/search"),
            (SITEMAP, "/sitemap.xml"),
        ]
    }

    /// Defines or replaces a route.
    pub fn insert(&mut self, name: impl Into<String>, template: impl Into<String>) {
        self.routes.insert(name.into(), template.into());
    }

    /// Removes a route, returning its template if it was defined.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.routes.remove(name)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Substitutes `{name}` placeholders in one template segment.
    ///
    /// Values are inserted raw; percent-encoding happens when the segment
    /// is pushed onto the URL path.
    fn expand_segment(
        route: &str,
        segment: &str,
        params: &[(&str, &str)],
    ) -> Result<String, RouteError> {
        let mut out = String::with_capacity(segment.len());
        let mut rest = segment;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| RouteError::MalformedTemplate(route.to_owned()))?;
            let name = &after[..close];
            let value = params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| RouteError::MissingParam {
                    route: route.to_owned(),
                    param: name.to_owned(),
                })?;
            out.push_str(value);
            rest = &after[close + 1..];
        }
        out.push_str(rest);

        Ok(out)
    }
}

impl UrlResolver for RouteTable {
    fn url_for(&self, route: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let template = self
            .routes
            .get(route)
            .ok_or_else(|| RouteError::UnknownRoute(route.to_owned()))?;

        let segments = template
            .trim_start_matches('/')
            .split('/')
            .map(|segment| Self::expand_segment(route, segment, params))
            .collect::<Result<Vec<_>, _>>()?;

        // Segments are appended under the base path, so a base prefix
        // (e.g. https://host/dir) is kept and the result stays on the base host.
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| RouteError::UnsupportedScheme(self.base_url.scheme().to_owned()))?;
            path.pop_if_empty();
            for segment in &segments {
                path.push(segment);
            }
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(url.to_string())
    }

    fn has_route(&self, route: &str) -> bool {
        self.routes.contains_key(route)
    }
}
