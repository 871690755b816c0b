use chrono::NaiveDate;
use std::fmt;

/// How often a page is expected to change, as a hint to crawlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of page an entry points at.
///
/// Each kind carries a fixed change frequency and priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Category,
    Subcategory,
    Website,
    Search,
    About,
}

impl PageKind {
    pub fn changefreq(self) -> ChangeFreq {
        match self {
            PageKind::Home => ChangeFreq::Daily,
            PageKind::Category | PageKind::Subcategory | PageKind::Search => ChangeFreq::Weekly,
            PageKind::Website | PageKind::About => ChangeFreq::Monthly,
        }
    }

    /// Crawl priority in `[0.0, 1.0]`.
    pub fn priority(self) -> f32 {
        match self {
            PageKind::Home => 1.0,
            PageKind::Category => 0.8,
            PageKind::Subcategory => 0.7,
            PageKind::Website => 0.6,
            PageKind::Search => 0.5,
            PageKind::About => 0.3,
        }
    }
}

/// One `<url>` node of the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL of the page
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFreq,
    pub priority: f32,
    pub kind: PageKind,
}

impl SitemapEntry {
    pub fn new(kind: PageKind, loc: String, lastmod: NaiveDate) -> Self {
        Self {
            loc,
            lastmod,
            changefreq: kind.changefreq(),
            priority: kind.priority(),
            kind,
        }
    }

    /// Priority formatted with one decimal, e.g. `0.8`.
    pub fn priority_str(&self) -> String {
        format!("{:.1}", self.priority)
    }
}
