//! Sitemap and robots.txt generation for a directory website.
//!
//! - [`sitemap`] turns the category tree and public websites into a
//!   sitemaps.org 0.9 document
//! - [`robots`] renders the crawler policy pointing at that sitemap
//! - [`storage`] reads the directory's SQLite database
//! - [`routes`] resolves named routes to absolute URLs

pub mod config;
pub mod robots;
pub mod routes;
pub mod sitemap;
pub mod storage;
pub mod util;
