//! Property tests for sitemap entry construction.
//!
//! These run against arbitrary in-memory category trees and website sets,
//! without a database.

use chrono::NaiveDate;
use proptest::prelude::*;

use dirmap::routes::{RouteTable, ABOUT};
use dirmap::sitemap::{build_entries, render, PageKind};
use dirmap::storage::{Category, Website};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

/// Top-level categories with 0..5 children each. IDs are unique.
fn arb_categories() -> impl Strategy<Value = Vec<Category>> {
    prop::collection::vec(0usize..5, 0..6).prop_map(|child_counts| {
        let mut next_id = 1;
        child_counts
            .into_iter()
            .map(|count| {
                let id = next_id;
                next_id += 1;
                let children = (0..count)
                    .map(|_| {
                        let child_id = next_id;
                        next_id += 1;
                        Category {
                            id: child_id,
                            name: format!("Child {child_id}"),
                            parent_id: Some(id),
                            sort_order: 0,
                            children: Vec::new(),
                        }
                    })
                    .collect();
                Category {
                    id,
                    name: format!("Category {id}"),
                    parent_id: None,
                    sort_order: 0,
                    children,
                }
            })
            .collect()
    })
}

fn arb_websites() -> impl Strategy<Value = Vec<Website>> {
    prop::collection::vec(
        (
            any::<bool>(),
            prop::option::of(0i64..4_000_000_000),
            prop::option::of(0i64..4_000_000_000),
        ),
        0..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (is_private, last_view, created_at))| Website {
                id: i as i64 + 1,
                title: format!("Site {i}"),
                url: format!("https://site{i}.example.org"),
                is_private,
                last_view,
                created_at,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn category_entries_match_tree_size(categories in arb_categories()) {
        let routes = RouteTable::new("https://dir.example.com").unwrap();
        let entries = build_entries(&categories, &[], &routes, today()).unwrap();

        let expected: usize = categories.len()
            + categories.iter().map(|c| c.children.len()).sum::<usize>();
        let actual = entries
            .iter()
            .filter(|e| matches!(e.kind, PageKind::Category | PageKind::Subcategory))
            .count();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn only_public_websites_emitted(websites in arb_websites()) {
        let routes = RouteTable::new("https://dir.example.com").unwrap();
        let entries = build_entries(&[], &websites, &routes, today()).unwrap();

        let public: Vec<String> = websites
            .iter()
            .filter(|w| !w.is_private)
            .map(|w| format!("https://dir.example.com/site/{}", w.id))
            .collect();
        let emitted: Vec<String> = entries
            .iter()
            .filter(|e| e.kind == PageKind::Website)
            .map(|e| e.loc.clone())
            .collect();
        prop_assert_eq!(emitted, public);
    }

    #[test]
    fn fixed_pages_appear_once(
        categories in arb_categories(),
        websites in arb_websites(),
        with_about in any::<bool>(),
    ) {
        let mut routes = RouteTable::new("https://dir.example.com").unwrap();
        if with_about {
            routes.insert(ABOUT, "/about");
        }
        let entries = build_entries(&categories, &websites, &routes, today()).unwrap();

        let count = |kind: PageKind| entries.iter().filter(|e| e.kind == kind).count();
        prop_assert_eq!(count(PageKind::Home), 1);
        prop_assert_eq!(count(PageKind::Search), 1);
        prop_assert_eq!(count(PageKind::About), usize::from(with_about));
        prop_assert_eq!(entries[0].kind, PageKind::Home);

        for entry in &entries {
            prop_assert!((0.0..=1.0).contains(&entry.priority));
        }
    }

    #[test]
    fn rendered_lastmod_is_always_a_date(websites in arb_websites()) {
        let routes = RouteTable::new("https://dir.example.com").unwrap();
        let entries = build_entries(&[], &websites, &routes, today()).unwrap();
        let xml = render(&entries).unwrap();

        let lastmods: Vec<&str> = xml
            .split("<lastmod>")
            .skip(1)
            .map(|rest| &rest[..rest.find("</lastmod>").unwrap()])
            .collect();
        prop_assert_eq!(lastmods.len(), entries.len());
        for lastmod in lastmods {
            prop_assert!(
                NaiveDate::parse_from_str(lastmod, "%Y-%m-%d").is_ok(),
                "bad date {}",
                lastmod
            );
            prop_assert_eq!(lastmod.len(), 10);
        }
    }
}
