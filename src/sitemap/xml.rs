use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use super::entry::SitemapEntry;
use crate::util::format_date;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://www.sitemaps.org/schemas/sitemap/0.9 http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd";

/// Renders entries as a sitemaps.org 0.9 document, indented by two spaces.
///
/// Every `<url>` holds `<loc>`, `<lastmod>`, `<changefreq>` and
/// `<priority>`, in that order. Text content is XML-escaped.
pub fn render(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("Failed to write XML declaration")?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    urlset.push_attribute(("xmlns:xsi", XSI_NS));
    urlset.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    writer
        .write_event(Event::Start(urlset))
        .context("Failed to write urlset element")?;

    for entry in entries {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .context("Failed to write url element")?;

        let lastmod = format_date(entry.lastmod);
        let priority = entry.priority_str();
        let fields = [
            ("loc", entry.loc.as_str()),
            ("lastmod", lastmod.as_str()),
            ("changefreq", entry.changefreq.as_str()),
            ("priority", priority.as_str()),
        ];
        for (name, value) in fields {
            write_text_element(&mut writer, name, value)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("url")))
            .context("Failed to write url end")?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .context("Failed to write urlset end")?;

    let mut result = writer.into_inner().into_inner();
    result.push(b'\n');
    String::from_utf8(result).context("Generated sitemap contains invalid UTF-8")
}

fn write_text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    value: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .with_context(|| format!("Failed to write {name} element"))?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .with_context(|| format!("Failed to write {name} text"))?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .with_context(|| format!("Failed to write {name} end"))?;
    Ok(())
}
