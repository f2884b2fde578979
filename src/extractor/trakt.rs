use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

use crate::domain::report::now_iso;
use crate::domain::{MovieEntry, MERGED_SNAPSHOT_LIMIT};
use crate::extractor::text::{collapse_whitespace, parse_count, with_year};
use crate::extractor::Extractor;

static GRID_ITEMS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.grid-item").unwrap());
static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".titles h3").unwrap());
static WATCHERS: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".titles h4").unwrap());

/// Reads the trending grid, keeping only items with a readable watcher count.
/// A missing or blank heading yields an empty title.
#[derive(Debug, Clone, Default)]
pub struct TraktExtractor;

impl TraktExtractor {
    pub fn new() -> Self {
        Self
    }

    fn parse_item(item: ElementRef<'_>, timestamp: &str) -> Option<MovieEntry> {
        let (name, year) = item
            .select(&HEADING)
            .next()
            .map(split_heading)
            .unwrap_or_default();
        let name = collapse_whitespace(name.trim());

        let watchers = item
            .select(&WATCHERS)
            .next()
            .and_then(|h4| parse_count(&h4.text().collect::<String>()))?;

        Some(MovieEntry {
            title: with_year(&name, year.as_deref()),
            watchers: Some(watchers),
            timestamp: Some(timestamp.to_string()),
            ..Default::default()
        })
    }
}

impl Extractor for TraktExtractor {
    fn extract(&self, html: &str) -> Vec<MovieEntry> {
        let document = Html::parse_document(html);
        let timestamp = now_iso();

        let results: Vec<MovieEntry> = document
            .select(&GRID_ITEMS)
            .take(MERGED_SNAPSHOT_LIMIT)
            .filter_map(|item| Self::parse_item(item, &timestamp))
            .collect();

        tracing::info!("Extracted {} entries from trakt", results.len());
        results
    }
}

/// Split an `<h3>Title <span class="year">2024</span></h3>` heading into the
/// title text and the year, if the year span holds four digits.
fn split_heading(heading: ElementRef<'_>) -> (String, Option<String>) {
    let mut name = String::new();
    let mut year = None;

    for child in heading.children() {
        match child.value() {
            Node::Text(text) => name.push_str(text),
            Node::Element(element) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                let text = child.text().collect::<String>();
                if element.has_class("year", scraper::CaseSensitivity::CaseSensitive) {
                    let text = text.trim();
                    if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
                        year = Some(text.to_string());
                    }
                } else {
                    name.push_str(&text);
                }
            }
            _ => {}
        }
    }

    (name, year)
}
