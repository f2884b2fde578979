use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::domain::report::today;
use crate::domain::MovieEntry;
use crate::extractor::text::{collapse_whitespace, parse_leading_int, with_year, year_from_link};
use crate::extractor::Extractor;

/// Section ids on the top-10 page, in output order.
pub const STREAMING_SERVICES: [&str; 4] = ["netflix-1", "hbo-1", "amazon-prime-1", "apple-tv-1"];

/// Rows taken from each service table.
pub const ROWS_PER_SERVICE: usize = 2;

static ROWS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody tr").unwrap());
static TITLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td:nth-child(2) a").unwrap());
static TITLE_TEXT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div:last-child").unwrap());
static ORIGINAL_BADGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"span[title*="original"]"#).unwrap());
static POINTS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td:nth-child(3)").unwrap());

/// Reads the per-service top-10 tables.
#[derive(Debug, Clone, Default)]
pub struct FlixPatrolExtractor;

impl FlixPatrolExtractor {
    pub fn new() -> Self {
        Self
    }

    fn parse_row(row: ElementRef<'_>, rank: u32, service: &str, date: &str) -> MovieEntry {
        let link = row.select(&TITLE_LINK).next();

        let title_text = link
            .map(|a| {
                a.select(&TITLE_TEXT)
                    .flat_map(|div| div.text())
                    .collect::<String>()
            })
            .unwrap_or_default();
        let href = link.and_then(|a| a.value().attr("href")).unwrap_or("");

        let title = with_year(title_text.trim(), year_from_link(href));

        let points_text = row
            .select(&POINTS)
            .next()
            .map(|td| td.text().collect::<String>())
            .unwrap_or_default();

        MovieEntry {
            rank: Some(rank),
            title: collapse_whitespace(&title),
            is_original: Some(row.select(&ORIGINAL_BADGE).next().is_some()),
            points: Some(parse_leading_int(points_text.trim())),
            platform: Some(platform_name(service)),
            date: Some(date.to_string()),
            ..Default::default()
        }
    }
}

impl Extractor for FlixPatrolExtractor {
    fn extract(&self, html: &str) -> Vec<MovieEntry> {
        let document = Html::parse_document(html);
        let date = today();
        let mut results = Vec::new();

        for service in STREAMING_SERVICES {
            let Ok(section_selector) = Selector::parse(&format!("#{}", service)) else {
                continue;
            };
            let Some(section) = document.select(&section_selector).next() else {
                tracing::debug!("No {} section on page", service);
                continue;
            };

            for (index, row) in section.select(&ROWS).take(ROWS_PER_SERVICE).enumerate() {
                results.push(Self::parse_row(row, index as u32 + 1, service, &date));
            }
        }

        tracing::info!("Extracted {} entries from flixpatrol", results.len());
        results
    }
}

/// Display name for a section id: `amazon-prime-1` → `amazon prime`,
/// `netflix-1` → `netflix`.
pub fn platform_name(service: &str) -> String {
    let mut parts = service.split('-');
    let first = parts.next().unwrap_or_default();

    match parts.next() {
        Some(second) if !second.is_empty() && second.parse::<f64>().is_err() => {
            format!("{} {}", first, second)
        }
        _ => first.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html>
<html><body>
<div id="netflix-1">
  <table>
    <thead><tr><th>#</th><th>Title</th><th>Points</th></tr></thead>
    <tbody>
      <tr>
        <td>1.</td>
        <td><a href="/title/the-gray-man-2022/"><div><img src="x.jpg"></div><div>The   Gray
          Man</div></a><span title="Netflix original">N</span></td>
        <td>954</td>
      </tr>
      <tr>
        <td>2.</td>
        <td><a href="/title/purple-hearts/"><div><img src="y.jpg"></div><div>Purple Hearts</div></a></td>
        <td> 1,210 </td>
      </tr>
      <tr>
        <td>3.</td>
        <td><a href="/title/not-taken-2020/"><div>Not Taken</div></a></td>
        <td>100</td>
      </tr>
    </tbody>
  </table>
</div>
<div id="amazon-prime-1">
  <table>
    <tbody>
      <tr>
        <td>1.</td>
        <td><a href="/title/thirteen-lives-2022"><div>Thirteen Lives</div></a></td>
        <td>n/a</td>
      </tr>
    </tbody>
  </table>
</div>
<div id="apple-tv-1">
  <table>
    <tbody>
      <tr><td>1.</td><td>no link here</td></tr>
    </tbody>
  </table>
</div>
</body></html>"#;

    #[test]
    fn test_extracts_expected_fields() {
        let entries = FlixPatrolExtractor::new().extract(SAMPLE);

        assert_eq!(entries.len(), 4);

        assert_eq!(entries[0].rank, Some(1));
        assert_eq!(entries[0].title, "The Gray Man (2022)");
        assert_eq!(entries[0].is_original, Some(true));
        assert_eq!(entries[0].points, Some(Some(954)));
        assert_eq!(entries[0].platform.as_deref(), Some("netflix"));

        assert_eq!(entries[1].rank, Some(2));
        assert_eq!(entries[1].title, "Purple Hearts");
        assert_eq!(entries[1].is_original, Some(false));
        assert_eq!(entries[1].points, Some(Some(1)));
    }

    #[test]
    fn test_takes_two_rows_per_service() {
        let entries = FlixPatrolExtractor::new().extract(SAMPLE);
        let netflix = entries
            .iter()
            .filter(|e| e.platform.as_deref() == Some("netflix"))
            .count();
        assert_eq!(netflix, 2);
        assert!(entries.iter().all(|e| e.title != "Not Taken (2020)"));
    }

    #[test]
    fn test_year_at_end_of_href_and_missing_points() {
        let entries = FlixPatrolExtractor::new().extract(SAMPLE);
        let prime = &entries[2];

        assert_eq!(prime.title, "Thirteen Lives (2022)");
        assert_eq!(prime.platform.as_deref(), Some("amazon prime"));
        assert_eq!(prime.points, Some(None));
        assert_eq!(prime.rank, Some(1));

        let json = serde_json::to_value(prime).unwrap();
        assert!(json.get("points").is_some_and(|p| p.is_null()));
    }

    #[test]
    fn test_row_without_link_passes_through_empty() {
        let entries = FlixPatrolExtractor::new().extract(SAMPLE);
        let apple = &entries[3];

        assert_eq!(apple.platform.as_deref(), Some("apple tv"));
        assert_eq!(apple.title, "");
        assert_eq!(apple.points, Some(None));
        assert_eq!(apple.is_original, Some(false));
    }

    #[test]
    fn test_every_entry_is_dated() {
        let entries = FlixPatrolExtractor::new().extract(SAMPLE);
        assert!(entries
            .iter()
            .all(|e| e.date.as_ref().is_some_and(|d| d.len() == 10)));
    }

    #[test]
    fn test_platform_name() {
        assert_eq!(platform_name("netflix-1"), "netflix");
        assert_eq!(platform_name("hbo-1"), "hbo");
        assert_eq!(platform_name("amazon-prime-1"), "amazon prime");
        assert_eq!(platform_name("apple-tv-1"), "apple tv");
        assert_eq!(platform_name("disney"), "disney");
    }
}
