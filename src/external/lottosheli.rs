use regex::Regex;
use reqwest::Client;
use std::time::Duration;

use crate::config::FeedConfig;
use crate::error::{AppError, AppResult};

/// A fully-specified draw as reported by the results page. Only the newest
/// draw is ever available in this form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDraw {
    pub draw_number: i64,
    /// DD/MM/YYYY as displayed on the page
    pub draw_date: String,
    pub numbers: [i32; 6],
    pub strong_number: i32,
}

/// A catalog entry from the draw dropdown: id and date only. The page never
/// exposes the winning numbers of older draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedCatalogEntry {
    pub draw_number: i64,
    pub draw_date: String,
}

/// Client for the public lottery results page.
///
/// Capability is asymmetric: `fetch_latest` returns full numbers for the
/// single newest draw, `fetch_range` only returns id + date metadata for
/// anything older.
#[derive(Clone)]
pub struct LottoFeed {
    client: Client,
    config: FeedConfig,
}

impl LottoFeed {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn get_results_page(&self) -> AppResult<String> {
        let response = self
            .client
            .get(&self.config.base_url)
            .header("User-Agent", &self.config.user_agent)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(|e| AppError::SourceUnavailable(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::SourceUnavailable(format!(
                "results page returned {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::SourceUnavailable(format!("failed to read results page: {e}")))
    }

    /// Fetch the newest draw with its full numbers.
    pub async fn fetch_latest(&self) -> AppResult<FeedDraw> {
        let html = self.get_results_page().await?;

        let (draw_number, draw_date) = parse_draw_headers(&html)
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::SourceUnavailable("no draw listing found on results page".to_string())
            })?;

        let (numbers, strong_number) = extract_winning_numbers(&html).ok_or_else(|| {
            AppError::SourceUnavailable(format!(
                "winning numbers for draw {draw_number} not found on results page"
            ))
        })?;

        Ok(FeedDraw {
            draw_number,
            draw_date,
            numbers,
            strong_number,
        })
    }

    /// Catalog of draws with `from <= draw_number <= to`, ascending.
    /// Metadata only; numbers for these draws require manual entry.
    pub async fn fetch_range(&self, from: i64, to: i64) -> AppResult<Vec<FeedCatalogEntry>> {
        let html = self.get_results_page().await?;

        let mut entries: Vec<FeedCatalogEntry> = parse_draw_headers(&html)
            .into_iter()
            .filter(|(n, _)| (from..=to).contains(n))
            .map(|(draw_number, draw_date)| FeedCatalogEntry {
                draw_number,
                draw_date,
            })
            .collect();

        entries.sort_by_key(|e| e.draw_number);
        entries.dedup_by_key(|e| e.draw_number);
        Ok(entries)
    }
}

/// Parse every `<option>` of the draw dropdown into (draw_number, DD/MM/YYYY).
/// Option text looks like "מספר הגרלה: 3878 תאריך: 16.12.2025"; ordering on
/// the page is newest first and is preserved here.
fn parse_draw_headers(html: &str) -> Vec<(i64, String)> {
    let option_re = Regex::new(r"(?s)<option[^>]*>(.*?)</option>").unwrap();
    let header_re = Regex::new(r"(\d+).*?(\d{2}\.\d{2}\.\d{4})").unwrap();

    let mut headers = Vec::new();
    for cap in option_re.captures_iter(html) {
        if let Some(h) = header_re.captures(&cap[1])
            && let Ok(draw_number) = h[1].parse::<i64>()
        {
            headers.push((draw_number, h[2].replace('.', "/")));
        }
    }
    headers
}

/// Scan short digit-only element texts for the displayed balls: the first six
/// values in [1,37] are the main numbers, the next value in [1,7] is the
/// strong number.
fn extract_winning_numbers(html: &str) -> Option<([i32; 6], i32)> {
    let ball_re = Regex::new(r">\s*(\d{1,2})\s*<").unwrap();

    let mut numbers: Vec<i32> = Vec::new();
    let mut strong: Option<i32> = None;

    for cap in ball_re.captures_iter(html) {
        let num = cap[1].parse::<i32>().unwrap_or(0);
        if (1..=37).contains(&num) && numbers.len() < 6 {
            numbers.push(num);
        } else if (1..=7).contains(&num) && numbers.len() == 6 && strong.is_none() {
            strong = Some(num);
        }
    }

    if numbers.len() != 6 {
        return None;
    }
    let numbers: [i32; 6] = numbers.try_into().ok()?;
    Some((numbers, strong?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<select name="draw_select">
  <option value="3878">מספר הגרלה: 3878 תאריך: 16.12.2025</option>
  <option value="3877">מספר הגרלה: 3877 תאריך: 13.12.2025</option>
  <option value="3876">מספר הגרלה: 3876 תאריך: 11.12.2025</option>
</select>
<div class="balls">
  <span>3</span><span>9</span><span>14</span>
  <span>22</span><span>30</span><span>36</span>
</div>
<div class="strong"><span>5</span></div>
</body></html>
"#;

    #[test]
    fn test_parse_draw_headers() {
        let headers = parse_draw_headers(PAGE);
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[0], (3878, "16/12/2025".to_string()));
        assert_eq!(headers[2], (3876, "11/12/2025".to_string()));
    }

    #[test]
    fn test_extract_winning_numbers() {
        let (numbers, strong) = extract_winning_numbers(PAGE).unwrap();
        assert_eq!(numbers, [3, 9, 14, 22, 30, 36]);
        assert_eq!(strong, 5);
    }

    #[test]
    fn test_extract_winning_numbers_incomplete_page() {
        let html = "<div><span>3</span><span>9</span></div>";
        assert!(extract_winning_numbers(html).is_none());
    }

    #[test]
    fn test_parse_draw_headers_ignores_malformed_options() {
        let html = "<select><option>choose a draw</option>\
                    <option>מספר הגרלה: 3878 תאריך: 16.12.2025</option></select>";
        let headers = parse_draw_headers(html);
        assert_eq!(headers, vec![(3878, "16/12/2025".to_string())]);
    }
}
