//! Post field extraction
//!
//! Site markup is outside our control, so every field is located through a
//! prioritized chain of independent [`FieldStrategy`] implementations. The
//! first strategy that yields a usable value wins; if none does, the field
//! is absent. Article text is taken from the first configured container
//! whose cleaned text is long enough.

use crate::config::ExtractionConfig;
use crate::model::PostRecord;
use crate::{ConfigError, ExtractionError};
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Article containers tried in order when none are configured
const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    "article",
    "[itemprop='articleBody']",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".post-body",
    "main",
    ".content",
    ".main-content",
];

/// Elements whose text never belongs to the article body
const BOILERPLATE_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "nav", "aside", "footer", "header", "form", "template",
    "svg", "iframe", "button",
];

/// A way of locating one field's raw text in a document
pub trait FieldStrategy: Send + Sync {
    /// Returns the raw candidate value, or None when this strategy finds nothing
    fn locate(&self, document: &Html) -> Option<String>;
}

/// Text of the first matching element with non-blank text
struct FirstText(Selector);

impl FieldStrategy for FirstText {
    fn locate(&self, document: &Html) -> Option<String> {
        document
            .select(&self.0)
            .map(|element| collapse_whitespace(&element.text().collect::<Vec<_>>().join(" ")))
            .find(|text| !text.is_empty())
    }
}

/// An attribute of the first matching element with a non-blank value
struct FirstAttr(Selector, &'static str);

impl FieldStrategy for FirstAttr {
    fn locate(&self, document: &Html) -> Option<String> {
        document
            .select(&self.0)
            .filter_map(|element| element.value().attr(self.1))
            .map(collapse_whitespace)
            .find(|value| !value.is_empty())
    }
}

/// Text of every matching element, joined with ", " in document order
struct AllText(Selector);

impl FieldStrategy for AllText {
    fn locate(&self, document: &Html) -> Option<String> {
        join_distinct(
            document
                .select(&self.0)
                .map(|element| collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))),
        )
    }
}

/// An attribute of every matching element, joined with ", " in document order
struct AllAttr(Selector, &'static str);

impl FieldStrategy for AllAttr {
    fn locate(&self, document: &Html) -> Option<String> {
        join_distinct(
            document
                .select(&self.0)
                .filter_map(|element| element.value().attr(self.1))
                .map(collapse_whitespace),
        )
    }
}

fn join_distinct(values: impl Iterator<Item = String>) -> Option<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    if seen.is_empty() {
        None
    } else {
        Some(seen.join(", "))
    }
}

/// Tries each strategy in order and returns the first value accepted by `accept`
fn first_match<T>(
    chain: &[Box<dyn FieldStrategy>],
    document: &Html,
    accept: impl Fn(String) -> Option<T>,
) -> Option<T> {
    chain
        .iter()
        .filter_map(|strategy| strategy.locate(document))
        .find_map(accept)
}

/// Parses the publication date formats seen on blog bylines
///
/// Accepted, in order: RFC 3339 timestamps, `YYYY-MM-DD` anywhere in the
/// text, `MM/DD/YYYY`, `D Mon YYYY` and `Month D, YYYY`. Anything else is
/// treated as no date.
pub struct DateParser {
    iso: Regex,
    us_numeric: Regex,
    day_month_year: Regex,
    month_day_year: Regex,
}

impl DateParser {
    pub fn new() -> Result<Self, ConfigError> {
        // full names or exact abbreviations only
        const MONTH: &str = r"(Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?";
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern(e.to_string()))
        };

        Ok(Self {
            iso: compile(r"\b(\d{4})-(\d{2})-(\d{2})")?,
            us_numeric: compile(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b")?,
            day_month_year: compile(&format!(r"(?i)\b(\d{{1,2}})\s+{}\s+(\d{{4}})\b", MONTH))?,
            month_day_year: compile(&format!(r"(?i)\b{}\s+(\d{{1,2}}),?\s+(\d{{4}})\b", MONTH))?,
        })
    }

    /// Parses the first recognizable calendar date in `text`
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
            return Some(timestamp.date_naive());
        }

        if let Some(caps) = self.iso.captures(text) {
            if let Some(date) = ymd(&caps[1], &caps[2], &caps[3]) {
                return Some(date);
            }
        }

        if let Some(caps) = self.us_numeric.captures(text) {
            if let Some(date) = ymd(&caps[3], &caps[1], &caps[2]) {
                return Some(date);
            }
        }

        if let Some(caps) = self.day_month_year.captures(text) {
            if let Some(date) = ymd(&caps[3], &month_number(&caps[2])?.to_string(), &caps[1]) {
                return Some(date);
            }
        }

        if let Some(caps) = self.month_day_year.captures(text) {
            if let Some(date) = ymd(&caps[3], &month_number(&caps[1])?.to_string(), &caps[2]) {
                return Some(date);
            }
        }

        None
    }
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn month_number(name: &str) -> Option<u32> {
    let abbrev = name.get(..3)?;
    let position = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ]
    .iter()
    .position(|m| abbrev.eq_ignore_ascii_case(m))?;
    Some(position as u32 + 1)
}

/// Collapses every whitespace run to a single space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns a post page into a [`PostRecord`]
pub struct Extractor {
    title: Vec<Box<dyn FieldStrategy>>,
    date: Vec<Box<dyn FieldStrategy>>,
    category: Vec<Box<dyn FieldStrategy>>,
    tags: Vec<Box<dyn FieldStrategy>>,
    containers: Vec<(String, Selector)>,
    min_content_chars: usize,
    dates: DateParser,
}

fn selector(css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", css, e)))
}

impl Extractor {
    /// Builds the built-in strategy chains plus the configured container policy
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let title: Vec<Box<dyn FieldStrategy>> = vec![
            Box::new(FirstText(selector("h1")?)),
            Box::new(FirstAttr(selector("meta[property='og:title']")?, "content")),
            Box::new(FirstText(selector("title")?)),
        ];

        let date: Vec<Box<dyn FieldStrategy>> = vec![
            Box::new(FirstAttr(
                selector("meta[property='article:published_time']")?,
                "content",
            )),
            Box::new(FirstAttr(selector("meta[itemprop='datePublished']")?, "content")),
            Box::new(FirstAttr(selector("time[datetime]")?, "datetime")),
            Box::new(FirstText(selector("[itemprop='datePublished']")?)),
            Box::new(FirstText(selector("time")?)),
            Box::new(FirstText(selector(
                ".date, .post-date, .published, .entry-date, .byline",
            )?)),
        ];

        let category: Vec<Box<dyn FieldStrategy>> = vec![
            Box::new(FirstAttr(selector("meta[property='article:section']")?, "content")),
            Box::new(FirstText(selector(
                ".category, .post-category, .article-category",
            )?)),
            Box::new(FirstText(selector("a[rel~='category']")?)),
            Box::new(FirstText(selector("[class*='category']")?)),
        ];

        let tags: Vec<Box<dyn FieldStrategy>> = vec![
            Box::new(AllAttr(selector("meta[property='article:tag']")?, "content")),
            // exact match keeps WordPress `rel="category tag"` links out
            Box::new(AllText(selector("a[rel='tag']")?)),
            Box::new(AllText(selector(".tags a, .post-tags a, .article-tags a")?)),
        ];

        let container_css: Vec<String> = match &config.content_selectors {
            Some(configured) => configured.clone(),
            None => DEFAULT_CONTENT_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };
        let containers = container_css
            .into_iter()
            .map(|css| selector(&css).map(|sel| (css, sel)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title,
            date,
            category,
            tags,
            containers,
            min_content_chars: config.min_content_chars,
            dates: DateParser::new()?,
        })
    }

    /// Extracts structured fields and article text from a post page
    ///
    /// # Returns
    ///
    /// * `Ok(PostRecord)` - `content_text` is guaranteed non-empty
    /// * `Err(ExtractionError)` - No article container produced any text
    pub fn extract(&self, post_html: &str, post_url: &str) -> Result<PostRecord, ExtractionError> {
        let document = Html::parse_document(post_html);

        let content_text = self
            .content_text(&document)
            .ok_or_else(|| ExtractionError {
                url: post_url.to_string(),
                reason: "no article container with text found".to_string(),
            })?;

        let title = first_match(&self.title, &document, Some);
        let publication_date = first_match(&self.date, &document, |raw| self.dates.parse(&raw));
        let category = first_match(&self.category, &document, Some);
        let tags = first_match(&self.tags, &document, Some);

        tracing::trace!(
            url = post_url,
            chars = content_text.len(),
            has_title = title.is_some(),
            has_date = publication_date.is_some(),
            "Extracted post"
        );

        Ok(PostRecord {
            title,
            publication_date,
            category,
            tags,
            content_text,
        })
    }

    /// Picks the first container whose text reaches `min_content_chars`,
    /// falling back to the first container with any text at all
    fn content_text(&self, document: &Html) -> Option<String> {
        let mut fallback = None;

        for (css, sel) in &self.containers {
            let Some(element) = document.select(sel).next() else {
                continue;
            };

            let text = container_text(element);
            if text.is_empty() {
                continue;
            }

            if text.chars().count() >= self.min_content_chars {
                tracing::trace!(selector = %css, "Article container selected");
                return Some(text);
            }

            if fallback.is_none() {
                fallback = Some(text);
            }
        }

        fallback
    }
}

/// Text of a container with boilerplate descendants dropped
fn container_text(element: ElementRef) -> String {
    let mut parts = Vec::new();
    collect_text(element, &mut parts);
    collapse_whitespace(&parts.join(" "))
}

fn collect_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if !BOILERPLATE_ELEMENTS.contains(&child_element.value().name()) {
                collect_text(child_element, parts);
            }
        } else if let Some(text) = child.value().as_text() {
            parts.push(text);
        }
    }
}
