use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexicon::Genre;

/// How a search string should be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// Comma-separated or marker-driven filters ("phim hoạt hình, nhật bản, năm 2023").
    Structured,
    /// A bare title ("Mai", "Fast & Furious 10").
    TitleSearch,
    /// A conversational request ("tìm phim tình cảm hàn quốc hay nhất").
    Natural,
}

impl QueryType {
    pub const ALL: [QueryType; 3] = [
        QueryType::Structured,
        QueryType::TitleSearch,
        QueryType::Natural,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            QueryType::Structured => "structured",
            QueryType::TitleSearch => "title_search",
            QueryType::Natural => "natural",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters and classification extracted from one search string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub query_type: QueryType,
    /// Canonical genres in first-seen order, no duplicates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<Genre>,
    /// Canonical (English) country name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Release year, always within 1900..=2039.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Title-cased movie title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_title: Option<String>,
    /// Category names suggested by the semantic fallback.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// The input exactly as received.
    pub original_query: String,
}

impl ExtractionResult {
    /// A result with no filters, used for blank input and as the starting
    /// point of every extractor.
    pub fn empty(query_type: QueryType, original_query: &str) -> Self {
        Self {
            query_type,
            genres: Vec::new(),
            country: None,
            year: None,
            movie_title: None,
            keywords: Vec::new(),
            original_query: original_query.to_string(),
        }
    }

    /// Append a genre unless it is already present.
    pub fn push_genre(&mut self, genre: Genre) {
        if !self.genres.contains(&genre) {
            self.genres.push(genre);
        }
    }

    /// True when lexical extraction found nothing to filter on and a
    /// semantic lookup may add advisory keywords.
    pub fn needs_semantic_fallback(&self) -> bool {
        self.query_type == QueryType::Natural
            && self.genres.is_empty()
            && self.country.is_none()
            && self.movie_title.is_none()
    }

    /// True when any of genre, country, year, or title was found.
    pub fn has_filters(&self) -> bool {
        !self.genres.is_empty()
            || self.country.is_some()
            || self.year.is_some()
            || self.movie_title.is_some()
    }

    /// One-line rendering for search result headers.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if let Some(title) = &self.movie_title {
            parts.push(format!("Tên phim: {title}"));
        }
        if !self.genres.is_empty() {
            let labels: Vec<&str> = self.genres.iter().map(|g| g.label()).collect();
            parts.push(format!("Thể loại: {}", labels.join(", ")));
        }
        if let Some(country) = &self.country {
            parts.push(format!("Quốc gia: {}", crate::normalize::title_case(country)));
        }
        if let Some(year) = self.year {
            parts.push(format!("Năm: {year}"));
        }
        if !self.keywords.is_empty() {
            parts.push(format!("Từ khóa: {}", self.keywords.join(", ")));
        }

        if parts.is_empty() {
            "Không phát hiện từ khóa cụ thể".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.query_type, self.summary())
    }
}
