//! Query type classification.
//!
//! Rules are tried top to bottom and the first match decides. The order is a
//! precedence: a request phrase wins over commas and country names, and a
//! short bare string is read as a title unless it carries filter vocabulary.

use std::sync::LazyLock;

use bitflags::bitflags;
use regex::Regex;

use crate::intent::QueryType;
use crate::lexicon::{
    COUNTRY_HINTS, GENRE_HINTS, NATURAL_INDICATORS, STRUCTURED_MARKERS, YEAR_WORDS,
};
use crate::normalize::{self, char_len};
use crate::parser::matching::{RE_MOVIE_COUNTRY, RE_MOVIE_YEAR};

/// Longest query (in characters) the short-query rule treats as a title.
const SHORT_QUERY_MAX_CHARS: usize = 20;
/// Most whitespace-separated tokens the short-query rule treats as a title.
const SHORT_QUERY_MAX_TOKENS: usize = 3;

/// One classification rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub verdict: QueryType,
}

/// Classification rules in precedence order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "natural-indicator",
        matches: has_natural_indicator,
        verdict: QueryType::Natural,
    },
    Rule {
        name: "structured-marker",
        matches: has_structured_marker,
        verdict: QueryType::Structured,
    },
    Rule {
        name: "title-shape",
        matches: is_title_shaped,
        verdict: QueryType::TitleSearch,
    },
    Rule {
        name: "movie-country-or-year",
        matches: is_movie_country_or_year,
        verdict: QueryType::Structured,
    },
    Rule {
        name: "short-bare-query",
        matches: is_short_bare_query,
        verdict: QueryType::TitleSearch,
    },
];

/// Latin-only shapes typical of foreign or proper-noun titles.
static TITLE_SHAPES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // "fast & furious 10"
        Regex::new(r"^[A-Za-z0-9\s&]+$").unwrap(),
        // "phim 2012"
        Regex::new(r"^[A-Za-z]+\s+[0-9]+$").unwrap(),
        // "sherlock holmes"
        Regex::new(r"^[A-Za-z]{2,}(?:\s+[A-Za-z]+)*$").unwrap(),
    ]
});

bitflags! {
    /// Filter vocabulary present in a query.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Signals: u8 {
        const COUNTRY = 0b0000_0001;
        const GENRE = 0b0000_0010;
        const YEAR_WORD = 0b0000_0100;
    }
}

/// Classify a raw search string.
pub fn classify(query: &str) -> QueryType {
    classify_prepared(&normalize::prepare(query))
}

/// Classify a query that has already been through [`normalize::prepare`].
pub(crate) fn classify_prepared(query: &str) -> QueryType {
    for rule in RULES {
        if (rule.matches)(query) {
            tracing::debug!(rule = rule.name, verdict = %rule.verdict, "query classified");
            return rule.verdict;
        }
    }
    tracing::debug!(verdict = %QueryType::Natural, "no rule matched, defaulting");
    QueryType::Natural
}

/// Which kinds of filter vocabulary the query mentions.
pub fn signals(query: &str) -> Signals {
    let mut found = Signals::empty();
    if COUNTRY_HINTS.iter().any(|w| query.contains(w)) {
        found |= Signals::COUNTRY;
    }
    if GENRE_HINTS.iter().any(|w| query.contains(w)) {
        found |= Signals::GENRE;
    }
    if YEAR_WORDS.iter().any(|w| query.contains(w)) {
        found |= Signals::YEAR_WORD;
    }
    found
}

// ── Rules ────────────────────────────────────────────────────────

pub fn has_natural_indicator(query: &str) -> bool {
    NATURAL_INDICATORS.iter().any(|p| query.contains(p))
}

pub fn has_structured_marker(query: &str) -> bool {
    query.contains(',') || STRUCTURED_MARKERS.iter().any(|m| query.contains(m))
}

pub fn is_title_shaped(query: &str) -> bool {
    TITLE_SHAPES.iter().any(|re| re.is_match(query))
}

pub fn is_movie_country_or_year(query: &str) -> bool {
    RE_MOVIE_COUNTRY.is_match(query) || RE_MOVIE_YEAR.is_match(query)
}

pub fn is_short_bare_query(query: &str) -> bool {
    char_len(query) <= SHORT_QUERY_MAX_CHARS
        && query.split_whitespace().count() <= SHORT_QUERY_MAX_TOKENS
        && signals(query).is_empty()
}
