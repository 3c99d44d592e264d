use std::sync::LazyLock;

use regex::Regex;

use crate::intent::ExtractionResult;
use crate::lexicon::{self, COUNTRY_HINTS, MOVIE_WORD};
use crate::normalize::{char_len, title_case};

use super::matching::{country_in, genres_in, year_in};

/// Captured titles must be longer than this many characters.
const MIN_TITLE_CHARS: usize = 2;

/// A "named X" construction that may carry a movie title.
#[derive(Debug)]
pub struct TitleRule {
    pub name: &'static str,
    pub pattern: Regex,
}

/// Lead-ins for a title, most specific first: "tên là" (named), "có tên là"
/// (which is named), "với tên là" (with the name), then the same without "là".
const TITLE_LEAD_INS: &[(&str, &str)] = &[
    ("ten-la", r"tên\s+là"),
    ("co-ten-la", r"có\s+tên\s+là"),
    ("voi-ten-la", r"với\s+tên\s+là"),
    ("ten", r"tên"),
    ("co-ten", r"có\s+tên"),
    ("voi-ten", r"với\s+tên"),
];

/// Title rules in priority order. Each captures up to a trailing country word
/// or the end of the query.
pub static TITLE_RULES: LazyLock<Vec<TitleRule>> = LazyLock::new(|| {
    let countries: Vec<String> = COUNTRY_HINTS.iter().map(|c| regex::escape(c)).collect();
    let tail = format!(r"(?:\s+(?:{})\s*$|$)", countries.join("|"));
    TITLE_LEAD_INS
        .iter()
        .map(|&(name, lead)| TitleRule {
            name,
            pattern: Regex::new(&format!(r"{lead}\s+(.+?){tail}")).unwrap(),
        })
        .collect()
});

/// Fill filters from a conversational query.
///
/// Semantic keywords are not handled here; see
/// [`ExtractionResult::needs_semantic_fallback`].
pub fn extract(query: &str, result: &mut ExtractionResult) {
    if let Some(title) = title_candidate(query) {
        if swallows_filter_phrase(query) {
            tracing::debug!(%title, "title candidate dropped: movie word is followed by filters");
        } else if lexicon::is_genre_keyword(&title) {
            tracing::debug!(%title, "title candidate dropped: it is a genre keyword");
        } else {
            result.movie_title = Some(title_case(&title));
        }
    }

    for genre in genres_in(query) {
        result.push_genre(genre);
    }
    result.country = country_in(query).map(str::to_string);
    result.year = year_in(query);
}

/// Text captured by the first title rule whose capture is long enough.
pub fn title_candidate(query: &str) -> Option<String> {
    TITLE_RULES.iter().find_map(|rule| {
        let caps = rule.pattern.captures(query)?;
        let title = caps[1].trim();
        if char_len(title) > MIN_TITLE_CHARS {
            tracing::trace!(rule = rule.name, title, "title rule matched");
            Some(title.to_string())
        } else {
            None
        }
    })
}

/// True when the words after "phim" are a filter phrase rather than a title:
/// a single genre keyword ("phim hài"), or exactly a genre keyword followed
/// by a country word ("phim hài mỹ").
pub fn swallows_filter_phrase(query: &str) -> bool {
    let lead = format!("{MOVIE_WORD} ");
    let Some(idx) = query.find(&lead) else {
        return false;
    };
    let words: Vec<&str> = query[idx + lead.len()..].split_whitespace().collect();
    match words.as_slice() {
        [genre] => lexicon::is_genre_keyword(genre),
        [genre, country] => lexicon::is_genre_keyword(genre) && lexicon::is_country_word(country),
        _ => false,
    }
}
