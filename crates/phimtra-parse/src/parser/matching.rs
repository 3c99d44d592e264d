//! Substring matchers shared by the structured and natural extractors.
//!
//! All inputs are expected to be prepared (NFC, lowercase). Keywords match
//! anywhere in the text, with no word-boundary check.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::{Genre, COUNTRIES, GENRE_KEYWORDS};

/// A plausible release year: 1900–1999 or 2000–2039, standing alone.
const YEAR_PATTERN: &str = r"(19[0-9]{2}|20[0-3][0-9])";

pub(crate) static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b{YEAR_PATTERN}\b")).unwrap());

/// "phim <country>", capturing the Vietnamese country name.
pub(crate) static RE_MOVIE_COUNTRY: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<String> = COUNTRIES.keys().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(r"phim\s+({})", names.join("|"))).unwrap()
});

/// "phim 2020" or "phim năm 2020", capturing the year.
pub(crate) static RE_MOVIE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"phim\s+(?:năm\s+)?{YEAR_PATTERN}\b")).unwrap());

/// Every genre with a keyword in `text`, ordered by where its first keyword
/// appears.
pub fn genres_in(text: &str) -> Vec<Genre> {
    let mut found: Vec<(usize, Genre)> = Vec::new();

    for (keyword, genre) in GENRE_KEYWORDS.entries() {
        let Some(pos) = text.find(keyword) else {
            continue;
        };
        match found.iter_mut().find(|(_, g)| g == genre) {
            Some(slot) => slot.0 = slot.0.min(pos),
            None => found.push((pos, *genre)),
        }
    }

    // Stable: genres starting at the same byte keep lexicon order.
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, g)| g).collect()
}

/// Canonical form of the first country (in table order) mentioned in `text`,
/// by Vietnamese name or any English alias.
pub fn country_in(text: &str) -> Option<&'static str> {
    COUNTRIES
        .entries()
        .find(|(vi, entry)| {
            text.contains(**vi) || entry.aliases.iter().any(|alias| text.contains(alias))
        })
        .map(|(_, entry)| entry.canonical())
}

/// First standalone year in range.
pub fn year_in(text: &str) -> Option<u16> {
    RE_YEAR
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_follow_text_order() {
        assert_eq!(
            genres_in("phim hài có yếu tố kinh dị"),
            vec![Genre::Comedy, Genre::Horror]
        );
        assert_eq!(
            genres_in("phim kinh dị pha hài"),
            vec![Genre::Horror, Genre::Comedy]
        );
    }

    #[test]
    fn repeated_genre_counted_once() {
        assert_eq!(
            genres_in("hài hước, hành động, hài"),
            vec![Genre::Comedy, Genre::Action]
        );
    }

    #[test]
    fn keywords_match_inside_words() {
        // Known trade-off: no word boundaries.
        assert_eq!(genres_in("nhạcpop"), vec![Genre::Music]);
        assert_eq!(genres_in("mafia"), vec![Genre::Horror]);
    }

    #[test]
    fn country_by_either_language() {
        assert_eq!(country_in("phim nhật bản"), Some("japan"));
        assert_eq!(country_in("japanese anime"), Some("japan"));
        assert_eq!(country_in("phim korea"), Some("south korea"));
        assert_eq!(country_in("không có"), None);
    }

    #[test]
    fn country_table_order_wins() {
        // Both mentioned; "mỹ" precedes "hàn quốc" in the table.
        assert_eq!(country_in("hàn quốc và mỹ"), Some("united states of america"));
    }

    #[test]
    fn year_bounds() {
        assert_eq!(year_in("năm 2023"), Some(2023));
        assert_eq!(year_in("1900"), Some(1900));
        assert_eq!(year_in("2039"), Some(2039));
        assert_eq!(year_in("2045"), None);
        assert_eq!(year_in("1899"), None);
        assert_eq!(year_in("20234"), None);
        assert_eq!(year_in("99"), None);
        assert_eq!(year_in("1975 và 2020"), Some(1975));
    }

    #[test]
    fn movie_anchors() {
        let caps = RE_MOVIE_COUNTRY.captures("phim hàn quốc năm 2024").unwrap();
        assert_eq!(&caps[1], "hàn quốc");
        let caps = RE_MOVIE_YEAR.captures("phim năm 2024").unwrap();
        assert_eq!(&caps[1], "2024");
        assert!(RE_MOVIE_YEAR.captures("phim hàn quốc năm 2024").is_none());
    }
}
