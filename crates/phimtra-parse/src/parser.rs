pub(crate) mod matching;
pub mod natural;
pub mod structured;
pub mod title;

pub use matching::{country_in, genres_in, year_in};

use crate::classifier;
use crate::intent::{ExtractionResult, QueryType};
use crate::normalize;

/// Classify a search string and extract its filters.
///
/// This is the lexical half of extraction; it never performs I/O. Blank input
/// yields an empty natural result.
///
/// # Example
/// ```
/// use phimtra_parse::{Genre, QueryType};
///
/// let r = phimtra_parse::extract("Phim hoạt hình, Nhật bản, năm 2023");
/// assert_eq!(r.query_type, QueryType::Structured);
/// assert_eq!(r.genres, vec![Genre::Animation]);
/// assert_eq!(r.country.as_deref(), Some("japan"));
/// assert_eq!(r.year, Some(2023));
/// ```
pub fn extract(query: &str) -> ExtractionResult {
    let prepared = normalize::prepare(query);
    if prepared.is_empty() {
        return ExtractionResult::empty(QueryType::Natural, query);
    }

    let query_type = classifier::classify_prepared(&prepared);
    let mut result = ExtractionResult::empty(query_type, query);

    match query_type {
        QueryType::Structured => structured::extract(&prepared, &mut result),
        QueryType::TitleSearch => title::extract(&prepared, &mut result),
        QueryType::Natural => natural::extract(&prepared, &mut result),
    }

    tracing::debug!(
        query_type = %result.query_type,
        has_filters = result.has_filters(),
        genres = result.genres.len(),
        country = result.country.as_deref().unwrap_or(""),
        year = result.year,
        title = result.movie_title.as_deref().unwrap_or(""),
        "lexical extraction finished"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{Genre, COUNTRIES};

    #[test]
    fn title_only_query() {
        let r = extract("Mai");
        assert_eq!(r.query_type, QueryType::TitleSearch);
        assert_eq!(r.movie_title.as_deref(), Some("Mai"));
        assert!(r.genres.is_empty());
        assert!(r.country.is_none());
        assert!(r.year.is_none());
        assert_eq!(r.original_query, "Mai");
    }

    #[test]
    fn structured_query() {
        let r = extract("Phim hoạt hình, Nhật bản, năm 2023");
        assert_eq!(r.query_type, QueryType::Structured);
        assert_eq!(r.genres, vec![Genre::Animation]);
        assert_eq!(r.country.as_deref(), Some("japan"));
        assert_eq!(r.year, Some(2023));
        assert!(r.movie_title.is_none());
    }

    #[test]
    fn natural_request() {
        let r = extract("tìm phim tình cảm hàn quốc hay nhất");
        assert_eq!(r.query_type, QueryType::Natural);
        assert_eq!(r.genres, vec![Genre::Romance]);
        assert_eq!(r.country.as_deref(), Some("south korea"));
        assert!(r.year.is_none());
        assert!(r.movie_title.is_none());
    }

    #[test]
    fn movie_and_year_stays_a_title_search() {
        // "2012" could be the film or a year filter; the catalog decides.
        let r = extract("Phim 2012");
        assert_eq!(r.query_type, QueryType::TitleSearch);
        assert_eq!(r.movie_title.as_deref(), Some("Phim 2012"));
        assert!(r.year.is_none());
    }

    #[test]
    fn latin_title_with_ampersand() {
        let r = extract("Fast & Furious 10");
        assert_eq!(r.query_type, QueryType::TitleSearch);
        assert_eq!(r.movie_title.as_deref(), Some("Fast & Furious 10"));
        assert!(r.year.is_none());
    }

    #[test]
    fn blank_input_is_neutral() {
        for q in ["", "   ", "\t\n"] {
            let r = extract(q);
            assert_eq!(r.query_type, QueryType::Natural);
            assert!(!r.has_filters());
            assert!(r.keywords.is_empty());
            assert_eq!(r.original_query, q);
        }
    }

    #[test]
    fn original_query_is_untouched() {
        let r = extract("  Phim HÀN QUỐC năm 2024 ");
        assert_eq!(r.original_query, "  Phim HÀN QUỐC năm 2024 ");
        assert_eq!(r.country.as_deref(), Some("south korea"));
        assert_eq!(r.year, Some(2024));
    }

    #[test]
    fn extraction_is_idempotent() {
        for q in [
            "Mai",
            "phim hài, mỹ, 2001",
            "tôi muốn xem phim ma đáng sợ",
            "cho tôi phim tên là bố già",
        ] {
            assert_eq!(extract(q), extract(q));
        }
    }

    #[test]
    fn type_exclusivity() {
        for q in [
            "Mai",
            "Sherlock Holmes",
            "Phim hoạt hình, Nhật bản, năm 2023",
            "phim trinh thám anh",
            "tìm phim có tên là john wick mỹ",
            "có phim hoạt hình nào vui nhộn cho trẻ em không",
        ] {
            let r = extract(q);
            match r.query_type {
                QueryType::TitleSearch => {
                    assert!(r.genres.is_empty() && r.country.is_none() && r.year.is_none(), "{q}");
                }
                QueryType::Structured => assert!(r.movie_title.is_none(), "{q}"),
                QueryType::Natural => {}
            }
        }
    }

    #[test]
    fn years_stay_in_range() {
        for q in ["phim năm 12345", "phim 99", "tìm phim 2045", "phim hài, 20201"] {
            assert_eq!(extract(q).year, None, "{q}");
        }
        assert_eq!(extract("tìm phim năm 1900").year, Some(1900));
        assert_eq!(extract("tìm phim năm 2039").year, Some(2039));
    }

    #[test]
    fn genre_order_is_first_seen() {
        let r = extract("tìm phim kinh dị hài hước kinh dị");
        assert_eq!(r.genres, vec![Genre::Horror, Genre::Comedy]);
    }

    #[test]
    fn country_forms_share_a_canonical_name() {
        for (vi, entry) in COUNTRIES.entries() {
            let canonical = entry.canonical();
            let by_vi = extract(&format!("tìm phim {vi}"));
            assert_eq!(by_vi.country.as_deref(), Some(canonical), "{vi}");
            for alias in entry.aliases {
                let by_alias = extract(&format!("tìm phim {alias}"));
                assert_eq!(by_alias.country.as_deref(), Some(canonical), "{alias}");
            }
        }
    }

    #[test]
    fn short_keywords_over_match() {
        // No word boundaries: "nhạc" fires inside a longer token.
        let r = extract("tìm phim nhạcsĩ");
        assert_eq!(r.genres, vec![Genre::Music]);
    }

    #[test]
    fn decomposed_input_matches() {
        let decomposed = "ti\u{0300}m phim ha\u{0300}i";
        let r = extract(decomposed);
        assert_eq!(r.query_type, QueryType::Natural);
        assert_eq!(r.genres, vec![Genre::Comedy]);
    }
}
