use crate::intent::ExtractionResult;
use crate::lexicon;

use super::matching::{country_in, genres_in, year_in, RE_MOVIE_COUNTRY, RE_MOVIE_YEAR};

/// Fill filters from a structured query like "phim hoạt hình, nhật bản, năm 2023".
///
/// The "phim <country>" and "phim [năm] <year>" anchors are tried first. Then
/// every comma-separated segment contributes genres; country and year keep
/// the first value found.
pub fn extract(query: &str, result: &mut ExtractionResult) {
    if let Some(caps) = RE_MOVIE_COUNTRY.captures(query) {
        result.country = lexicon::canonical_country(&caps[1]).map(str::to_string);
    }
    if let Some(caps) = RE_MOVIE_YEAR.captures(query) {
        result.year = caps[1].parse().ok();
    }

    for segment in query.split(',').map(str::trim) {
        if segment.is_empty() {
            continue;
        }
        for genre in genres_in(segment) {
            result.push_genre(genre);
        }
        if result.country.is_none() {
            result.country = country_in(segment).map(str::to_string);
        }
        if result.year.is_none() {
            result.year = year_in(segment);
        }
    }

    // Comma-structured input carries no free-text title.
    result.movie_title = None;
}
