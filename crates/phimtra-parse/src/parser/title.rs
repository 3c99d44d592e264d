use crate::intent::ExtractionResult;
use crate::normalize::title_case;

/// Treat the whole query as a title. Title search never carries filters.
pub fn extract(query: &str, result: &mut ExtractionResult) {
    let title = query.trim();
    result.movie_title = (!title.is_empty()).then(|| title_case(title));
    result.genres.clear();
    result.country = None;
    result.year = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::QueryType;

    #[test]
    fn title_cases_the_query() {
        let mut r = ExtractionResult::empty(QueryType::TitleSearch, "fast & furious 10");
        extract("fast & furious 10", &mut r);
        assert_eq!(r.movie_title.as_deref(), Some("Fast & Furious 10"));
    }

    #[test]
    fn clears_filters() {
        let mut r = ExtractionResult::empty(QueryType::TitleSearch, "phim 2012");
        r.year = Some(2012);
        r.country = Some("japan".into());
        extract("phim 2012", &mut r);
        assert_eq!(r.movie_title.as_deref(), Some("Phim 2012"));
        assert!(r.year.is_none());
        assert!(r.country.is_none());
        assert!(r.genres.is_empty());
    }
}
