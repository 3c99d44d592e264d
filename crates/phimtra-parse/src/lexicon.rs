use std::fmt;
use std::str::FromStr;

use phf::phf_ordered_map;
use serde::{Deserialize, Serialize};

/// Canonical genre labels used in extraction output and catalog filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Crime,
    Romance,
    Horror,
    Comedy,
    Animation,
    Adventure,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Family,
    War,
    Sport,
    Music,
    Documentary,
    Drama,
    History,
    Mystery,
    Thriller,
    Fantasy,
    Western,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl Genre {
    /// Every genre, in lexicon order.
    pub const ALL: [Genre; 20] = [
        Genre::Action,
        Genre::Crime,
        Genre::Romance,
        Genre::Horror,
        Genre::Comedy,
        Genre::Animation,
        Genre::Adventure,
        Genre::ScienceFiction,
        Genre::Family,
        Genre::War,
        Genre::Sport,
        Genre::Music,
        Genre::Documentary,
        Genre::Drama,
        Genre::History,
        Genre::Mystery,
        Genre::Thriller,
        Genre::Fantasy,
        Genre::Western,
        Genre::TvShow,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Crime => "Crime",
            Genre::Romance => "Romance",
            Genre::Horror => "Horror",
            Genre::Comedy => "Comedy",
            Genre::Animation => "Animation",
            Genre::Adventure => "Adventure",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Family => "Family",
            Genre::War => "War",
            Genre::Sport => "Sport",
            Genre::Music => "Music",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::History => "History",
            Genre::Mystery => "Mystery",
            Genre::Thriller => "Thriller",
            Genre::Fantasy => "Fantasy",
            Genre::Western => "Western",
            Genre::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown genre label: {0}")]
pub struct UnknownGenre(pub String);

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Genre::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}

/// Genre surface forms (English and Vietnamese, with and without diacritics),
/// including the "phim <genre>" catalog display names.
///
/// Keys are lowercase NFC. A key maps to exactly one genre; the macro rejects
/// duplicate keys at compile time. Matching is by substring with no word
/// boundary, so short keys like "ma" or "war" also fire inside longer words.
pub static GENRE_KEYWORDS: phf::OrderedMap<&'static str, Genre> = phf_ordered_map! {
    // ── Action ───────────────────────────────────────────────────
    "action" => Genre::Action,
    "hanh dong" => Genre::Action,
    "hành động" => Genre::Action,
    "đánh nhau" => Genre::Action,
    "phim hành động" => Genre::Action,

    // ── Crime ────────────────────────────────────────────────────
    "crime" => Genre::Crime,
    "hinh su" => Genre::Crime,
    "hình sự" => Genre::Crime,
    "trinh tham" => Genre::Crime,
    "trinh thám" => Genre::Crime,
    "phim hình sự" => Genre::Crime,

    // ── Romance ──────────────────────────────────────────────────
    "romance" => Genre::Romance,
    "lang man" => Genre::Romance,
    "lãng mạn" => Genre::Romance,
    "tinh cam" => Genre::Romance,
    "tình cảm" => Genre::Romance,
    "tình yêu" => Genre::Romance,
    "love" => Genre::Romance,
    "ngôn tình" => Genre::Romance,
    "tâm sự" => Genre::Romance,
    "tâm hồn" => Genre::Romance,
    "phim lãng mạn" => Genre::Romance,

    // ── Horror ───────────────────────────────────────────────────
    "horror" => Genre::Horror,
    "kinh di" => Genre::Horror,
    "kinh dị" => Genre::Horror,
    "rung ron" => Genre::Horror,
    "rùng rợn" => Genre::Horror,
    "ma" => Genre::Horror,
    "phim ma" => Genre::Horror,
    "sợ" => Genre::Horror,
    "đáng sợ" => Genre::Horror,
    "ám ảnh" => Genre::Horror,
    "kinh hoàng" => Genre::Horror,
    "ghost" => Genre::Horror,
    "scary" => Genre::Horror,
    "phim kinh dị" => Genre::Horror,

    // ── Comedy ───────────────────────────────────────────────────
    "comedy" => Genre::Comedy,
    "hai huoc" => Genre::Comedy,
    "hài hước" => Genre::Comedy,
    "hài" => Genre::Comedy,
    "vui nhộn" => Genre::Comedy,
    "phim hài" => Genre::Comedy,

    // ── Animation ────────────────────────────────────────────────
    "animation" => Genre::Animation,
    "hoat hinh" => Genre::Animation,
    "hoạt hình" => Genre::Animation,
    "cartoon" => Genre::Animation,
    "phim hoat hinh" => Genre::Animation,
    "phim hoạt hình" => Genre::Animation,

    // ── Adventure ────────────────────────────────────────────────
    "adventure" => Genre::Adventure,
    "phieu luu" => Genre::Adventure,
    "phiêu lưu" => Genre::Adventure,
    "phim phiêu lưu" => Genre::Adventure,

    // ── Science fiction ──────────────────────────────────────────
    "sci-fi" => Genre::ScienceFiction,
    "science fiction" => Genre::ScienceFiction,
    "khoa hoc vien tuong" => Genre::ScienceFiction,
    "khoa học viễn tưởng" => Genre::ScienceFiction,
    "viễn tưởng" => Genre::ScienceFiction,
    "phim khoa học viễn tưởng" => Genre::ScienceFiction,

    // ── Family ───────────────────────────────────────────────────
    "family" => Genre::Family,
    "gia dinh" => Genre::Family,
    "gia đình" => Genre::Family,
    "phim gia đình" => Genre::Family,

    // ── War ──────────────────────────────────────────────────────
    "war" => Genre::War,
    "chien tranh" => Genre::War,
    "chiến tranh" => Genre::War,
    "phim chiến tranh" => Genre::War,

    // ── Sport ────────────────────────────────────────────────────
    "sports" => Genre::Sport,
    "the thao" => Genre::Sport,
    "thể thao" => Genre::Sport,
    "phim thể thao" => Genre::Sport,

    // ── Music ────────────────────────────────────────────────────
    "music" => Genre::Music,
    "musical" => Genre::Music,
    "am nhac" => Genre::Music,
    "âm nhạc" => Genre::Music,
    "phim nhạc" => Genre::Music,
    "nhạc" => Genre::Music,

    // ── Documentary ──────────────────────────────────────────────
    "documentary" => Genre::Documentary,
    "tai lieu" => Genre::Documentary,
    "tài liệu" => Genre::Documentary,
    "phim tài liệu" => Genre::Documentary,

    // ── Drama ────────────────────────────────────────────────────
    "drama" => Genre::Drama,
    "chinh kich" => Genre::Drama,
    "chính kịch" => Genre::Drama,
    "phim chính kịch" => Genre::Drama,

    // ── History ──────────────────────────────────────────────────
    "history" => Genre::History,
    "lich su" => Genre::History,
    "lịch sử" => Genre::History,
    "cổ trang" => Genre::History,
    "co trang" => Genre::History,
    "thời xưa" => Genre::History,
    "vua chúa" => Genre::History,
    "triều đình" => Genre::History,
    "xưa" => Genre::History,
    "phim lịch sử" => Genre::History,

    // ── Mystery ──────────────────────────────────────────────────
    "mystery" => Genre::Mystery,
    "bi an" => Genre::Mystery,
    "bí ẩn" => Genre::Mystery,
    "phim bí ẩn" => Genre::Mystery,

    // ── Thriller ─────────────────────────────────────────────────
    "thriller" => Genre::Thriller,
    "giat gan" => Genre::Thriller,
    "giật gân" => Genre::Thriller,
    "gây cấn" => Genre::Thriller,
    "phim gây cấn" => Genre::Thriller,

    // ── Fantasy ──────────────────────────────────────────────────
    "fantasy" => Genre::Fantasy,
    "gia tuong" => Genre::Fantasy,
    "giả tưởng" => Genre::Fantasy,
    "phim giả tưởng" => Genre::Fantasy,

    // ── Western ──────────────────────────────────────────────────
    "western" => Genre::Western,
    "mien tay" => Genre::Western,
    "miền tây" => Genre::Western,
    "phim miền tây" => Genre::Western,

    // ── TV show ──────────────────────────────────────────────────
    "tv show" => Genre::TvShow,
    "show" => Genre::TvShow,
    "truyền hình" => Genre::TvShow,
    "chương trình" => Genre::TvShow,
    "thực tế" => Genre::TvShow,
    "chương trình truyền hình" => Genre::TvShow,
};

/// English equivalents of a Vietnamese country name.
#[derive(Debug, Clone, Copy)]
pub struct CountryEntry {
    pub aliases: &'static [&'static str],
}

impl CountryEntry {
    const fn new(aliases: &'static [&'static str]) -> Self {
        assert!(!aliases.is_empty(), "country entry needs a canonical alias");
        Self { aliases }
    }

    /// The form used in output and in catalog lookups.
    pub const fn canonical(&self) -> &'static str {
        self.aliases[0]
    }
}

/// Vietnamese country name → English aliases. Table order decides which
/// country wins when a text mentions several.
pub static COUNTRIES: phf::OrderedMap<&'static str, CountryEntry> = phf_ordered_map! {
    "mỹ" => CountryEntry::new(&["united states of america", "usa", "america", "united states"]),
    "việt nam" => CountryEntry::new(&["vietnam", "vn"]),
    "nhật bản" => CountryEntry::new(&["japan", "japanese"]),
    "hàn quốc" => CountryEntry::new(&["south korea", "korea"]),
    "trung quốc" => CountryEntry::new(&["china", "chinese"]),
    "anh" => CountryEntry::new(&["united kingdom", "uk", "britain"]),
    "pháp" => CountryEntry::new(&["france", "french"]),
    "đức" => CountryEntry::new(&["germany", "german"]),
    "ý" => CountryEntry::new(&["italy", "italian"]),
    "tây ban nha" => CountryEntry::new(&["spain", "spanish"]),
    "canada" => CountryEntry::new(&["canada", "canadian"]),
    "úc" => CountryEntry::new(&["australia", "australian"]),
    "brasil" => CountryEntry::new(&["brazil", "brazilian"]),
    "mexico" => CountryEntry::new(&["mexico", "mexican"]),
    "nga" => CountryEntry::new(&["russia", "russian"]),
    "phần lan" => CountryEntry::new(&["finland", "finnish"]),
    "thái lan" => CountryEntry::new(&["thailand", "thai"]),
};

// ── Classifier vocabulary ────────────────────────────────────────

/// The Vietnamese word for "movie".
pub const MOVIE_WORD: &str = "phim";

/// Phrases that mark a conversational request ("find", "give me", "I want
/// to watch", "suggest", "similar to", "is there a movie", ...).
pub const NATURAL_INDICATORS: &[&str] = &[
    "tìm",
    "cho tôi",
    "muốn xem",
    "gợi ý",
    "review",
    "nào hay",
    "về chủ đề",
    "giống",
    "như",
    "có phim nào",
    "tôi muốn",
];

/// Explicit filter markers ("genre", "country", "year", "production year").
pub const STRUCTURED_MARKERS: &[&str] = &[
    "thể loại",
    "quốc gia",
    "năm",
    "năm sản xuất",
    "type",
    "country",
    "year",
];

pub const YEAR_WORDS: &[&str] = &["năm", "year"];

/// Country words that keep a short query from being read as a title. Also
/// terminates a "named X" title capture.
pub const COUNTRY_HINTS: &[&str] = &[
    "mỹ",
    "nhật",
    "hàn quốc",
    "trung quốc",
    "việt nam",
    "anh",
    "pháp",
    "đức",
    "ý",
    "tây ban nha",
    "canada",
    "úc",
    "brasil",
    "mexico",
    "nga",
    "phần lan",
    "thái lan",
];

/// Genre words that keep a short query from being read as a title.
pub const GENRE_HINTS: &[&str] = &[
    "hành động",
    "hình sự",
    "tình cảm",
    "kinh dị",
    "hài",
    "hoạt hình",
    "phiêu lưu",
    "khoa học",
    "gia đình",
    "chiến tranh",
    "thể thao",
    "nhạc",
    "tài liệu",
    "chính kịch",
    "lịch sử",
    "bí ẩn",
    "gây cấn",
    "giả tưởng",
    "miền tây",
];

// ── Lookups ──────────────────────────────────────────────────────

/// Exact keyword lookup. `word` must already be lowercase.
pub fn genre_for_keyword(word: &str) -> Option<Genre> {
    GENRE_KEYWORDS.get(word).copied()
}

pub fn is_genre_keyword(word: &str) -> bool {
    genre_for_keyword(word).is_some()
}

/// Map a Vietnamese country name to its canonical English form.
///
/// The comparison is a substring test in both directions, so "nhật" resolves
/// to "japan" as well as "nhật bản".
pub fn canonical_country(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return None;
    }
    if let Some(entry) = COUNTRIES.get(name) {
        return Some(entry.canonical());
    }
    COUNTRIES
        .entries()
        .find(|(vi, _)| name.contains(**vi) || vi.contains(name))
        .map(|(_, entry)| entry.canonical())
}

/// True if `word` occurs inside any country surface form.
pub fn is_country_word(word: &str) -> bool {
    !word.is_empty()
        && COUNTRIES
            .entries()
            .any(|(vi, entry)| vi.contains(word) || entry.aliases.iter().any(|a| a.contains(word)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_genre_has_keywords() {
        for genre in Genre::ALL {
            assert!(
                GENRE_KEYWORDS.values().any(|g| *g == genre),
                "{genre} has no keywords"
            );
        }
    }

    #[test]
    fn keywords_are_lowercase_and_trimmed() {
        for key in GENRE_KEYWORDS.keys() {
            assert_eq!(*key, key.to_lowercase(), "{key:?} is not lowercase");
            assert_eq!(*key, key.trim(), "{key:?} has stray whitespace");
        }
        for (vi, entry) in COUNTRIES.entries() {
            assert_eq!(*vi, vi.to_lowercase());
            for alias in entry.aliases {
                assert_eq!(*alias, alias.to_lowercase());
            }
        }
    }

    #[test]
    fn country_aliases_are_unique() {
        let mut seen = HashSet::new();
        for entry in COUNTRIES.values() {
            for alias in entry.aliases {
                assert!(seen.insert(*alias), "alias {alias:?} listed twice");
            }
        }
    }

    #[test]
    fn label_roundtrip() {
        for genre in Genre::ALL {
            assert_eq!(genre.label().parse::<Genre>(), Ok(genre));
        }
        assert_eq!("science fiction".parse::<Genre>(), Ok(Genre::ScienceFiction));
        assert!("Phim Hài".parse::<Genre>().is_err());
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&[Genre::ScienceFiction, Genre::TvShow]).unwrap();
        assert_eq!(json, r#"["Science Fiction","TV Show"]"#);
        let back: Vec<Genre> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Genre::ScienceFiction, Genre::TvShow]);
    }

    #[test]
    fn exact_keyword_lookup() {
        assert_eq!(genre_for_keyword("hài"), Some(Genre::Comedy));
        assert_eq!(genre_for_keyword("tình cảm"), Some(Genre::Romance));
        assert_eq!(genre_for_keyword("tình"), None);
        assert!(is_genre_keyword("ma"));
        assert!(!is_genre_keyword("mai"));
    }

    #[test]
    fn display_names_are_keywords() {
        assert_eq!(genre_for_keyword("phim hài"), Some(Genre::Comedy));
        assert_eq!(genre_for_keyword("phim hoat hinh"), Some(Genre::Animation));
        assert_eq!(genre_for_keyword("chương trình truyền hình"), Some(Genre::TvShow));
        assert_eq!(genre_for_keyword("tâm hồn"), Some(Genre::Romance));
    }

    #[test]
    fn canonical_country_bidirectional() {
        assert_eq!(canonical_country("nhật bản"), Some("japan"));
        assert_eq!(canonical_country("nhật"), Some("japan"));
        assert_eq!(canonical_country("hàn quốc"), Some("south korea"));
        assert_eq!(canonical_country("thái lan"), Some("thailand"));
        assert_eq!(canonical_country("atlantis"), None);
        assert_eq!(canonical_country(""), None);
    }

    #[test]
    fn country_word_lookup() {
        assert!(is_country_word("mỹ"));
        assert!(is_country_word("korea"));
        assert!(is_country_word("japan"));
        assert!(!is_country_word("hài"));
        assert!(!is_country_word(""));
    }
}
