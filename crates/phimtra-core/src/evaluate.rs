//! Offline accuracy report for the extractor against labelled queries.

use std::fmt;
use std::path::Path;

use phimtra_parse::{Genre, QueryType};
use serde::{Deserialize, Serialize};

use crate::error::PhimtraError;
use crate::extractor::QueryIntentExtractor;

const BUILTIN_CASES: &str = include_str!("../../../data/eval_cases.json");

/// One labelled query. Absent fields mean "nothing should be extracted".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalCase {
    pub query: String,
    pub expected_type: QueryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_country: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expected_genres: Vec<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_year: Option<u16>,
}

/// The acceptance set shipped in `data/eval_cases.json`.
pub fn builtin_cases() -> Result<Vec<EvalCase>, PhimtraError> {
    parse_cases(BUILTIN_CASES)
}

pub fn parse_cases(json: &str) -> Result<Vec<EvalCase>, PhimtraError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_cases(path: &Path) -> Result<Vec<EvalCase>, PhimtraError> {
    let content = std::fs::read_to_string(path)?;
    parse_cases(&content)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Scores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelScores {
    pub label: String,
    #[serde(flatten)]
    pub scores: Scores,
}

/// The field a mismatch was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Type,
    Country,
    Year,
    Genres,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Type => "type",
            Field::Country => "country",
            Field::Year => "year",
            Field::Genres => "genres",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    pub query: String,
    pub field: Field,
    pub expected: String,
    pub predicted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalReport {
    pub total: usize,
    /// Per query type, for every type that was expected or predicted.
    pub query_types: Vec<LabelScores>,
    pub type_accuracy: f64,
    pub country_accuracy: f64,
    pub year_accuracy: f64,
    /// Multi-label scores per genre, for every genre that was expected or
    /// predicted.
    pub genres: Vec<LabelScores>,
    pub genre_micro: Scores,
    pub mismatches: Vec<Mismatch>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    tp: usize,
    fp: usize,
    fn_: usize,
    seen: bool,
}

impl Tally {
    fn record(&mut self, expected: bool, predicted: bool) {
        self.seen |= expected || predicted;
        match (expected, predicted) {
            (true, true) => self.tp += 1,
            (false, true) => self.fp += 1,
            (true, false) => self.fn_ += 1,
            (false, false) => {}
        }
    }

    fn scores(&self) -> Scores {
        let precision = ratio(self.tp, self.tp + self.fp);
        let recall = ratio(self.tp, self.tp + self.fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Scores {
            precision,
            recall,
            f1,
            support: self.tp + self.fn_,
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn genre_list(genres: &[Genre]) -> String {
    if genres.is_empty() {
        return "-".to_string();
    }
    genres.iter().map(|g| g.label()).collect::<Vec<_>>().join(", ")
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Run every case through `extractor` and score the results.
pub fn evaluate(extractor: &QueryIntentExtractor, cases: &[EvalCase]) -> EvalReport {
    let mut types = [Tally::default(); QueryType::ALL.len()];
    let mut genres = [Tally::default(); Genre::ALL.len()];
    let (mut type_hits, mut country_hits, mut year_hits) = (0, 0, 0);
    let mut mismatches = Vec::new();

    for case in cases {
        let predicted = extractor.extract(&case.query);
        let mut miss = |field, expected: String, got: String| {
            mismatches.push(Mismatch {
                query: case.query.clone(),
                field,
                expected,
                predicted: got,
            });
        };

        for (slot, qt) in QueryType::ALL.iter().enumerate() {
            types[slot].record(case.expected_type == *qt, predicted.query_type == *qt);
        }
        if case.expected_type == predicted.query_type {
            type_hits += 1;
        } else {
            miss(
                Field::Type,
                case.expected_type.to_string(),
                predicted.query_type.to_string(),
            );
        }

        let expected_country = case.expected_country.as_deref().unwrap_or("");
        let predicted_country = predicted.country.as_deref().unwrap_or("");
        if expected_country == predicted_country {
            country_hits += 1;
        } else {
            miss(
                Field::Country,
                or_dash(case.expected_country.as_deref()),
                or_dash(predicted.country.as_deref()),
            );
        }

        if case.expected_year == predicted.year {
            year_hits += 1;
        } else {
            miss(Field::Year, or_dash(case.expected_year), or_dash(predicted.year));
        }

        let mut genres_match = true;
        for (slot, genre) in Genre::ALL.iter().enumerate() {
            let e = case.expected_genres.contains(genre);
            let p = predicted.genres.contains(genre);
            genres[slot].record(e, p);
            genres_match &= e == p;
        }
        if !genres_match {
            miss(
                Field::Genres,
                genre_list(&case.expected_genres),
                genre_list(&predicted.genres),
            );
        }
    }

    let mut micro = Tally::default();
    for t in &genres {
        micro.tp += t.tp;
        micro.fp += t.fp;
        micro.fn_ += t.fn_;
    }

    let total = cases.len();
    tracing::debug!(total, mismatches = mismatches.len(), "evaluation finished");

    EvalReport {
        total,
        query_types: QueryType::ALL
            .iter()
            .zip(&types)
            .filter(|(_, t)| t.seen)
            .map(|(qt, t)| LabelScores {
                label: qt.to_string(),
                scores: t.scores(),
            })
            .collect(),
        type_accuracy: ratio(type_hits, total),
        country_accuracy: ratio(country_hits, total),
        year_accuracy: ratio(year_hits, total),
        genres: Genre::ALL
            .iter()
            .zip(&genres)
            .filter(|(_, t)| t.seen)
            .map(|(g, t)| LabelScores {
                label: g.label().to_string(),
                scores: t.scores(),
            })
            .collect(),
        genre_micro: micro.scores(),
        mismatches,
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, title: &str, rows: &[LabelScores]) -> fmt::Result {
    writeln!(f, "{title:<20}{:>10}{:>10}{:>10}{:>10}", "precision", "recall", "f1", "support")?;
    for row in rows {
        write_row(f, &row.label, &row.scores)?;
    }
    Ok(())
}

fn write_row(f: &mut fmt::Formatter<'_>, label: &str, s: &Scores) -> fmt::Result {
    writeln!(
        f,
        "  {label:<18}{:>10.2}{:>10.2}{:>10.2}{:>10}",
        s.precision, s.recall, s.f1, s.support
    )
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evaluated {} queries", self.total)?;
        writeln!(f)?;

        write_table(f, "Query type", &self.query_types)?;
        writeln!(f, "  {:<18}{:>30.2}{:>10}", "accuracy", self.type_accuracy, self.total)?;
        writeln!(f)?;

        writeln!(f, "Country accuracy: {:.2}", self.country_accuracy)?;
        writeln!(f, "Year accuracy: {:.2}", self.year_accuracy)?;
        writeln!(f)?;

        write_table(f, "Genre", &self.genres)?;
        write_row(f, "micro avg", &self.genre_micro)?;

        if !self.mismatches.is_empty() {
            writeln!(f)?;
            writeln!(f, "Mismatches ({}):", self.mismatches.len())?;
            for m in &self.mismatches {
                writeln!(
                    f,
                    "  [{}] {}: expected {}, got {}",
                    m.field, m.query, m.expected, m.predicted
                )?;
            }
        }
        Ok(())
    }
}
