use phimtra_parse::Genre;

use crate::config::CatalogConfig;
use crate::error::PhimtraError;

/// Source of the category names the semantic fallback may suggest.
pub trait CategoryCatalog: Send + Sync {
    fn category_names(&self) -> Result<Vec<String>, PhimtraError>;
}

/// A fixed list of category names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCatalog {
    names: Vec<String>,
}

impl StaticCatalog {
    /// Blank names are dropped and duplicates collapse onto their first
    /// occurrence.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if !name.is_empty() && !kept.contains(&name) {
                kept.push(name);
            }
        }
        Self { names: kept }
    }

    /// Every canonical genre label.
    pub fn genre_labels() -> Self {
        Self::new(Genre::ALL.iter().map(|g| g.label()))
    }

    /// Configured categories, or the genre labels when none are configured.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let catalog = Self::new(config.categories.iter().cloned());
        if catalog.names.is_empty() {
            Self::genre_labels()
        } else {
            catalog
        }
    }
}

impl CategoryCatalog for StaticCatalog {
    fn category_names(&self) -> Result<Vec<String>, PhimtraError> {
        Ok(self.names.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_names() {
        let catalog = StaticCatalog::new(["Hài", "  ", "Kinh dị ", "Hài"]);
        assert_eq!(catalog.category_names().unwrap(), vec!["Hài", "Kinh dị"]);
    }

    #[test]
    fn genre_labels_in_table_order() {
        let names = StaticCatalog::genre_labels().category_names().unwrap();
        assert_eq!(names.len(), Genre::ALL.len());
        assert_eq!(names[0], Genre::ALL[0].label());
        assert!(names.iter().any(|n| n == "Science Fiction"));
    }

    #[test]
    fn config_falls_back_to_genres() {
        let empty = CatalogConfig { categories: vec![] };
        assert_eq!(StaticCatalog::from_config(&empty), StaticCatalog::genre_labels());

        let custom = CatalogConfig {
            categories: vec!["Phim Tết".into()],
        };
        assert_eq!(StaticCatalog::from_config(&custom).category_names().unwrap(), vec!["Phim Tết"]);
    }
}
