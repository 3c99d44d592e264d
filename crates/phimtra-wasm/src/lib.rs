use wasm_bindgen::prelude::*;

/// Extract filters from a search-box query, returned as JSON.
#[wasm_bindgen]
pub fn extract_query(input: &str) -> String {
    let result = phimtra_parse::extract(input);
    serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
}

/// The query type alone: "structured", "title_search", or "natural".
#[wasm_bindgen]
pub fn classify_query(input: &str) -> String {
    phimtra_parse::classify(input).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_returns_json() {
        let json: serde_json::Value =
            serde_json::from_str(&extract_query("Phim hoạt hình, Nhật bản, năm 2023")).unwrap();
        assert_eq!(json["query_type"], "structured");
        assert_eq!(json["genres"][0], "Animation");
        assert_eq!(json["year"], 2023);
    }

    #[test]
    fn classify_returns_type_name() {
        assert_eq!(classify_query("Mai"), "title_search");
    }
}
