//! Query normalization shared by the classifier and the extractors.

use unicode_normalization::UnicodeNormalization;

/// Compose diacritics (NFC), lowercase, and trim.
///
/// Some input methods send Vietnamese in decomposed form ("e" + U+0302 + ...);
/// the lexicon is stored composed, so every query goes through here once.
pub fn prepare(query: &str) -> String {
    query.nfc().collect::<String>().to_lowercase().trim().to_string()
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
///
/// "fast & furious 10" → "Fast & Furious 10", "lật mặt" → "Lật Mặt".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Number of characters, not bytes.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
