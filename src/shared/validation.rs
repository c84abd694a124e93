use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating slugs
    /// Must be lowercase alphanumeric with single hyphens between segments
    /// - Valid: "san-juan-del-obispo", "ciudad-vieja", "aldea1"
    /// - Invalid: "-aldea", "aldea-", "aldea--uno", "Aldea", "aldea_uno"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Derive a slug from a display name.
///
/// Accented latin letters fold to their base letter, anything that is not
/// alphanumeric becomes a separator, and runs of separators collapse to one
/// hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        let c = fold_accent(c);
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Trim every entry and drop the blank ones.
///
/// Admin forms post `[""]` for a list input the editor never touched.
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Trim an optional text field, turning blank input into `None`.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
