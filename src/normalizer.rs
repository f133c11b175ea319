//! # Normalizer Module
//!
//! String cleanup shared by ingredient matching and identifier resolution.
//! Every function here is total: absent, empty or malformed input yields an
//! empty string, which callers treat as "unmatchable".
//!
//! ## Modes
//!
//! - **Basic**: URL-decode, trim, lowercase
//! - **Ingredient name**: basic, then keep only `[a-z0-9 ]`, drop the
//!   articles "a", "an", "the" and collapse whitespace
//! - **Identifier**: basic, then strip trailing `.json`, `.html`, `.htm`
//!
//! All modes are idempotent: normalizing an already-normalized string returns
//! it unchanged.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use std::borrow::Cow;

/// File extensions stripped from the end of identifiers
pub const IDENTIFIER_EXTENSIONS: [&str; 3] = [".json", ".html", ".htm"];

lazy_static! {
    static ref NON_INGREDIENT_CHARS: Regex =
        Regex::new(r"[^a-z0-9\s]").expect("Ingredient character pattern should be valid");
    static ref ARTICLES: Regex =
        Regex::new(r"\b(?:a|an|the)\b").expect("Article pattern should be valid");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("Whitespace pattern should be valid");
}

/// Upper bound on nested percent-decoding passes
const MAX_DECODE_PASSES: usize = 8;

/// Percent-decode until the text stops changing
///
/// Double-encoded input (`%2541`) is fully decoded so a second normalization
/// pass finds nothing left to decode. A pass that fails keeps the text it
/// was given.
fn url_decode(raw: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(raw);
    for _ in 0..MAX_DECODE_PASSES {
        if !current.contains('%') {
            break;
        }
        let decoded = match urlencoding::decode(&current) {
            Ok(decoded) if decoded != current => decoded.into_owned(),
            Ok(_) => break,
            Err(_) => {
                trace!("Could not percent-decode '{}', using it verbatim", current);
                break;
            }
        };
        current = Cow::Owned(decoded);
    }
    current
}

/// Basic normalization: URL-decode, trim and lowercase
///
/// # Examples
///
/// ```rust
/// use recipe_engine::normalizer::normalize;
///
/// assert_eq!(normalize("  Olive%20Oil "), "olive oil");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    match raw.into() {
        Some(raw) if !raw.is_empty() => url_decode(raw).trim().to_lowercase(),
        _ => String::new(),
    }
}

/// Normalize an ingredient name for containment matching
///
/// # Examples
///
/// ```rust
/// use recipe_engine::normalizer::normalize_ingredient_name;
///
/// assert_eq!(normalize_ingredient_name("The Tomatoes!"), "tomatoes");
/// assert_eq!(normalize_ingredient_name("a  pinch of salt"), "pinch of salt");
/// ```
pub fn normalize_ingredient_name<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let basic = normalize(raw);
    if basic.is_empty() {
        return basic;
    }

    let stripped = NON_INGREDIENT_CHARS.replace_all(&basic, "");
    let without_articles = ARTICLES.replace_all(&stripped, " ");
    let collapsed = WHITESPACE.replace_all(&without_articles, " ");
    let name = collapsed.trim().to_string();

    trace!("Normalized ingredient name: '{}' -> '{}'", basic, name);
    name
}

/// Normalize an identifier for comparison: basic normalization plus
/// extension stripping
///
/// # Examples
///
/// ```rust
/// use recipe_engine::normalizer::normalize_identifier;
///
/// assert_eq!(normalize_identifier("Recipe-001.JSON"), "recipe-001");
/// assert_eq!(normalize_identifier(Some("recipe%2D002.html")), "recipe-002");
/// ```
pub fn normalize_identifier<'a>(raw: impl Into<Option<&'a str>>) -> String {
    clean_identifier(raw).to_lowercase()
}

/// Identifier cleanup that keeps the original case
///
/// Used by the exact tier of identifier resolution, where a casing difference
/// must not count as an exact match.
pub fn clean_identifier<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let raw = match raw.into() {
        Some(raw) if !raw.is_empty() => raw,
        _ => return String::new(),
    };

    let decoded = url_decode(raw);
    let mut id = decoded.trim();
    while let Some(stripped) = strip_extension(id) {
        id = stripped.trim_end();
    }
    id.to_string()
}

fn strip_extension(id: &str) -> Option<&str> {
    IDENTIFIER_EXTENSIONS.iter().find_map(|ext| {
        let split = id.len().checked_sub(ext.len())?;
        if !id.is_char_boundary(split) {
            return None;
        }
        let (stem, tail) = id.split_at(split);
        tail.eq_ignore_ascii_case(ext).then_some(stem)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_input() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize_ingredient_name(None), "");
        assert_eq!(normalize_identifier(None), "");
        assert_eq!(normalize_identifier("   "), "");
    }

    #[test]
    fn test_ingredient_name_normalization() {
        let cases = vec![
            ("Tomatoes", "tomatoes"),
            ("  Olive Oil  ", "olive oil"),
            ("the onion", "onion"),
            ("An apple", "apple"),
            ("a cup of the best flour", "cup of best flour"),
            ("Jalapeño, diced!", "jalapeo diced"),
            ("all-purpose flour", "allpurpose flour"),
            ("bananas", "bananas"),
            ("red\tpepper", "red pepper"),
            ("!!!", ""),
            ("the", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(
                normalize_ingredient_name(input),
                expected,
                "Normalization failed for: '{}'",
                input
            );
        }
    }

    #[test]
    fn test_articles_only_removed_as_whole_words() {
        assert_eq!(normalize_ingredient_name("banana"), "banana");
        assert_eq!(normalize_ingredient_name("theme salt"), "theme salt");
        assert_eq!(normalize_ingredient_name("anchovy"), "anchovy");
    }

    #[test]
    fn test_identifier_normalization() {
        let cases = vec![
            ("recipe-001", "recipe-001"),
            ("Recipe-001", "recipe-001"),
            (" recipe-001 ", "recipe-001"),
            ("recipe-001.json", "recipe-001"),
            ("recipe-001.HTML", "recipe-001"),
            ("recipe-001.htm", "recipe-001"),
            ("recipe-001.json.html", "recipe-001"),
            ("recipe%20001", "recipe 001"),
            ("recipe%zz", "recipe%zz"),
            (".json", ""),
            ("json", "json"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                normalize_identifier(input),
                expected,
                "Identifier normalization failed for: '{}'",
                input
            );
        }
    }

    #[test]
    fn test_clean_identifier_keeps_case() {
        assert_eq!(clean_identifier("Recipe-001.json"), "Recipe-001");
        assert_eq!(clean_identifier(" RECIPE "), "RECIPE");
    }

    #[test]
    fn test_nested_percent_encoding_is_fully_decoded() {
        let cases = vec![
            ("%2541", "a"),
            ("a%2520b", "a b"),
            ("recipe%2541", "recipea"),
            ("recipe%252Ejson", "recipe"),
            ("%FF%41", "%ff%41"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_identifier(input), expected, "input '{}'", input);
        }
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "The Big Tomato!",
            "  a  an the  ",
            "Crème fraîche",
            "recipe-001.JSON",
            "Olive%20Oil",
            "x.htm.json",
            "%2541",
            "recipe%2541",
            "a%2520b",
            "recipe%252Ejson",
            "%25252541",
        ];

        for input in inputs {
            let once = normalize_ingredient_name(input);
            assert_eq!(normalize_ingredient_name(once.as_str()), once, "ingredient: '{}'", input);

            let once = normalize_identifier(input);
            assert_eq!(normalize_identifier(once.as_str()), once, "identifier: '{}'", input);

            let once = normalize(input);
            assert_eq!(normalize(once.as_str()), once, "basic: '{}'", input);
        }
    }
}
