//! Best-effort extraction from free-text listing descriptions.

use regex::Regex;
use std::sync::OnceLock;

static RE_PREPOSITION: OnceLock<Regex> = OnceLock::new();
static RE_LABELLED: OnceLock<Regex> = OnceLock::new();
static RE_KNOWN_PLACE: OnceLock<Regex> = OnceLock::new();

/// Place names recognised anywhere in a description.
pub const KNOWN_PLACES: &[&str] = &[
    "Wellampitiya",
    "Maharagama",
    "Kuliyapitiya",
    "Kadurugashena",
    "Suriyamawatha",
];

fn location_patterns() -> [&'static Regex; 3] {
    let preposition = RE_PREPOSITION.get_or_init(|| {
        Regex::new(r"(?i)(?:in|at|near)\s+([A-Za-z\s,]+?)(?:\.|,|\n|$)")
            .expect("static location pattern")
    });
    let labelled = RE_LABELLED.get_or_init(|| {
        Regex::new(r"(?i)Location:\s*([A-Za-z\s,]+?)(?:\.|,|\n|$)")
            .expect("static location pattern")
    });
    let known = RE_KNOWN_PLACE.get_or_init(|| {
        Regex::new(&format!("(?i)(?:{})", KNOWN_PLACES.join("|")))
            .expect("static location pattern")
    });
    [preposition, labelled, known]
}

/// Guess a location from a description.
///
/// Patterns are tried in order: "in/at/near X", "Location: X", then the
/// known place list. A pattern with a capture group yields the trimmed
/// capture; the place list yields the matched name. Returns `None` when
/// nothing usable matches.
pub fn extract_location(description: &str) -> Option<String> {
    for re in location_patterns() {
        let Some(caps) = re.captures(description) else {
            continue;
        };
        let found = caps
            .get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        if !found.is_empty() {
            return Some(found.to_string());
        }
    }
    None
}

/// Keywords from a description.
///
/// The text is lower-cased and split on anything that is not `a-z`; tokens
/// of 4+ letters are kept, the first `limit` of those survive, and
/// duplicates are then dropped.
pub fn extract_keywords(description: &str, limit: usize) -> Vec<String> {
    let lowered = description.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for word in lowered
        .split(|c: char| !c.is_ascii_lowercase())
        .filter(|w| w.len() > 3)
        .take(limit)
    {
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_after_preposition() {
        assert_eq!(
            extract_location("Beautiful land in Kandy. Clear deeds."),
            Some("Kandy".to_string())
        );
        assert_eq!(
            extract_location("House near Galle Face, walking distance"),
            Some("Galle Face".to_string())
        );
    }

    #[test]
    fn test_location_label() {
        assert_eq!(
            extract_location("Perches: 20\nLocation: Negombo\n"),
            Some("Negombo".to_string())
        );
    }

    #[test]
    fn test_location_known_place() {
        assert_eq!(
            extract_location("10 perches, MAHARAGAMA town 5 min"),
            Some("MAHARAGAMA".to_string())
        );
    }

    #[test]
    fn test_location_none() {
        assert_eq!(extract_location(""), None);
        assert_eq!(extract_location("20 perches 5000000"), None);
    }

    #[test]
    fn test_keywords() {
        let kw = extract_keywords("Land, LAND and land! Water & electricity: yes.", 10);
        assert_eq!(kw, vec!["land", "water", "electricity"]);
    }

    #[test]
    fn test_keywords_limit_applies_before_dedup() {
        let kw = extract_keywords("land land land house", 2);
        assert_eq!(kw, vec!["land"]);
    }

    #[test]
    fn test_keywords_split_on_digits() {
        let kw = extract_keywords("plot12acres", 10);
        assert_eq!(kw, vec!["plot", "acres"]);
    }
}
