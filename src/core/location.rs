/// Extract the city from a free-text address.
///
/// Takes the last comma-separated segment and then its last word, lowercased:
/// "Marienplatz 1, 80331 München" yields "münchen".
pub fn city_token(address: &str) -> Option<String> {
    address
        .rsplit(',')
        .next()?
        .split_whitespace()
        .last()
        .map(str::to_lowercase)
}

/// Whether the address lies in one of the home-market cities.
pub fn is_local_market(address: Option<&str>, local_cities: &[String]) -> bool {
    match address.and_then(city_token) {
        Some(city) => local_cities.iter().any(|c| c.to_lowercase() == city),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn munich() -> Vec<String> {
        vec!["münchen".to_string(), "muenchen".to_string(), "munich".to_string()]
    }

    #[test]
    fn test_city_token() {
        assert_eq!(
            city_token("Marienplatz 1, 80331 München").as_deref(),
            Some("münchen")
        );
        assert_eq!(city_token("Berlin").as_deref(), Some("berlin"));
        assert_eq!(city_token("Hauptstr. 5, ").as_deref(), None);
        assert_eq!(city_token("").as_deref(), None);
    }

    #[test]
    fn test_local_market_variants() {
        let cities = munich();
        assert!(is_local_market(Some("Leopoldstr. 3, 80802 MUENCHEN"), &cities));
        assert!(is_local_market(Some("Munich"), &cities));
        assert!(!is_local_market(Some("Alexanderplatz, 10178 Berlin"), &cities));
        assert!(!is_local_market(None, &cities));
    }

    #[test]
    fn test_only_trailing_segment_counts() {
        // City named in the street segment does not count
        assert!(!is_local_market(Some("Münchner Str. 1, Augsburg"), &munich()));
    }
}
