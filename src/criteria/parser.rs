use std::collections::HashMap;

/// Parsed form of the `search` parameter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchTerms {
    /// Explicit `field:value` assignments; the last occurrence of a field wins
    pub per_field: HashMap<String, String>,
    /// First bare scalar segment, applied to fields without an explicit value
    pub fallback: Option<String>,
}

/// Parse the compact search term grammar.
///
/// ```text
/// term     := segment (";" segment)*
/// segment  := pair | scalar
/// pair     := field ":" value      (exactly one ":")
/// scalar   := any text without ":"
/// ```
///
/// A raw string containing neither delimiter is a single scalar. Segments
/// with two or more `:` match neither production and are discarded. One
/// linear pass, no backtracking.
pub fn parse_search_term(raw: &str) -> SearchTerms {
    if !raw.contains(';') && !raw.contains(':') {
        return SearchTerms {
            per_field: HashMap::new(),
            fallback: Some(raw.to_string()),
        };
    }

    let mut terms = SearchTerms::default();
    for segment in raw.split(';') {
        if let Some((field, value)) = segment.split_once(':') {
            if value.contains(':') {
                continue;
            }
            terms.per_field.insert(field.to_string(), value.to_string());
        } else if terms.fallback.is_none() {
            terms.fallback = Some(segment.to_string());
        }
    }
    terms
}
