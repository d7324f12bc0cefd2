//! Unique slug generation
//!
//! Turns arbitrary source text into a URL-safe slug and makes it unique
//! against a caller-supplied existence check by appending a numeric counter
//! suffix on collision.

use regex::Regex;
use std::sync::LazyLock;

static DASH_COUNTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-[0-9]+$").expect("valid counter suffix regex"));

#[derive(Debug, Clone)]
pub struct SlugOptions {
    /// Separator between words and before the counter suffix
    pub separator: String,
    /// Maximum length of the base text fed into slugification, not counting
    /// any counter suffix
    pub max_length: usize,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            separator: "-".to_string(),
            max_length: 240,
        }
    }
}

/// Slugify text: lowercase, with runs of non-alphanumeric characters
/// collapsed to a single separator. No leading or trailing separator.
pub fn slugify(source: &str, separator: &str) -> String {
    let mut slug = String::with_capacity(source.len());
    let mut pending_separator = false;
    for c in source.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push_str(separator);
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Join source values with spaces, bound the length, and slugify
pub fn slug_from_sources(sources: &[&str], options: &SlugOptions) -> String {
    let joined = sources.join(" ");
    let bounded: String = joined.chars().take(options.max_length).collect();
    slugify(&bounded, &options.separator)
}

/// Make `desired` unique against `exists`.
///
/// Any existing counter suffix is stripped first, so re-saving "post-2"
/// probes "post" before appending a fresh counter. Collisions retry with
/// `base<sep>2`, `base<sep>3`, ...
pub fn unique_slug<F>(desired: &str, options: &SlugOptions, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base = strip_counter_suffix(desired.trim(), &options.separator);
    let mut candidate = base.clone();
    let mut counter = 1u32;

    while exists(&candidate) {
        counter += 1;
        candidate = format!("{}{}{}", base, options.separator, counter);
    }

    candidate
}

fn strip_counter_suffix(value: &str, separator: &str) -> String {
    if separator == "-" {
        return DASH_COUNTER_RE.replace(value, "").into_owned();
    }
    let pattern = format!("{}[0-9]+$", regex::escape(separator));
    match Regex::new(&pattern) {
        Ok(re) => re.replace(value, "").into_owned(),
        Err(_) => value.to_string(),
    }
}
