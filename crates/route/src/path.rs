//! Path assembly helpers.

pub const SEPARATOR: char = '/';

/// Collapses every run of consecutive separators into a single one.
pub fn collapse_separators(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous_was_separator = false;

    for c in path.chars() {
        let is_separator = c == SEPARATOR;
        if !(is_separator && previous_was_separator) {
            collapsed.push(c);
        }
        previous_was_separator = is_separator;
    }

    collapsed
}

/// Joins a scope prefix and a route uri, collapsing repeated separators.
pub fn join(prefix: &str, uri: &str) -> String {
    collapse_separators(&format!("{prefix}{uri}"))
}

/// Collapses separators and strips the leading and trailing one.
pub fn trim(path: &str) -> String {
    collapse_separators(path).trim_matches(SEPARATOR).to_owned()
}
