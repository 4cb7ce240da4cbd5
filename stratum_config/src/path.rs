//! Path-key hierarchy expansion.
//!
//! A path key such as `dev/region1/staging` names a chain of ancestors
//! (`dev`, `dev/region1`, `dev/region1/staging`). Resolution applies the
//! overrides registered for each ancestor from the least to the most
//! specific.

/// Separator between path-key segments.
pub const PATH_SEPARATOR: char = '/';

/// Returns the ancestor chain of `path_key`, least specific first.
///
/// The chain ends with `path_key` itself. Every `/` marks a boundary, so a
/// trailing separator produces one extra entry and an empty key produces a
/// single empty entry.
///
/// # Examples
///
/// ```rust
/// use stratum_config::ancestors;
///
/// let chain: Vec<&str> = ancestors("dev/region1/staging").collect();
/// assert_eq!(chain, ["dev", "dev/region1", "dev/region1/staging"]);
///
/// let single: Vec<&str> = ancestors("prod").collect();
/// assert_eq!(single, ["prod"]);
/// ```
pub fn ancestors(path_key: &str) -> impl Iterator<Item = &str> {
    path_key
        .match_indices(PATH_SEPARATOR)
        .filter_map(move |(idx, _)| path_key.get(..idx))
        .chain(std::iter::once(path_key))
}

/// Returns the number of segments in `path_key`.
///
/// # Examples
///
/// ```rust
/// use stratum_config::path::depth;
///
/// assert_eq!(depth("dev"), 1);
/// assert_eq!(depth("dev/region1/staging"), 3);
/// ```
#[must_use]
pub fn depth(path_key: &str) -> usize {
    path_key.matches(PATH_SEPARATOR).count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::three_levels("a/b/c", &["a", "a/b", "a/b/c"])]
    #[case::single("dev", &["dev"])]
    #[case::empty("", &[""])]
    #[case::trailing_separator("a/", &["a", "a/"])]
    #[case::leading_separator("/a", &["", "/a"])]
    #[case::doubled_separator("a//b", &["a", "a/", "a//b"])]
    fn expands_ancestor_chain(#[case] key: &str, #[case] expected: &[&str]) {
        let chain: Vec<&str> = ancestors(key).collect();
        assert_eq!(chain, expected);
    }

    #[rstest]
    #[case("", 1)]
    #[case("dev", 1)]
    #[case("dev/staging", 2)]
    fn depth_matches_chain_length(#[case] key: &str, #[case] expected: usize) {
        assert_eq!(depth(key), expected);
        assert_eq!(ancestors(key).count(), expected);
    }
}
