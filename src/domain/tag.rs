use crate::domain::version::SemanticVersion;
use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

static VERSION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?[0-9]+\.[0-9]+\.[0-9]+(-[A-Za-z0-9.-]+)?$").expect("version tag pattern")
});

/// Whether a tag name looks like `[v]MAJOR.MINOR.PATCH[-PRERELEASE]`
pub fn is_version_tag(name: &str) -> bool {
    VERSION_TAG.is_match(name)
}

/// Parse every version-looking tag and sort ascending by precedence.
///
/// Tags that do not look like versions are skipped. A tag that looks like a
/// version but cannot be parsed is an error. The sort is stable, so tags of
/// equal precedence (`v1.0.0` and `1.0.0`) keep their input order.
pub fn version_tags<I, S>(tag_names: I) -> Result<Vec<SemanticVersion>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut versions = Vec::new();
    for name in tag_names {
        let name = name.as_ref();
        if !is_version_tag(name) {
            continue;
        }
        versions.push(SemanticVersion::parse(name)?);
    }

    versions.sort_by(|a, b| a.cmp_precedence(b));
    Ok(versions)
}

/// Pick the latest version from an ascending list.
///
/// With `include_prereleases` the top entry wins. Otherwise the highest
/// release wins, and the top pre-release only when no release exists.
pub fn select_latest(
    sorted: &[SemanticVersion],
    include_prereleases: bool,
) -> Option<&SemanticVersion> {
    if include_prereleases {
        return sorted.last();
    }

    sorted
        .iter()
        .rev()
        .find(|version| !version.is_prerelease())
        .or_else(|| sorted.last())
}

/// Latest version among `tag_names`, `None` when no tag qualifies
pub fn find_latest<I, S>(
    tag_names: I,
    include_prereleases: bool,
) -> Result<Option<SemanticVersion>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let versions = version_tags(tag_names)?;
    Ok(select_latest(&versions, include_prereleases).cloned())
}

/// Latest version among `tag_names`, or `0.0.0` when none qualifies
pub fn latest_version<I, S>(tag_names: I, include_prereleases: bool) -> Result<SemanticVersion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(find_latest(tag_names, include_prereleases)?.unwrap_or_else(SemanticVersion::zero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagBumpError;

    #[test]
    fn test_is_version_tag() {
        assert!(is_version_tag("v1.2.3"));
        assert!(is_version_tag("1.2.3"));
        assert!(is_version_tag("1.2.3-rc.1"));
        assert!(is_version_tag("v10.20.30-alpha-beta.7"));
    }

    #[test]
    fn test_is_version_tag_rejects() {
        assert!(!is_version_tag("not-a-version"));
        assert!(!is_version_tag("V1.2.3"));
        assert!(!is_version_tag("1.2"));
        assert!(!is_version_tag("1x2x3"));
        assert!(!is_version_tag("release-1.2.3"));
        assert!(!is_version_tag("1.2.3+build.5"));
        assert!(!is_version_tag("1.2.3-"));
    }

    #[test]
    fn test_latest_excludes_prereleases() {
        let latest = latest_version(["v1.0.0", "v1.1.0-rc.1"], false).unwrap();
        assert_eq!(latest.to_string(), "v1.0.0");
    }

    #[test]
    fn test_latest_includes_prereleases() {
        let latest = latest_version(["v1.0.0", "v1.1.0-rc.1"], true).unwrap();
        assert_eq!(latest.to_string(), "v1.1.0-rc.1");
    }

    #[test]
    fn test_latest_ignores_non_versions() {
        let tags = ["v1.0.0", "v1.1.0-rc.1", "v0.9.0", "not-a-version"];
        let latest = latest_version(tags, false).unwrap();
        assert_eq!(latest, SemanticVersion::parse("v1.0.0").unwrap());
    }

    #[test]
    fn test_latest_no_tags_is_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(latest_version(empty, false).unwrap(), SemanticVersion::zero());
        assert_eq!(
            latest_version(["nightly", "stable"], true).unwrap(),
            SemanticVersion::zero()
        );
    }

    #[test]
    fn test_find_latest_reports_absence() {
        assert_eq!(find_latest(["nightly", "stable"], false).unwrap(), None);
        assert_eq!(
            find_latest(["v0.1.0", "nightly"], false).unwrap(),
            Some(SemanticVersion::parse("v0.1.0").unwrap())
        );
    }

    #[test]
    fn test_latest_only_prereleases_falls_back() {
        let latest = latest_version(["1.0.0-rc.1", "1.0.0-rc.2", "0.1.0-beta"], false).unwrap();
        assert_eq!(latest.to_string(), "1.0.0-rc.2");
    }

    #[test]
    fn test_latest_numeric_ordering() {
        let tags = ["v1.9.0", "v1.10.0", "v1.2.0"];
        assert_eq!(latest_version(tags, false).unwrap().to_string(), "v1.10.0");
    }

    #[test]
    fn test_latest_prerelease_precedence() {
        let tags = ["2.0.0-rc.9", "2.0.0-rc.10", "2.0.0-beta.11"];
        assert_eq!(latest_version(tags, true).unwrap().to_string(), "2.0.0-rc.10");
    }

    #[test]
    fn test_release_beats_its_prereleases() {
        let tags = ["2.0.0", "2.0.0-rc.3"];
        assert_eq!(latest_version(tags, true).unwrap().to_string(), "2.0.0");
    }

    #[test]
    fn test_equal_precedence_keeps_last_in_input_order() {
        let latest = latest_version(["v1.0.0", "1.0.0"], false).unwrap();
        assert!(!latest.v_prefix);
        let latest = latest_version(["1.0.0", "v1.0.0"], false).unwrap();
        assert!(latest.v_prefix);
    }

    #[test]
    fn test_malformed_qualifying_tag_is_error() {
        let err = latest_version(["v1.0.0", "v1.0.1-alpha.01"], false).unwrap_err();
        match err {
            TagBumpError::MalformedTag { tag, .. } => assert_eq!(tag, "v1.0.1-alpha.01"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_version_tags_sorted_ascending() {
        let versions = version_tags(vec!["3.0.0".to_string(), "1.0.0".to_string(), "2.0.0".to_string()])
            .unwrap();
        let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["1.0.0", "2.0.0", "3.0.0"]);
    }

    #[test]
    fn test_select_latest_empty() {
        assert_eq!(select_latest(&[], true), None);
        assert_eq!(select_latest(&[], false), None);
    }
}
