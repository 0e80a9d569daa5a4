//! Selection of tags newer than a pinned version

use crate::config::MAX_NEWER_VERSIONS;
use crate::version::semver::ImageVersion;

/// Collect the tags whose version is strictly greater than `baseline`.
///
/// Tags that do not parse are skipped. The result keeps the iteration order
/// of `candidates` (registries do not promise sorted tag lists) and, when more
/// than [`MAX_NEWER_VERSIONS`] qualify, only the last ones in that order are
/// kept. The tags are returned exactly as given, not normalized.
pub fn newer_versions(baseline: &ImageVersion, candidates: &[String]) -> Vec<String> {
    let mut newer: Vec<String> = candidates
        .iter()
        .filter_map(|tag| ImageVersion::parse(tag))
        .filter(|candidate| baseline.less_than(candidate))
        .map(|candidate| candidate.original().to_string())
        .collect();

    if newer.len() > MAX_NEWER_VERSIONS {
        newer.drain(..newer.len() - MAX_NEWER_VERSIONS);
    }

    newer
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("1.2.0", &["1.1.0", "1.2.0", "1.3.0"], &["1.3.0"])]
    #[case("1.0.0", &[], &[])]
    #[case("2.0.0", &["1.0.0", "1.5.0", "2.0.0"], &[])]
    #[case("1.0.0", &["not.a.version", "1.0.1", "1.0.x"], &["1.0.1"])] // unparsable skipped
    #[case("10.0.17763.5329", &["10.0.17763.5206", "10.0.17763.5458", "10.0.20348.2227"], &["10.0.17763.5458", "10.0.20348.2227"])]
    #[case("2024.01.05", &["2023.12.20", "2024.01.05", "2024.02.01"], &["2024.02.01"])]
    #[case("1.2", &["1.2.0", "v1.2.1", "1.3"], &["v1.2.1", "1.3"])] // originals kept
    #[case("1.0.0", &["3.0.0", "2.0.0", "1.1.0"], &["3.0.0", "2.0.0", "1.1.0"])] // not re-sorted
    fn newer_versions_returns_tags_above_baseline(
        #[case] baseline: &str,
        #[case] candidates: &[&str],
        #[case] expected: &[&str],
    ) {
        let baseline = ImageVersion::parse(baseline).unwrap();
        assert_eq!(newer_versions(&baseline, &tags(candidates)), tags(expected));
    }

    #[test]
    fn newer_versions_keeps_last_five_in_iteration_order() {
        let baseline = ImageVersion::parse("1.0.0").unwrap();
        let candidates = tags(&["1.1.0", "1.2.0", "1.3.0", "1.4.0", "1.5.0", "1.6.0"]);

        assert_eq!(
            newer_versions(&baseline, &candidates),
            tags(&["1.2.0", "1.3.0", "1.4.0", "1.5.0", "1.6.0"])
        );
    }

    #[test]
    fn newer_versions_truncates_positionally_not_by_version() {
        let baseline = ImageVersion::parse("1.0.0").unwrap();
        // The greatest version comes first and is the one dropped
        let candidates = tags(&["9.0.0", "1.1.0", "1.2.0", "1.3.0", "1.4.0", "1.5.0"]);

        assert_eq!(
            newer_versions(&baseline, &candidates),
            tags(&["1.1.0", "1.2.0", "1.3.0", "1.4.0", "1.5.0"])
        );
    }

    #[test]
    fn newer_versions_is_repeatable() {
        let baseline = ImageVersion::parse("1.0.0").unwrap();
        let candidates = tags(&["0.9.0", "1.0.1", "latest", "2.0.0"]);

        let first = newer_versions(&baseline, &candidates);
        let second = newer_versions(&baseline, &candidates);

        assert_eq!(first, second);
        assert_eq!(first, tags(&["1.0.1", "2.0.0"]));
    }
}
