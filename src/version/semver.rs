use std::cmp::Ordering;
use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};

/// A parsed image tag that keeps the tag exactly as the registry returned it.
///
/// Equality and ordering use version precedence only, so `v1.2` and `1.2.0`
/// compare equal while still rendering differently.
#[derive(Debug, Clone)]
pub struct ImageVersion {
    original: String,
    version: Version,
    /// Numeric segments past the patch component (e.g. `5329` in `10.0.17763.5329`)
    extra: Vec<u64>,
}

impl ImageVersion {
    /// Parse a tag into a comparable version.
    ///
    /// Accepts an optional `v` prefix and any number of numeric segments.
    /// Segments are read as integers, so leading zeros are allowed, and
    /// missing ones count as zero:
    /// - "1" -> 1.0.0
    /// - "v1.2" -> 1.2.0
    /// - "2024.01.05" -> 2024.1.5
    /// - "10.0.17763.5329" -> 10.0.17763 plus segment 5329
    /// - "1.2.3-rc.1+build.5" -> 1.2.3-rc.1+build.5
    ///
    /// Returns None for anything else ("latest", "1..2", "stable-alpine").
    pub fn parse(tag: &str) -> Option<Self> {
        let trimmed = tag.strip_prefix('v').unwrap_or(tag);
        let (version, extra) = parse_version(trimmed)?;

        Some(Self {
            original: tag.to_string(),
            version,
            extra,
        })
    }

    /// The tag as it was given to [`ImageVersion::parse`]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The first three segments with pre-release and build metadata
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn less_than(&self, other: &ImageVersion) -> bool {
        self < other
    }

    fn segment(&self, index: usize) -> u64 {
        match index {
            0 => self.version.major,
            1 => self.version.minor,
            2 => self.version.patch,
            _ => self.extra.get(index - 3).copied().unwrap_or(0),
        }
    }
}

impl PartialEq for ImageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ImageVersion {}

impl PartialOrd for ImageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ImageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Numeric segments first, then pre-release. Build metadata is ignored.
        let segments = 3 + self.extra.len().max(other.extra.len());
        (0..segments)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.version.pre.cmp(&other.version.pre))
    }
}

impl fmt::Display for ImageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Split a version into numeric segments, pre-release and build metadata.
fn parse_version(version: &str) -> Option<(Version, Vec<u64>)> {
    let (rest, build) = match version.split_once('+') {
        Some((rest, build)) => (rest, BuildMetadata::new(build).ok()?),
        None => (version, BuildMetadata::EMPTY),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Prerelease::new(pre).ok()?),
        None => (rest, Prerelease::EMPTY),
    };

    let mut segments = core
        .split('.')
        .map(parse_segment)
        .collect::<Option<Vec<u64>>>()?
        .into_iter();

    let version = Version {
        major: segments.next()?,
        minor: segments.next().unwrap_or(0),
        patch: segments.next().unwrap_or(0),
        pre,
        build,
    };
    Some((version, segments.collect()))
}

fn parse_segment(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
