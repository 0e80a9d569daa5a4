//! Syntactic pre-filter for registry tags

/// Keep tags that look like release versions.
///
/// A tag is kept when it contains at least one `.` and no `-`, which drops
/// floating tags ("latest", "alpine") and qualified builds ("1.2.3-rc1",
/// "1.25-alpine") before any parsing happens. Order is preserved and
/// duplicates are kept.
pub fn filter_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().filter(|tag| is_release_like(tag)).collect()
}

fn is_release_like(tag: &str) -> bool {
    tag.contains('.') && !tag.contains('-')
}
