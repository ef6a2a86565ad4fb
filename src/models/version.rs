use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$")
        .expect("Invalid version regex")
});

/// Engine version read from a project feature tag
///
/// Feature tags spell versions loosely (`4.3`, `4.2.1`, `4.4-beta1`), so
/// missing components are read as zero. The original spelling is kept for
/// display and for naming downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineVersion {
    version: Version,
    original: String,
}

impl EngineVersion {
    /// Parse a version-looking tag, or `None` for tags like `Forward Plus`
    pub fn parse(text: &str) -> Option<Self> {
        let captures = VERSION_PATTERN.captures(text.trim())?;
        let component = |index: usize| -> Option<u64> {
            captures
                .get(index)
                .map_or(Some(0), |m| m.as_str().parse().ok())
        };

        let mut version = Version::new(component(1)?, component(2)?, component(3)?);
        if let Some(pre) = captures.get(4) {
            version.pre = Prerelease::new(pre.as_str()).ok()?;
        }
        if let Some(build) = captures.get(5) {
            version.build = BuildMetadata::new(build.as_str()).ok()?;
        }

        Some(Self {
            version,
            original: text.trim().to_string(),
        })
    }

    /// The highest version among a set of tags, if any of them is a version
    pub fn highest<'a>(tags: impl IntoIterator<Item = &'a String>) -> Option<Self> {
        tags.into_iter().filter_map(|tag| Self::parse(tag)).max()
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The tag exactly as written in the project file
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl PartialOrd for EngineVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EngineVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.original.cmp(&other.original))
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_tag_is_padded() {
        let version = EngineVersion::parse("4.3").unwrap();
        assert_eq!(version.version(), &Version::new(4, 3, 0));
        assert_eq!(version.original(), "4.3");
    }

    #[test]
    fn test_prerelease_tag() {
        let version = EngineVersion::parse("4.4-beta1").unwrap();
        assert_eq!(version.version().pre.as_str(), "beta1");
        assert!(version < EngineVersion::parse("4.4").unwrap());
    }

    #[test]
    fn test_non_version_tags_are_ignored() {
        assert!(EngineVersion::parse("Forward Plus").is_none());
        assert!(EngineVersion::parse("C#").is_none());
        assert!(EngineVersion::parse("").is_none());
    }

    #[test]
    fn test_highest_picks_largest() {
        let tags = vec![
            "4.2".to_string(),
            "Mobile".to_string(),
            "4.10".to_string(),
            "4.3.1".to_string(),
        ];
        assert_eq!(EngineVersion::highest(&tags).unwrap().original(), "4.10");
    }

    #[test]
    fn test_highest_of_no_versions() {
        let tags = vec!["GL Compatibility".to_string()];
        assert!(EngineVersion::highest(&tags).is_none());
    }
}
