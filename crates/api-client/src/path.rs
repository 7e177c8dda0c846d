//! Resource paths relative to the base address.

/// A path below the base address, held as raw (unencoded) segments.
///
/// Built either from a `/`-separated string (`"/tenants"`) or by appending
/// single segments with [`ResourcePath::join`]. Encoding happens once, in
/// [`crate::BaseAddress::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Splits `path` on `/`, ignoring empty segments.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Appends one segment verbatim. A `/` inside it is encoded, not split.
    pub fn join(mut self, segment: impl std::fmt::Display) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<&str> for ResourcePath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for ResourcePath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_redundant_slashes() {
        let p = ResourcePath::parse("//tenants/t1/config/");
        assert_eq!(p.segments(), ["tenants", "t1", "config"]);
        assert_eq!(p.to_string(), "/tenants/t1/config");
    }

    #[test]
    fn join_keeps_slashes_inside_a_segment() {
        let p = ResourcePath::from("/videos").join("a/b");
        assert_eq!(p.segments(), ["videos", "a/b"]);
    }

    #[test]
    fn empty_path_displays_as_root() {
        assert_eq!(ResourcePath::default().to_string(), "/");
    }
}
