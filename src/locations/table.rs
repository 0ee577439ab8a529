//! Frozen prefix table used for all runtime lookups.

/// One prefix with its locations in lookup order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixEntry {
    /// Normalized prefix (`""` or `segment/.../`).
    pub prefix: String,
    /// Backing locations, newest registration first.
    pub locations: Vec<String>,
}

impl PrefixEntry {
    /// Remainder of `path` under this prefix, if the prefix applies.
    ///
    /// `foo/` applies to `foo/bar` (remainder `bar`) and to `foo` itself
    /// (remainder `""`), never to `foobar`.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            return Some(path);
        }
        if let Some(rest) = path.strip_prefix(self.prefix.as_str()) {
            return Some(rest);
        }
        (path == self.prefix.trim_end_matches('/')).then_some("")
    }
}

/// Immutable snapshot of a `LocationRegistry`, ordered by descending prefix
/// length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPrefixTable {
    entries: Vec<PrefixEntry>,
}

impl ResolvedPrefixTable {
    pub(crate) fn new(entries: Vec<PrefixEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PrefixEntry] {
        &self.entries
    }

    /// Entries applying to `path`, most specific first, with the remainder of
    /// the path under each.
    pub fn matching<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = (&'a PrefixEntry, &'a str)> + 'a {
        self.entries
            .iter()
            .filter_map(move |entry| entry.strip(path).map(|rest| (entry, rest)))
    }

    /// Most specific entry applying to `path`.
    pub fn first_match<'a>(&'a self, path: &'a str) -> Option<(&'a PrefixEntry, &'a str)> {
        self.matching(path).next()
    }

    /// Every location in lookup order (for diagnostics).
    pub fn all_locations(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|entry| entry.locations.iter().cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::LocationRegistry;

    fn table() -> ResolvedPrefixTable {
        let mut registry = LocationRegistry::new();
        registry
            .register("", "root/")
            .register("/foo", "foo/")
            .register("/foo/bar", "foobar/");
        registry.freeze()
    }

    #[test]
    fn test_strip_respects_segment_boundary() {
        let entry = PrefixEntry {
            prefix: "foo/".into(),
            locations: vec![],
        };
        assert_eq!(entry.strip("foo/x.js"), Some("x.js"));
        assert_eq!(entry.strip("foo"), Some(""));
        assert_eq!(entry.strip("foobar/x.js"), None);
    }

    #[test]
    fn test_matching_order() {
        let table = table();
        let matched: Vec<(&str, &str)> = table
            .matching("foo/bar/file.txt")
            .map(|(e, rest)| (e.prefix.as_str(), rest))
            .collect();
        assert_eq!(
            matched,
            [
                ("foo/bar/", "file.txt"),
                ("foo/", "bar/file.txt"),
                ("", "foo/bar/file.txt")
            ]
        );
    }

    #[test]
    fn test_first_match_falls_back_to_root() {
        let table = table();
        let (entry, rest) = table.first_match("other/page").unwrap();
        assert_eq!(entry.prefix, "");
        assert_eq!(rest, "other/page");
    }
}
