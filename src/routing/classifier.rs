//! File / template / view classification.
//!
//! # Responsibilities
//! - Decide whether a request path looks like a file (file pattern, first
//!   capture group is the file name)
//! - Split file requests into assets and direct template calls
//! - Compute the logical page path for everything else

use regex::Regex;

use crate::routing::path::{end_slash, strip_mount};

/// Outcome of classifying a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Static file, served by the asset collaborator. `path` is relative to
    /// the mount.
    Asset { path: String },
    /// File-like request naming a renderable template.
    DirectTemplate { page: String },
    /// Anything else: handed to the view layer as a logical page.
    DynamicView { page: String },
}

impl Classification {
    /// Logical path (relative to the mount) of whatever was classified.
    pub fn target(&self) -> &str {
        match self {
            Classification::Asset { path } => path,
            Classification::DirectTemplate { page } | Classification::DynamicView { page } => page,
        }
    }
}

/// Stateless classifier bound to one application's settings.
#[derive(Debug, Clone, Copy)]
pub struct RequestClassifier<'a> {
    mount: &'a str,
    index: &'a str,
    file_pattern: &'a Regex,
}

impl<'a> RequestClassifier<'a> {
    pub fn new(mount: &'a str, index: &'a str, file_pattern: &'a Regex) -> Self {
        Self {
            mount,
            index,
            file_pattern,
        }
    }

    /// True when the path addresses the application root.
    pub fn is_root(&self, path: &str) -> bool {
        end_slash(path) == self.mount
    }

    /// File name the request points to, if it looks like a file.
    ///
    /// Root requests only yield a candidate when the configured index itself
    /// looks like a file. Only the path is matched, never the query string.
    pub fn file_candidate(&self, path: &str) -> Option<String> {
        if self.is_root(path) {
            return self
                .file_pattern
                .is_match(self.index)
                .then(|| self.index.to_string());
        }
        self.file_pattern
            .captures(path)
            .and_then(|captures| captures.get(1))
            .map(|name| name.as_str().to_string())
    }

    /// Logical page path: mount stripped, index for the root.
    pub fn page(&self, path: &str) -> String {
        let page = strip_mount(path, self.mount);
        if page.is_empty() {
            self.index.to_string()
        } else {
            page.to_string()
        }
    }

    /// Classify a request.
    pub fn classify(&self, path: &str, is_template: impl Fn(&str) -> bool) -> Classification {
        let page = self.page(path);
        match self.file_candidate(path) {
            Some(file) if is_template(&file) => Classification::DirectTemplate { page },
            Some(_) => Classification::Asset { path: page },
            None => Classification::DynamicView { page },
        }
    }

    /// Classify a logical page (relative to the mount), e.g. a configured
    /// error page or the index.
    pub fn classify_page(&self, page: &str, is_template: impl Fn(&str) -> bool) -> Classification {
        let path = format!("{}{}", self.mount, page.trim_start_matches('/'));
        self.classify(&path, is_template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::builder::DEFAULT_FILE_PATTERN;

    fn pattern() -> Regex {
        Regex::new(DEFAULT_FILE_PATTERN).unwrap()
    }

    fn templates(name: &str) -> bool {
        name.ends_with(".ftl")
    }

    #[test]
    fn test_root_uses_index_as_candidate() {
        let pattern = Regex::new(r".*\.(\w+)$").unwrap();
        let classifier = RequestClassifier::new("/app/", "index.html", &pattern);
        assert_eq!(
            classifier.file_candidate("/app/").as_deref(),
            Some("index.html")
        );
        assert_eq!(
            classifier.file_candidate("/app").as_deref(),
            Some("index.html")
        );
    }

    #[test]
    fn test_root_with_path_like_index_has_no_candidate() {
        let pattern = pattern();
        let classifier = RequestClassifier::new("/app/", "home", &pattern);
        assert_eq!(classifier.file_candidate("/app/"), None);
        assert_eq!(
            classifier.classify("/app/", templates),
            Classification::DynamicView {
                page: "home".into()
            }
        );
    }

    #[test]
    fn test_query_excluded_from_candidate() {
        let pattern = pattern();
        let classifier = RequestClassifier::new("/app/", "index.html", &pattern);
        assert_eq!(
            classifier.file_candidate("/app/data.json").as_deref(),
            Some("data.json")
        );
        assert_eq!(classifier.file_candidate("/app/data"), None);
    }

    #[test]
    fn test_dotted_query_does_not_make_a_file() {
        let pattern = pattern();
        let classifier = RequestClassifier::new("/app/", "index.html", &pattern);
        // the dispatcher passes `uri.path()`, the query never reaches the pattern
        let uri: axum::http::Uri = "/app/search?q=report.pdf".parse().unwrap();
        assert_eq!(classifier.file_candidate(uri.path()), None);
        assert_eq!(
            classifier.classify(uri.path(), templates),
            Classification::DynamicView {
                page: "search".into()
            }
        );

        let uri: axum::http::Uri = "/app/users?next=a.ftl".parse().unwrap();
        assert_eq!(
            classifier.classify(uri.path(), templates),
            Classification::DynamicView {
                page: "users".into()
            }
        );
    }

    #[test]
    fn test_classify_asset() {
        let pattern = pattern();
        let classifier = RequestClassifier::new("/app/", "index.html", &pattern);
        assert_eq!(
            classifier.classify("/app/css/style.css", templates),
            Classification::Asset {
                path: "css/style.css".into()
            }
        );
        assert_eq!(
            classifier.classify("/app/", templates),
            Classification::Asset {
                path: "index.html".into()
            }
        );
    }

    #[test]
    fn test_classify_direct_template() {
        let pattern = pattern();
        let classifier = RequestClassifier::new("/app/", "index.html", &pattern);
        assert_eq!(
            classifier.classify("/app/pages/about.ftl", templates),
            Classification::DirectTemplate {
                page: "pages/about.ftl".into()
            }
        );
    }

    #[test]
    fn test_classify_dynamic_view() {
        let pattern = pattern();
        let classifier = RequestClassifier::new("/app/", "index.html", &pattern);
        assert_eq!(
            classifier.classify("/app/users/42", templates),
            Classification::DynamicView {
                page: "users/42".into()
            }
        );
    }

    #[test]
    fn test_classify_page_for_error_pages() {
        let pattern = pattern();
        let classifier = RequestClassifier::new("/app/", "index.html", &pattern);
        assert_eq!(
            classifier.classify_page("errors/500.html", templates),
            Classification::Asset {
                path: "errors/500.html".into()
            }
        );
        assert_eq!(
            classifier.classify_page("/error500", templates),
            Classification::DynamicView {
                page: "error500".into()
            }
        );
    }
}
