use std::path::{Component, Path, PathBuf};

use non_empty_string::NonEmptyString;
use path_clean::PathClean;

/// Metadata declared at the top of a standards document.
///
/// A header can only be constructed with all of its required fields present,
/// so every `StandardsHeader` in the system is valid by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardsHeader {
    title: NonEmptyString,
    description: NonEmptyString,
    scope: NonEmptyString,
    topics: Vec<String>,
    parent: Option<PathBuf>,
}

impl StandardsHeader {
    /// Creates a new header without a parent.
    ///
    /// # Errors
    ///
    /// Returns [`IncompleteHeader`] listing every required field that is
    /// empty.
    pub fn new(
        title: String,
        description: String,
        scope: String,
        topics: Vec<String>,
    ) -> Result<Self, IncompleteHeader> {
        let mut missing = Vec::new();

        let title = NonEmptyString::new(title).map_err(|_| missing.push("title"));
        let description =
            NonEmptyString::new(description).map_err(|_| missing.push("description"));
        let scope = NonEmptyString::new(scope).map_err(|_| missing.push("scope"));

        match (title, description, scope) {
            (Ok(title), Ok(description), Ok(scope)) => Ok(Self {
                title,
                description,
                scope,
                topics,
                parent: None,
            }),
            _ => Err(IncompleteHeader(missing)),
        }
    }

    /// Sets the path of the parent document.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// The human-readable title of the document.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// A short summary of what the document covers.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// The glob-like pattern of files the document applies to.
    ///
    /// This is opaque to the indexer.
    #[must_use]
    pub fn scope(&self) -> &str {
        self.scope.as_str()
    }

    /// Tags associating the document with frameworks, tools or domains.
    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// The path of the parent document, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Path> {
        self.parent.as_deref()
    }

    /// Rewrites the parent reference so that it is rooted at `root`.
    ///
    /// Parents are authored relative to the root of the indexed tree, while
    /// document paths found by traversal are prefixed with the walked root.
    /// After anchoring, the two are directly comparable.
    ///
    /// A leading `/` (or drive prefix) on the parent still refers to the
    /// indexed root, never to the filesystem root.
    pub(crate) fn anchor_parent(&mut self, root: &Path) {
        if let Some(parent) = self.parent.as_mut() {
            let relative: PathBuf = parent
                .components()
                .filter(|component| {
                    matches!(
                        component,
                        Component::Normal(_) | Component::CurDir | Component::ParentDir
                    )
                })
                .collect();
            *parent = root.join(relative).clean();
        }
    }
}

/// The required header fields that were missing or empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", .0.join(", "))]
pub struct IncompleteHeader(pub Vec<&'static str>);

/// A document with a valid header, found while indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardsFile {
    /// The path of the document, prefixed with the indexed root.
    pub path: PathBuf,
    /// The document's header.
    pub header: StandardsHeader,
}

impl StandardsFile {
    /// Pairs a document path with its header.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, header: StandardsHeader) -> Self {
        Self {
            path: path.into(),
            header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> StandardsHeader {
        StandardsHeader::new(
            "Golang General Standards".to_string(),
            "General standards for writing Go applications.".to_string(),
            "*.go".to_string(),
            vec!["golang".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn new_header_has_no_parent() {
        let header = header();

        assert_eq!(header.title(), "Golang General Standards");
        assert_eq!(header.scope(), "*.go");
        assert_eq!(header.topics(), ["golang".to_string()]);
        assert!(header.parent().is_none());
    }

    #[test]
    fn empty_required_fields_are_all_reported() {
        let error =
            StandardsHeader::new(String::new(), "desc".to_string(), String::new(), vec![])
                .unwrap_err();

        assert_eq!(error, IncompleteHeader(vec!["title", "scope"]));
        assert_eq!(error.to_string(), "missing required fields: title, scope");
    }

    #[test]
    fn empty_topics_are_allowed() {
        let header = StandardsHeader::new(
            "Title".to_string(),
            "Description".to_string(),
            "*".to_string(),
            Vec::new(),
        )
        .unwrap();

        assert!(header.topics().is_empty());
    }

    #[test]
    fn anchor_parent_joins_root() {
        let mut header = header().with_parent("sub/OTHER.md");
        header.anchor_parent(Path::new("tree"));

        assert_eq!(header.parent(), Some(Path::new("tree/sub/OTHER.md")));
    }

    #[test]
    fn anchor_parent_cleans_dot_segments() {
        let mut header = header().with_parent("./sub/../OTHER.md");
        header.anchor_parent(Path::new("./tree"));

        assert_eq!(header.parent(), Some(Path::new("tree/OTHER.md")));
    }

    #[test]
    fn anchor_parent_keeps_root_for_leading_slash() {
        let mut header = header().with_parent("/sub/OTHER.md");
        header.anchor_parent(Path::new("tree"));

        assert_eq!(header.parent(), Some(Path::new("tree/sub/OTHER.md")));
    }

    #[test]
    fn anchor_parent_without_parent_is_noop() {
        let mut header = header();
        header.anchor_parent(Path::new("tree"));

        assert!(header.parent().is_none());
    }
}
