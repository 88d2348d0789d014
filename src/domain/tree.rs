//! The standards hierarchy.
//!
//! [`build`] turns the flat list of documents found on disk into a forest of
//! [`Node`]s, linking every document under the document its header names as
//! parent.

use std::{
    collections::HashMap,
    mem,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::StandardsFile;

/// A document in the standards hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The path of the document, prefixed with the indexed root.
    pub path: PathBuf,
    /// The document title.
    pub title: String,
    /// A short summary of what the document covers.
    pub description: String,
    /// The glob-like pattern of files the document applies to.
    pub scope: String,
    /// Tags associating the document with frameworks, tools or domains.
    pub topics: Vec<String>,
    /// Documents that declare this document as their parent, sorted by title.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl From<StandardsFile> for Node {
    fn from(file: StandardsFile) -> Self {
        let StandardsFile { path, header } = file;
        Self {
            path,
            title: header.title().to_owned(),
            description: header.description().to_owned(),
            scope: header.scope().to_owned(),
            topics: header.topics().to_vec(),
            children: Vec::new(),
        }
    }
}

/// The forest of root documents.
///
/// This is the artifact written to disk for downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardsTree {
    /// Documents without a parent, sorted by title.
    pub nodes: Vec<Node>,
}

impl StandardsTree {
    /// The number of nodes in the tree, at any depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node depth-first, parents before their children.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        let mut stack: Vec<&Node> = self.nodes.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Finds the node for the document at `path`.
    #[must_use]
    pub fn find(&self, path: &Path) -> Option<&Node> {
        self.iter().find(|node| node.path == path)
    }
}

/// A document waiting to be linked into the tree.
struct Pending {
    node: Node,
    parent: Option<PathBuf>,
}

/// Builds the standards hierarchy from a flat list of documents.
///
/// Documents without a parent become roots. A document whose parent matches
/// the path of another document is nested under it. A document whose parent
/// cannot be found is dropped from the tree entirely; it is not promoted to a
/// root.
///
/// Every list of siblings is sorted by title, so the result does not depend
/// on the order of `files`.
#[instrument(skip_all, fields(files = files.len()))]
pub fn build(files: Vec<StandardsFile>) -> StandardsTree {
    let mut index: HashMap<PathBuf, usize> = HashMap::with_capacity(files.len());
    let mut pending: Vec<Option<Pending>> = Vec::with_capacity(files.len());

    for (position, file) in files.into_iter().enumerate() {
        let parent = file.header.parent().map(Path::to_path_buf);
        if let Some(previous) = index.insert(file.path.clone(), position) {
            tracing::warn!(
                path = %file.path.display(),
                "found duplicate document path. keeping the last one."
            );
            pending[previous] = None;
        }
        pending.push(Some(Pending {
            node: Node::from(file),
            parent,
        }));
    }

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); pending.len()];

    for position in 0..pending.len() {
        let Some(entry) = &pending[position] else {
            continue;
        };
        let Some(parent) = &entry.parent else {
            roots.push(position);
            continue;
        };
        if let Some(&parent_position) = index.get(parent) {
            children[parent_position].push(position);
            continue;
        }
        tracing::warn!(
            path = %entry.node.path.display(),
            parent = %parent.display(),
            "found node with parent that does not exist. skipping."
        );
        pending[position] = None;
    }

    let mut nodes: Vec<Node> = roots
        .into_iter()
        .filter_map(|position| assemble(position, &mut pending, &mut children))
        .collect();

    // Anything left over sits under a pruned node or on a parent cycle.
    for entry in pending.into_iter().flatten() {
        tracing::warn!(
            path = %entry.node.path.display(),
            "found node that is not reachable from any root. skipping."
        );
    }

    sort_by_title(&mut nodes);
    StandardsTree { nodes }
}

/// Moves the node at `position`, and recursively its children, out of
/// `pending`.
fn assemble(
    position: usize,
    pending: &mut [Option<Pending>],
    children: &mut [Vec<usize>],
) -> Option<Node> {
    let Pending { mut node, .. } = pending[position].take()?;
    node.children = mem::take(&mut children[position])
        .into_iter()
        .filter_map(|child| assemble(child, pending, children))
        .collect();
    Some(node)
}

fn sort_by_title(nodes: &mut [Node]) {
    nodes.sort_by(|a, b| a.title.cmp(&b.title));
    for node in nodes {
        sort_by_title(&mut node.children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StandardsHeader;

    fn file(path: &str, title: &str, parent: Option<&str>) -> StandardsFile {
        let header = StandardsHeader::new(
            title.to_string(),
            format!("Standards for {title}."),
            "*".to_string(),
            vec![],
        )
        .unwrap();
        let header = match parent {
            Some(parent) => header.with_parent(parent),
            None => header,
        };
        StandardsFile::new(path, header)
    }

    fn titles(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(|node| node.title.as_str()).collect()
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        let tree = build(Vec::new());

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn documents_without_parents_are_roots() {
        let tree = build(vec![
            file("t/C.md", "C", None),
            file("t/A.md", "A", None),
            file("t/B.md", "B", None),
        ]);

        assert_eq!(titles(&tree.nodes), ["A", "B", "C"]);
        assert!(tree.nodes.iter().all(|node| node.children.is_empty()));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn child_is_nested_under_parent() {
        let tree = build(vec![
            file("t/child.md", "Child", Some("t/parent.md")),
            file("t/parent.md", "Parent", None),
        ]);

        assert_eq!(titles(&tree.nodes), ["Parent"]);
        assert_eq!(titles(&tree.nodes[0].children), ["Child"]);
        assert_eq!(tree.nodes[0].children[0].path, Path::new("t/child.md"));
    }

    #[test]
    fn dangling_parent_is_pruned() {
        let tree = build(vec![
            file("t/A.md", "A", None),
            file("t/E.md", "E", Some("t/missing.md")),
        ]);

        assert_eq!(titles(&tree.nodes), ["A"]);
        assert!(tree.find(Path::new("t/E.md")).is_none());
    }

    #[test]
    fn descendants_of_pruned_node_are_dropped() {
        let tree = build(vec![
            file("t/E.md", "E", Some("t/missing.md")),
            file("t/F.md", "F", Some("t/E.md")),
        ]);

        assert!(tree.is_empty());
    }

    #[test]
    fn self_parent_and_cycles_are_dropped() {
        let tree = build(vec![
            file("t/root.md", "Root", None),
            file("t/self.md", "Self", Some("t/self.md")),
            file("t/x.md", "X", Some("t/y.md")),
            file("t/y.md", "Y", Some("t/x.md")),
        ]);

        assert_eq!(titles(&tree.nodes), ["Root"]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn duplicate_paths_keep_last_document() {
        let tree = build(vec![
            file("t/A.md", "First", None),
            file("t/A.md", "Second", None),
        ]);

        assert_eq!(titles(&tree.nodes), ["Second"]);
    }

    #[test]
    fn siblings_are_sorted_at_every_depth() {
        let tree = build(vec![
            file("t/root.md", "Root", None),
            file("t/z.md", "Zulu", Some("t/root.md")),
            file("t/a.md", "Alpha", Some("t/root.md")),
            file("t/a2.md", "alpha", Some("t/a.md")),
            file("t/a1.md", "Beta", Some("t/a.md")),
            file("t/other.md", "Other", None),
        ]);

        assert_eq!(titles(&tree.nodes), ["Other", "Root"]);
        let root = &tree.nodes[1];
        assert_eq!(titles(&root.children), ["Alpha", "Zulu"]);
        // Byte-wise comparison places uppercase before lowercase.
        assert_eq!(titles(&root.children[0].children), ["Beta", "alpha"]);
    }

    #[test]
    fn five_document_scenario() {
        let tree = build(vec![
            file("t/A.md", "A", None),
            file("t/B.md", "B", Some("t/A.md")),
            file("t/C.md", "C", None),
            file("t/D.md", "D", Some("t/C.md")),
            file("t/E.md", "E", Some("missing-path")),
        ]);

        assert_eq!(titles(&tree.nodes), ["A", "C"]);
        assert_eq!(titles(&tree.nodes[0].children), ["B"]);
        assert_eq!(titles(&tree.nodes[1].children), ["D"]);
        assert_eq!(tree.len(), 4);
        assert!(tree.iter().all(|node| node.title != "E"));
    }

    #[test]
    fn build_is_independent_of_input_order() {
        let files = vec![
            file("t/A.md", "A", None),
            file("t/B.md", "B", Some("t/A.md")),
            file("t/C.md", "C", Some("t/A.md")),
            file("t/D.md", "D", None),
        ];
        let mut reversed = files.clone();
        reversed.reverse();

        assert_eq!(build(files), build(reversed));
    }

    #[test]
    fn iter_visits_parents_before_children() {
        let tree = build(vec![
            file("t/A.md", "A", None),
            file("t/B.md", "B", Some("t/A.md")),
            file("t/C.md", "C", None),
        ]);

        let order: Vec<&str> = tree.iter().map(|node| node.title.as_str()).collect();
        assert_eq!(order, ["A", "B", "C"]);
    }
}
