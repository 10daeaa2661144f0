use crate::index::manifest::DependencyIndex;

/// One node of a [`ListingTree`]: a path segment, plus the identifier when a file ends here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingNode {
    /// Path segment shown for this node.
    pub label: String,
    /// Identifier whose filename ends at this node.
    pub id: Option<String>,
    /// Child segments in insertion (natural) order.
    pub children: Vec<ListingNode>,
}

impl ListingNode {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            id: None,
            children: Vec::new(),
        }
    }

    fn child_mut(&mut self, label: &str) -> &mut ListingNode {
        let pos = match self.children.iter().position(|c| c.label == label) {
            Some(pos) => pos,
            None => {
                self.children.push(ListingNode::new(label));
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }
}

/// Folder-style view of an index: filenames split on `/`, entries in natural order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingTree {
    roots: Vec<ListingNode>,
}

impl ListingTree {
    /// Group `index`'s entries by filename path segments.
    pub fn build(index: &DependencyIndex) -> Self {
        let mut root = ListingNode::new("");
        for (id, filename) in index.entries() {
            let mut node = &mut root;
            for part in filename.split('/') {
                node = node.child_mut(part);
            }
            node.id = Some(id.to_string());
        }
        Self {
            roots: root.children,
        }
    }

    /// Top-level nodes.
    pub fn roots(&self) -> &[ListingNode] {
        &self.roots
    }

    /// First identifier in display order, the default selection.
    pub fn first_id(&self) -> Option<&str> {
        fn walk(nodes: &[ListingNode]) -> Option<&str> {
            for n in nodes {
                if let Some(id) = n.id.as_deref() {
                    return Some(id);
                }
                if let Some(id) = walk(&n.children) {
                    return Some(id);
                }
            }
            None
        }
        walk(&self.roots)
    }

    /// Depth-first `(depth, node)` pairs, parents before children.
    pub fn walk(&self) -> Vec<(usize, &ListingNode)> {
        fn visit<'a>(nodes: &'a [ListingNode], depth: usize, out: &mut Vec<(usize, &'a ListingNode)>) {
            for n in nodes {
                out.push((depth, n));
                visit(&n.children, depth + 1, out);
            }
        }
        let mut out = Vec::new();
        visit(&self.roots, 0, &mut out);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/index/listing.rs"]
mod tests;
