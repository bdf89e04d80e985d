//! Decorated markup tree: categorized span wrappers over plain text runs.
//!
//! The tree is the formatted view of a plain-text buffer. Leaves are text
//! runs; internal nodes are style wrappers carrying a [`SpanCategory`].
//! Concatenating all leaf text in document order always reproduces the plain
//! text exactly: decoration is lossless and order-preserving.

use std::ops::Range;

/// Token category attached to a span wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanCategory {
    /// Digits-only line opening a subtitle cue block.
    SequenceNumber,
    /// `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing text.
    TimeRange,
    /// `[` through the nearest `]`, including the brackets.
    BracketTag,
    /// A single comma.
    Comma,
    /// A single period.
    Period,
    /// One of `?`, `!`, `;`.
    TerminalPunct,
    /// A run of two or more consecutive spaces.
    SpaceRun,
}

impl SpanCategory {
    /// Returns the CSS-style class name used in serialized markup.
    pub fn as_class(&self) -> &'static str {
        match self {
            Self::SequenceNumber => "sequence-number",
            Self::TimeRange => "time-range",
            Self::BracketTag => "bracket-tag",
            Self::Comma => "comma",
            Self::Period => "period",
            Self::TerminalPunct => "terminal-punct",
            Self::SpaceRun => "space-run",
        }
    }
}

/// Handle to a node owned by a [`MarkupTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug, PartialEq, Eq)]
enum Node {
    Text(String),
    Span {
        category: SpanCategory,
        children: Vec<NodeId>,
    },
}

/// Arena-allocated decorated tree.
///
/// Nodes are owned by the tree and addressed by [`NodeId`] handles; child
/// order is document order. The tree is mutable so a rendering surface can
/// apply user edits to leaf text in place between render cycles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkupTree {
    nodes: Vec<Node>,
    root: Vec<NodeId>,
}

impl MarkupTree {
    /// Creates an empty tree with no nodes.
    pub fn new() -> Self {
        Self::default()
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Appends a text leaf at the top level.
    ///
    /// # Returns
    /// Handle to the new leaf.
    pub fn add_text(&mut self, text: impl Into<String>) -> NodeId {
        let id = self.push_node(Node::Text(text.into()));
        self.root.push(id);
        id
    }

    /// Appends an empty span wrapper at the top level.
    ///
    /// # Returns
    /// Handle to the new span.
    pub fn add_span(&mut self, category: SpanCategory) -> NodeId {
        let id = self.push_node(Node::Span {
            category,
            children: Vec::new(),
        });
        self.root.push(id);
        id
    }

    /// Appends a text leaf as the last child of `parent`.
    ///
    /// # Returns
    /// Handle to the new leaf, or `None` when `parent` is not a span.
    pub fn add_text_in(&mut self, parent: NodeId, text: impl Into<String>) -> Option<NodeId> {
        let id = self.push_node(Node::Text(text.into()));
        match self.nodes.get_mut(parent.0) {
            Some(Node::Span { children, .. }) => {
                children.push(id);
                Some(id)
            }
            _ => {
                self.nodes.pop();
                None
            }
        }
    }

    /// Appends a span wrapper as the last child of `parent`.
    ///
    /// # Returns
    /// Handle to the new span, or `None` when `parent` is not a span.
    pub fn add_span_in(&mut self, parent: NodeId, category: SpanCategory) -> Option<NodeId> {
        let id = self.push_node(Node::Span {
            category,
            children: Vec::new(),
        });
        match self.nodes.get_mut(parent.0) {
            Some(Node::Span { children, .. }) => {
                children.push(id);
                Some(id)
            }
            _ => {
                self.nodes.pop();
                None
            }
        }
    }

    /// True when `id` refers to a text leaf in this tree.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(Node::Text(_)))
    }

    /// Returns a leaf's text.
    ///
    /// # Returns
    /// The leaf text, or `None` when `id` is not a text leaf.
    pub fn leaf_text(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id.0) {
            Some(Node::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns a leaf's length in characters.
    pub fn leaf_len_chars(&self, id: NodeId) -> Option<usize> {
        self.leaf_text(id).map(|text| text.chars().count())
    }

    /// Visits every text leaf in document order (depth-first, children left
    /// to right), regardless of wrapper nesting shape.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &str)> {
        LeafIter {
            tree: self,
            stack: self.root.iter().rev().copied().collect(),
        }
    }

    /// Concatenates all leaf text in document order.
    ///
    /// # Returns
    /// The plain text this tree decorates.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for (_, text) in self.leaves() {
            out.push_str(text);
        }
        out
    }

    /// Total leaf text length in characters.
    pub fn len_chars(&self) -> usize {
        self.leaves().map(|(_, text)| text.chars().count()).sum()
    }

    /// Serializes the tree to markup, escaping `&`, `<`, and `>` in leaf
    /// text. Escaping happens here only; all offset math stays defined over
    /// the pre-escape character counts.
    ///
    /// # Returns
    /// Markup string; byte-equal outputs identify structurally identical
    /// renderings.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for &child in &self.root {
            self.serialize_node(child, &mut out);
        }
        out
    }

    fn serialize_node(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0] {
            Node::Text(text) => push_escaped(text, out),
            Node::Span { category, children } => {
                out.push_str("<span class=\"");
                out.push_str(category.as_class());
                out.push_str("\">");
                for &child in children {
                    self.serialize_node(child, out);
                }
                out.push_str("</span>");
            }
        }
    }

    /// Inserts text into a leaf at a character position, clamping the
    /// position to the leaf's length.
    ///
    /// # Returns
    /// `true` when `id` was a text leaf and the insert happened.
    pub fn insert_in_leaf(&mut self, id: NodeId, char_pos: usize, text: &str) -> bool {
        let Some(Node::Text(leaf)) = self.nodes.get_mut(id.0) else {
            return false;
        };
        let byte_pos = char_to_byte(leaf, char_pos);
        leaf.insert_str(byte_pos, text);
        true
    }

    /// Deletes a character range from a leaf, clamping the range to the
    /// leaf's length.
    ///
    /// # Returns
    /// `true` when `id` was a text leaf (even if the clamped range was
    /// empty).
    pub fn delete_in_leaf(&mut self, id: NodeId, chars: Range<usize>) -> bool {
        let Some(Node::Text(leaf)) = self.nodes.get_mut(id.0) else {
            return false;
        };
        let start = char_to_byte(leaf, chars.start);
        let end = char_to_byte(leaf, chars.end.max(chars.start));
        leaf.replace_range(start..end, "");
        true
    }
}

struct LeafIter<'a> {
    tree: &'a MarkupTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for LeafIter<'a> {
    type Item = (NodeId, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            match &self.tree.nodes[id.0] {
                Node::Text(text) => return Some((id, text.as_str())),
                Node::Span { children, .. } => {
                    self.stack.extend(children.iter().rev().copied());
                }
            }
        }
        None
    }
}

fn char_to_byte(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

fn push_escaped(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_concatenation_reproduces_plain_text() {
        let mut tree = MarkupTree::new();
        tree.add_text("Hello");
        let span = tree.add_span(SpanCategory::Comma);
        tree.add_text_in(span, ",").expect("span parent");
        tree.add_text(" world");

        assert_eq!(tree.plain_text(), "Hello, world");
        assert_eq!(tree.len_chars(), 12);
    }

    #[test]
    fn leaves_visit_nested_wrappers_in_document_order() {
        let mut tree = MarkupTree::new();
        tree.add_text("a");
        let outer = tree.add_span(SpanCategory::BracketTag);
        tree.add_text_in(outer, "b").expect("span parent");
        let inner = tree.add_span_in(outer, SpanCategory::Comma).expect("span");
        tree.add_text_in(inner, "c").expect("span parent");
        tree.add_text_in(outer, "d").expect("span parent");
        tree.add_text("e");

        let order: String = tree.leaves().map(|(_, text)| text).collect();
        assert_eq!(order, "abcde");
    }

    #[test]
    fn serialize_escapes_markup_characters_in_leaves_only() {
        let mut tree = MarkupTree::new();
        let span = tree.add_span(SpanCategory::BracketTag);
        tree.add_text_in(span, "[a<b>&c]").expect("span parent");

        assert_eq!(
            tree.serialize(),
            "<span class=\"bracket-tag\">[a&lt;b&gt;&amp;c]</span>"
        );
        // Offset math stays pre-escape.
        assert_eq!(tree.len_chars(), 8);
    }

    #[test]
    fn child_helpers_reject_leaf_parents() {
        let mut tree = MarkupTree::new();
        let leaf = tree.add_text("x");
        assert!(tree.add_text_in(leaf, "y").is_none());
        assert!(tree.add_span_in(leaf, SpanCategory::Comma).is_none());
        assert_eq!(tree.plain_text(), "x");
    }

    #[test]
    fn leaf_edits_clamp_positions() {
        let mut tree = MarkupTree::new();
        let leaf = tree.add_text("héllo");

        assert!(tree.insert_in_leaf(leaf, 99, "!"));
        assert_eq!(tree.leaf_text(leaf), Some("héllo!"));

        assert!(tree.delete_in_leaf(leaf, 1..3));
        assert_eq!(tree.leaf_text(leaf), Some("hlo!"));

        assert!(tree.delete_in_leaf(leaf, 2..100));
        assert_eq!(tree.leaf_text(leaf), Some("hl"));

        let span = tree.add_span(SpanCategory::Comma);
        assert!(tree.is_leaf(leaf));
        assert!(!tree.is_leaf(span));
        assert!(!tree.insert_in_leaf(span, 0, "x"));
    }
}
