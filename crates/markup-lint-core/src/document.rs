//! Read-only document tree and the walker rules traverse it with.
//!
//! Nodes live in an arena in document pre-order: a parent always precedes its
//! descendants, and siblings appear in source order. Parents own their
//! children by index; a child refers back to its parent only for lookups.

use crate::rule::RuleError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Source position of a node or token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Line number (1-indexed).
    #[serde(default)]
    pub line: usize,
    /// Column number (1-indexed).
    #[serde(default)]
    pub column: usize,
    /// Byte offset from the start of the document.
    #[serde(default)]
    pub offset: usize,
    /// Source text covered by the span.
    #[serde(default)]
    pub raw: String,
}

impl Span {
    /// Creates a span at the given position.
    #[must_use]
    pub fn new(line: usize, column: usize, raw: impl Into<String>) -> Self {
        Self {
            line,
            column,
            offset: 0,
            raw: raw.into(),
        }
    }

    /// Sets the byte offset.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// Node kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// An element with attributes and children.
    Element,
    /// Character data.
    Text,
    /// A comment.
    Comment,
    /// A document type declaration.
    Doctype,
}

/// One attribute occurrence on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeToken {
    /// Attribute name as written.
    pub name: String,
    /// Unquoted value (empty for bare attributes).
    #[serde(default)]
    pub value: String,
    /// Whole attribute source text.
    #[serde(default)]
    pub raw: String,
    /// The value is produced by a template expression and not known statically.
    #[serde(default)]
    pub is_dynamic_value: bool,
    /// Position of the attribute name.
    #[serde(default)]
    pub name_span: Span,
    /// Position of the value, if the attribute has one.
    #[serde(default)]
    pub value_span: Option<Span>,
}

impl AttributeToken {
    /// Creates a static `name="value"` token.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        Self {
            raw: format!("{name}=\"{value}\""),
            name_span: Span::new(0, 0, name.clone()),
            value_span: Some(Span::new(0, 0, value.clone())),
            name,
            value,
            is_dynamic_value: false,
        }
    }

    /// Marks the value as dynamic.
    #[must_use]
    pub fn dynamic(mut self) -> Self {
        self.is_dynamic_value = true;
        self
    }

    /// Places the token at `line:column`, assuming `name="value"` layout.
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.name_span.line = line;
        self.name_span.column = column;
        if let Some(value_span) = &mut self.value_span {
            value_span.line = line;
            value_span.column = column + self.name.chars().count() + 2;
        }
        self
    }

    /// Span covering the value, or the name if there is no value.
    #[must_use]
    pub fn value_or_name_span(&self) -> &Span {
        self.value_span.as_ref().unwrap_or(&self.name_span)
    }
}

/// Serialized node as produced by a markup parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSource {
    /// Node kind.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Tag name for elements.
    #[serde(default)]
    pub name: String,
    /// Character data for text and comments.
    #[serde(default)]
    pub value: String,
    /// Attributes in source order.
    #[serde(default)]
    pub attributes: Vec<AttributeToken>,
    /// Child nodes in source order.
    #[serde(default)]
    pub children: Vec<NodeSource>,
    /// Start tag (or text) position.
    #[serde(flatten)]
    pub span: Span,
}

impl NodeSource {
    fn new(kind: NodeKind, name: &str, value: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            value: value.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            span: Span::new(1, 1, ""),
        }
    }

    /// Creates an element.
    #[must_use]
    pub fn element(name: &str) -> Self {
        let mut node = Self::new(NodeKind::Element, name, "");
        node.span.raw = format!("<{name}>");
        node
    }

    /// Creates a text node.
    #[must_use]
    pub fn text(value: &str) -> Self {
        let mut node = Self::new(NodeKind::Text, "#text", value);
        node.span.raw = value.to_string();
        node
    }

    /// Creates a comment.
    #[must_use]
    pub fn comment(value: &str) -> Self {
        Self::new(NodeKind::Comment, "#comment", value)
    }

    /// Creates a doctype.
    #[must_use]
    pub fn doctype(value: &str) -> Self {
        Self::new(NodeKind::Doctype, "#doctype", value)
    }

    /// Adds a static attribute.
    #[must_use]
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.attr_token(AttributeToken::new(name, value))
    }

    /// Adds an attribute token.
    #[must_use]
    pub fn attr_token(mut self, token: AttributeToken) -> Self {
        self.attributes.push(token);
        self
    }

    /// Adds a child node.
    #[must_use]
    pub fn child(mut self, child: NodeSource) -> Self {
        self.children.push(child);
        self
    }

    /// Places the node at `line:column`.
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.span.line = line;
        self.span.column = column;
        self
    }
}

#[derive(Debug, Deserialize)]
struct DocumentSource {
    #[serde(default)]
    path: Option<PathBuf>,
    nodes: Vec<NodeSource>,
}

/// Index of a node in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    name: String,
    value: String,
    attributes: Vec<AttributeToken>,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed markup document.
#[derive(Debug, Default)]
pub struct Document {
    path: Option<PathBuf>,
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl Document {
    /// Builds a document from top-level nodes.
    #[must_use]
    pub fn new(nodes: Vec<NodeSource>) -> Self {
        let mut doc = Self::default();
        for source in nodes {
            let id = doc.insert(source, None);
            doc.roots.push(id);
        }
        doc
    }

    /// Parses a document from parser JSON: `{ "path"?: ..., "nodes": [...] }`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a node tree.
    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        let source: DocumentSource =
            serde_json::from_str(content).map_err(|e| DocumentError::Parse {
                message: e.to_string(),
            })?;
        let mut doc = Self::new(source.nodes);
        doc.path = source.path;
        Ok(doc)
    }

    /// Sets the source path used in diagnostics.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the source path, if known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the total number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the document has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the top-level nodes.
    pub fn roots(&self) -> impl Iterator<Item = Node<'_>> {
        self.roots.iter().map(move |&id| Node { doc: self, id })
    }

    /// Returns the node with the given id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { doc: self, id })
    }

    /// Iterates over nodes of `kind` in document order.
    #[must_use]
    pub fn walk(&self, kind: NodeKind) -> Walk<'_> {
        Walk {
            doc: self,
            kind,
            next: 0,
        }
    }

    /// Awaits `callback` once per node of `kind`, in document order.
    ///
    /// Each invocation completes before the next node is visited. Returning
    /// `Ok(())` early only ends that node's visit; an error stops the walk
    /// and is returned.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `callback`.
    pub async fn walk_on<'d, F, Fut>(
        &'d self,
        kind: NodeKind,
        mut callback: F,
    ) -> Result<(), RuleError>
    where
        F: FnMut(Node<'d>) -> Fut,
        Fut: Future<Output = Result<(), RuleError>>,
    {
        for node in self.walk(kind) {
            callback(node).await?;
        }
        Ok(())
    }

    fn insert(&mut self, source: NodeSource, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind: source.kind,
            name: source.name,
            value: source.value,
            attributes: source.attributes,
            span: source.span,
            parent,
            children: Vec::with_capacity(source.children.len()),
        });
        for child in source.children {
            let child_id = self.insert(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Lazy, single-pass iterator over nodes of one kind.
#[derive(Debug, Clone)]
pub struct Walk<'d> {
    doc: &'d Document,
    kind: NodeKind,
    next: usize,
}

impl<'d> Iterator for Walk<'d> {
    type Item = Node<'d>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.doc.nodes.len() {
            let id = NodeId(self.next);
            self.next += 1;
            if self.doc.data(id).kind == self.kind {
                return Some(Node { doc: self.doc, id });
            }
        }
        None
    }
}

/// Borrowed handle to a node.
#[derive(Debug, Clone, Copy)]
pub struct Node<'d> {
    doc: &'d Document,
    id: NodeId,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl<'d> Node<'d> {
    fn data(&self) -> &'d NodeData {
        self.doc.data(self.id)
    }

    /// Returns the node id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the owning document.
    #[must_use]
    pub fn document(&self) -> &'d Document {
        self.doc
    }

    /// Returns the node kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    /// Returns true if the node is of `kind`.
    #[must_use]
    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    /// Tag name for elements, `#text` etc. otherwise.
    #[must_use]
    pub fn node_name(&self) -> &'d str {
        &self.data().name
    }

    /// Character data for text, comment and doctype nodes.
    #[must_use]
    pub fn value(&self) -> &'d str {
        &self.data().value
    }

    /// Source position.
    #[must_use]
    pub fn span(&self) -> &'d Span {
        &self.data().span
    }

    /// Returns the parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Node<'d>> {
        let doc = self.doc;
        self.data().parent.map(|id| Node { doc, id })
    }

    /// Returns the child nodes in order.
    pub fn children(&self) -> impl Iterator<Item = Node<'d>> {
        let doc = self.doc;
        self.data().children.iter().map(move |&id| Node { doc, id })
    }

    /// Returns all attribute tokens in source order.
    #[must_use]
    pub fn attributes(&self) -> &'d [AttributeToken] {
        &self.data().attributes
    }

    /// Returns every token for `name` (case-insensitive).
    ///
    /// An attribute written more than once yields one token per occurrence.
    #[must_use]
    pub fn get_attribute_tokens(&self, name: &str) -> Vec<&'d AttributeToken> {
        self.attributes()
            .iter()
            .filter(|a| a.name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Returns the value of the first `name` attribute.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&'d str> {
        self.attributes()
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Returns true if the element carries `name`.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Returns true for text nodes containing only whitespace.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.is(NodeKind::Text) && self.value().chars().all(char::is_whitespace)
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self.kind() {
            NodeKind::Text => self.value().to_string(),
            NodeKind::Element => self.children().map(|c| c.text_content()).collect(),
            NodeKind::Comment | NodeKind::Doctype => String::new(),
        }
    }
}

/// Errors decoding a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The document JSON is malformed.
    #[error("Failed to parse document: {message}")]
    Parse {
        /// Decoder message.
        message: String,
    },
}
