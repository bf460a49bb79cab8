//! Loosely-typed response documents.
//!
//! Registrar responses are XML trees whose shape varies by command and is only partly
//! documented. [`Document`] keeps the parsed tree as plain nodes and answers lookups by
//! slash-separated path. A path that does not resolve is simply `None`; deciding whether
//! that is an error is left to the caller.
//!
//! Element names are matched ASCII case-insensitively.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use thiserror::Error;

/// Failure to turn a response body into a [`Document`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The body is not well-formed XML.
    #[error("malformed XML at byte {position}: {detail}")]
    Malformed {
        /// Byte offset reported by the reader.
        position: u64,
        /// Reader error message.
        detail: String,
    },

    /// The body contains no element at all.
    #[error("document has no root element")]
    Empty,

    /// The body ended before an element was closed.
    #[error("unclosed element <{0}>")]
    Unclosed(String),
}

/// A single element of a response document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Element name as it appeared in the document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content of the element, trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Every child element with the given name.
    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Node> + use<'a, 'n> {
        self.children
            .iter()
            .filter(move |c| c.name.eq_ignore_ascii_case(name))
    }

    /// Resolves a slash-separated path, taking the first match at each step.
    pub fn at(&self, path: &str) -> Option<&Node> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Every node matching a slash-separated path.
    ///
    /// Intermediate steps follow the first match; the final step collects every
    /// repeated element, e.g. `dns` in `GetDomainInfo/services/entry/configuration/dns`.
    pub fn all_at(&self, path: &str) -> Vec<&Node> {
        let (parent, last) = match path.rsplit_once('/') {
            Some((parent, last)) => (self.at(parent), last),
            None => (Some(self), path),
        };
        parent
            .map(|p| p.children_named(last).collect())
            .unwrap_or_default()
    }

    /// Trimmed text at a path. Present-but-empty elements yield `Some("")`.
    pub fn value(&self, path: &str) -> Option<&str> {
        self.at(path).map(Node::text)
    }

    /// Trimmed, non-empty texts of every node at a path.
    pub fn values(&self, path: &str) -> Vec<&str> {
        self.all_at(path)
            .into_iter()
            .map(Node::text)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Whether a path resolves to an element.
    pub fn has(&self, path: &str) -> bool {
        self.at(path).is_some()
    }
}

/// A parsed registrar response. Derefs to its root [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Parses a response body.
    pub fn parse(body: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(body);
        reader.config_mut().trim_text(true);

        // Bottom of the stack is a synthetic holder for top-level elements.
        let mut stack: Vec<Node> = vec![Node::new("")];

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    stack.push(Node::new(String::from_utf8_lossy(e.name().as_ref())));
                }
                Ok(Event::Empty(e)) => {
                    let node = Node::new(String::from_utf8_lossy(e.name().as_ref()));
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
                Ok(Event::Text(t)) => {
                    let text = t.unescape().map_err(|e| DocumentError::Malformed {
                        position: reader.buffer_position(),
                        detail: e.to_string(),
                    })?;
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&text);
                    }
                }
                Ok(Event::CData(c)) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Ok(Event::End(_)) => {
                    if stack.len() < 2 {
                        return Err(DocumentError::Malformed {
                            position: reader.buffer_position(),
                            detail: "unexpected closing tag".to_string(),
                        });
                    }
                    if let Some(node) = stack.pop()
                        && let Some(parent) = stack.last_mut()
                    {
                        parent.children.push(node);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(DocumentError::Malformed {
                        position: reader.buffer_position(),
                        detail: e.to_string(),
                    });
                }
            }
        }

        if stack.len() > 1 {
            let open = stack.pop().map(|n| n.name).unwrap_or_default();
            return Err(DocumentError::Unclosed(open));
        }

        let holder = stack.pop().ok_or(DocumentError::Empty)?;
        let root = holder
            .children
            .into_iter()
            .next()
            .ok_or(DocumentError::Empty)?;
        Ok(Self { root })
    }

    /// Root element.
    pub fn root(&self) -> &Node {
        &self.root
    }
}

impl std::ops::Deref for Document {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.root
    }
}
