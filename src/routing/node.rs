//! Routing trie.
//!
//! # Responsibilities
//! - Graft parsed patterns onto the trie, one node per segment
//! - Reject duplicate endpoints and ambiguous capture layouts
//! - Resolve a request path to an endpoint plus captured parameters
//!
//! # Design Decisions
//! - Literal children live in a map, captures in a single dedicated slot,
//!   so every `:name`/`*name` at one depth aliases to the same child
//! - Literal children win over the capture slot, and there is no
//!   backtracking once a literal child has been taken
//! - Nodes are never removed; a rebuilt trie replaces the old one whole

use std::collections::HashMap;

use crate::routing::error::SyntaxError;
use crate::routing::params::Params;
use crate::routing::pattern::{split_path, Segment};

/// Why an insertion was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConflictKind {
    Syntax(SyntaxError),
    Duplicate,
}

impl From<SyntaxError> for ConflictKind {
    fn from(err: SyntaxError) -> Self {
        ConflictKind::Syntax(err)
    }
}

/// What a pattern endpoint carries.
pub(crate) struct Endpoint<H, T> {
    pub handler: H,
    pub tag: Option<T>,
    pub pattern: String,
}

/// One segment position in a method's trie.
pub(crate) struct Node<H, T> {
    statics: HashMap<String, Node<H, T>>,
    capture: Option<Box<Node<H, T>>>,
    /// Parameter name, set only on capture nodes.
    param: Option<String>,
    wildcard: bool,
    endpoint: Option<Endpoint<H, T>>,
}

impl<H, T> Node<H, T> {
    pub(crate) fn new() -> Self {
        Self {
            statics: HashMap::new(),
            capture: None,
            param: None,
            wildcard: false,
            endpoint: None,
        }
    }

    fn capture(name: &str, wildcard: bool) -> Self {
        Self {
            param: Some(name.to_owned()),
            wildcard,
            ..Self::new()
        }
    }

    fn has_wildcard_child(&self) -> bool {
        self.capture.as_ref().is_some_and(|c| c.wildcard)
    }

    /// Descend into the capture slot, creating it if it is free.
    fn capture_child(&mut self, name: &str, wildcard: bool) -> Result<&mut Node<H, T>, ConflictKind> {
        let child = self
            .capture
            .get_or_insert_with(|| Box::new(Node::capture(name, wildcard)));

        if child.wildcard != wildcard {
            return Err(SyntaxError::WildcardConflict.into());
        }
        if child.param.as_deref() != Some(name) {
            return Err(SyntaxError::ParamNameConflict.into());
        }
        Ok(child.as_mut())
    }

    /// Graft a parsed pattern below this node.
    ///
    /// Conflicts can only be detected on nodes that already existed, and
    /// everything below a freshly created node is fresh too, so a failed
    /// insert never leaves new nodes behind.
    pub(crate) fn insert(
        &mut self,
        segments: &[Segment<'_>],
        endpoint: Endpoint<H, T>,
    ) -> Result<(), ConflictKind> {
        let mut current = self;
        let mut created = false;

        for segment in segments {
            current = match *segment {
                Segment::Literal(text) => {
                    if current.has_wildcard_child() {
                        return Err(SyntaxError::WildcardConflict.into());
                    }
                    created |= !current.statics.contains_key(text);
                    current
                        .statics
                        .entry(text.to_owned())
                        .or_insert_with(Node::new)
                }
                Segment::Param(name) => {
                    created |= current.capture.is_none();
                    current.capture_child(name, false)?
                }
                Segment::Wildcard(name) => {
                    // A wildcard also matches zero remaining segments, which
                    // would overlap with an endpoint or literal child here.
                    if current.endpoint.is_some() || !current.statics.is_empty() {
                        return Err(SyntaxError::WildcardConflict.into());
                    }
                    created |= current.capture.is_none();
                    current.capture_child(name, true)?
                }
            };
        }

        if current.endpoint.is_some() {
            return Err(ConflictKind::Duplicate);
        }
        if current.has_wildcard_child() {
            return Err(SyntaxError::WildcardConflict.into());
        }
        // Every segment landed on an existing node.
        if !created {
            return Err(ConflictKind::Duplicate);
        }

        current.endpoint = Some(endpoint);
        Ok(())
    }

    /// Resolve a request path below this node.
    pub(crate) fn resolve(&self, path: &str) -> Option<(&Endpoint<H, T>, Params)> {
        let segments = split_path(path);
        let mut params = Params::new();
        let mut current = self;

        for (depth, segment) in segments.iter().enumerate() {
            current = match current.statics.get(*segment) {
                Some(child) => child,
                None => current.capture.as_deref()?,
            };

            if let Some(name) = current.param.as_deref() {
                if current.wildcard {
                    params.insert(name, format!("/{}", segments[depth..].join("/")));
                    return current.endpoint.as_ref().map(|e| (e, params));
                }
                params.insert(name, *segment);
            }
        }

        if let Some(endpoint) = current.endpoint.as_ref() {
            return Some((endpoint, params));
        }

        // `/start/*action` invoked as `/start`.
        let wildcard = current.capture.as_deref().filter(|c| c.wildcard)?;
        params.insert(wildcard.param.as_deref()?, "/");
        wildcard.endpoint.as_ref().map(|e| (e, params))
    }

    /// Every endpoint in this subtree.
    pub(crate) fn endpoints(&self) -> Vec<&Endpoint<H, T>> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Endpoint<H, T>>) {
        if let Some(endpoint) = &self.endpoint {
            out.push(endpoint);
        }
        for child in self.statics.values() {
            child.collect(out);
        }
        if let Some(child) = &self.capture {
            child.collect(out);
        }
    }
}
