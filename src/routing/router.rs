//! Route registration and lookup.
//!
//! # Responsibilities
//! - Keep one trie per HTTP method, created on first registration
//! - Turn trie conflicts into `RouteError`s carrying method and pattern
//! - Search the exact method first, then the reserved `ANY` trie
//!
//! # Design Decisions
//! - Build-then-serve: `register` takes `&mut self`, `search` takes `&self`,
//!   so a frozen router can be shared across threads without locks
//! - Method names are compared verbatim (no case folding)
//! - An exact-method trie that misses still falls back to `ANY`

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::routing::error::RouteError;
use crate::routing::node::{ConflictKind, Endpoint, Node};
use crate::routing::params::Params;
use crate::routing::pattern::parse_pattern;

/// Reserved pseudo-method consulted when the exact method has no match.
pub const ANY: &str = "ANY";

/// A successful resolution.
#[derive(Debug)]
pub struct Match<'a, H, T> {
    pub handler: &'a H,
    pub tag: Option<&'a T>,
    /// The pattern the route was registered with.
    pub pattern: &'a str,
    pub params: Params,
}

/// A registered route, for introspection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RouteInfo {
    pub method: String,
    pub pattern: String,
}

/// Per-method collection of routing tries.
pub struct Router<H, T = ()> {
    trees: HashMap<String, Node<H, T>>,
}

impl<H, T> Router<H, T> {
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
        }
    }

    /// Register `handler` for `method` and `pattern`.
    pub fn register(
        &mut self,
        method: &str,
        pattern: &str,
        handler: H,
        tag: Option<T>,
    ) -> Result<(), RouteError> {
        let segments = parse_pattern(pattern).map_err(|reason| RouteError::InvalidSyntax {
            pattern: pattern.to_string(),
            reason,
        })?;

        let endpoint = Endpoint {
            handler,
            tag,
            pattern: pattern.to_string(),
        };

        self.trees
            .entry(method.to_string())
            .or_insert_with(Node::new)
            .insert(&segments, endpoint)
            .map_err(|kind| match kind {
                ConflictKind::Syntax(reason) => RouteError::InvalidSyntax {
                    pattern: pattern.to_string(),
                    reason,
                },
                ConflictKind::Duplicate => RouteError::DuplicateRoute {
                    method: method.to_string(),
                    pattern: pattern.to_string(),
                },
            })?;

        tracing::debug!(method = %method, pattern = %pattern, "Route registered");
        Ok(())
    }

    /// Register a route whose handler is `H::default()`.
    pub fn register_noop(&mut self, method: &str, pattern: &str, tag: Option<T>) -> Result<(), RouteError>
    where
        H: Default,
    {
        self.register(method, pattern, H::default(), tag)
    }

    /// Resolve `path` for `method`, falling back to the `ANY` trie.
    pub fn search(&self, method: &str, path: &str) -> Option<Match<'_, H, T>> {
        let exact = self.trees.get(method).and_then(|tree| tree.resolve(path));

        let found = match exact {
            Some(found) => Some(found),
            None if method != ANY => self.trees.get(ANY).and_then(|tree| tree.resolve(path)),
            None => None,
        };

        found.map(|(endpoint, params)| Match {
            handler: &endpoint.handler,
            tag: endpoint.tag.as_ref(),
            pattern: &endpoint.pattern,
            params,
        })
    }

    /// Every registered route, sorted by method then pattern.
    pub fn routes(&self) -> Vec<RouteInfo> {
        let mut routes: Vec<RouteInfo> = self
            .trees
            .iter()
            .flat_map(|(method, tree)| {
                tree.endpoints().into_iter().map(move |endpoint| RouteInfo {
                    method: method.clone(),
                    pattern: endpoint.pattern.clone(),
                })
            })
            .collect();
        routes.sort();
        routes
    }

    /// Methods that own a trie, sorted.
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    pub fn len(&self) -> usize {
        self.trees.values().map(|tree| tree.endpoints().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H, T> Default for Router<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, T> fmt::Debug for Router<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes())
            .finish()
    }
}
