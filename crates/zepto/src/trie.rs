//! Segment trie for routes with parameter segments.

use crate::error::{Result, RouterError};
use crate::node::Node;
use crate::params::Params;
use crate::path::{parse_pattern, PatternSegment, Segments, PARAM_MARKER};

/// Per-method tree resolving parametric routes.
pub struct ParamTrie<H> {
    root: Node<H>,
    routes: usize,
}

impl<H> Default for ParamTrie<H> {
    fn default() -> Self {
        Self {
            root: Node::new(),
            routes: 0,
        }
    }
}

impl<H> ParamTrie<H> {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct patterns carrying a handler.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.routes
    }

    /// Returns true if no route has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// Inserts `pattern` and attaches `handler` to its last segment.
    ///
    /// Existing levels are reused. A parameter whose name differs from the
    /// one already bound at that depth is rejected before anything is
    /// created. Returns the handler previously attached to the same pattern.
    pub fn insert(&mut self, pattern: &str, handler: H) -> Result<Option<H>> {
        let segments = parse_pattern(pattern)?;
        self.check_conflicts(pattern, &segments)?;

        let mut node = &mut self.root;
        for segment in &segments {
            node = match *segment {
                PatternSegment::Literal(label) => node.child_or_insert(label),
                PatternSegment::Param(name) => node.param_or_insert(name),
            };
        }

        let previous = node.set_handler(handler);
        if previous.is_none() {
            self.routes += 1;
        }
        Ok(previous)
    }

    fn check_conflicts(&self, pattern: &str, segments: &[PatternSegment<'_>]) -> Result<()> {
        let mut node = &self.root;
        for segment in segments {
            let next = match *segment {
                PatternSegment::Literal(label) => node.child(label),
                PatternSegment::Param(name) => match node.param() {
                    Some(param) if param.name.as_ref() != name => {
                        return Err(RouterError::ParamConflict {
                            pattern: pattern.to_string(),
                            existing: param.name.to_string(),
                            conflicting: name.to_string(),
                        });
                    }
                    Some(param) => Some(&param.node),
                    None => None,
                },
            };
            match next {
                Some(next) => node = next,
                // Everything below is new, nothing left to clash with.
                None => return Ok(()),
            }
        }
        Ok(())
    }

    /// Walks `path` and returns the handler and bound parameters.
    ///
    /// At each depth an exact literal child wins over the parametric child.
    /// A dead end fails the lookup outright; there is no backtracking into
    /// the alternative branch. Paths without a leading slash and empty
    /// segments (`//`) never match.
    pub fn lookup<'a>(&'a self, path: &'a str) -> Option<(&'a H, Params<'a>)> {
        if !path.starts_with('/') {
            return None;
        }
        let mut params = Params::new();
        let mut node = &self.root;
        for segment in Segments::new(path) {
            if segment.is_empty() {
                return None;
            }
            if let Some(child) = node.child(segment) {
                node = child;
            } else if let Some(param) = node.param() {
                params.push(&param.name, segment);
                node = &param.node;
            } else {
                return None;
            }
        }
        node.handler().map(|handler| (handler, params))
    }

    /// Reconstructs every registered pattern, literal branches first.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.routes);
        collect(&self.root, &mut String::new(), &mut out);
        out
    }
}

fn collect<H>(node: &Node<H>, prefix: &mut String, out: &mut Vec<String>) {
    if node.handler().is_some() {
        out.push(if prefix.is_empty() {
            "/".to_string()
        } else {
            prefix.clone()
        });
    }
    let len = prefix.len();
    for (label, child) in node.children() {
        prefix.push('/');
        prefix.push_str(label);
        collect(child, prefix, out);
        prefix.truncate(len);
    }
    if let Some(param) = node.param() {
        prefix.push('/');
        prefix.push(PARAM_MARKER);
        prefix.push_str(&param.name);
        collect(&param.node, prefix, out);
        prefix.truncate(len);
    }
}
