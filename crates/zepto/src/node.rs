//! Trie vertex used by [`crate::trie::ParamTrie`].

/// A vertex of the parameter trie.
///
/// Literal children live in a compact array sorted by segment text and are
/// found by binary search. At most one parametric child exists per node; it
/// is tried only after the literal children. A node carries a handler only
/// if a registered route ends exactly here.
pub(crate) struct Node<H> {
    children: Vec<(Box<str>, Node<H>)>,
    param: Option<Box<ParamChild<H>>>,
    handler: Option<H>,
}

/// The single parametric child of a node together with its bound name.
pub(crate) struct ParamChild<H> {
    pub(crate) name: Box<str>,
    pub(crate) node: Node<H>,
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            param: None,
            handler: None,
        }
    }
}

impl<H> Node<H> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn search(&self, segment: &str) -> Result<usize, usize> {
        self.children
            .binary_search_by(|(label, _)| label.as_ref().cmp(segment))
    }

    /// Literal child labelled exactly `segment`.
    #[inline]
    pub(crate) fn child(&self, segment: &str) -> Option<&Self> {
        self.search(segment).ok().map(|idx| &self.children[idx].1)
    }

    /// Literal child labelled `segment`, created if missing.
    pub(crate) fn child_or_insert(&mut self, segment: &str) -> &mut Self {
        let idx = match self.search(segment) {
            Ok(idx) => idx,
            Err(idx) => {
                self.children.insert(idx, (segment.into(), Self::new()));
                idx
            }
        };
        &mut self.children[idx].1
    }

    #[inline]
    pub(crate) fn param(&self) -> Option<&ParamChild<H>> {
        self.param.as_deref()
    }

    /// Parametric child, created under `name` if missing.
    ///
    /// Callers check name conflicts beforehand; an existing child keeps its
    /// original name.
    pub(crate) fn param_or_insert(&mut self, name: &str) -> &mut Self {
        &mut self
            .param
            .get_or_insert_with(|| {
                Box::new(ParamChild {
                    name: name.into(),
                    node: Self::new(),
                })
            })
            .node
    }

    #[inline]
    pub(crate) fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    /// Attaches `handler`, returning the one it replaced.
    pub(crate) fn set_handler(&mut self, handler: H) -> Option<H> {
        self.handler.replace(handler)
    }

    pub(crate) fn children(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.children
            .iter()
            .map(|(label, node)| (label.as_ref(), node))
    }
}
