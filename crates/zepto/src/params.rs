//! Parameters bound while resolving a parametric route.

use smallvec::SmallVec;

/// Number of parameters held inline before spilling to the heap.
pub const INLINE_PARAMS: usize = 4;

/// One bound parameter: the name from the pattern and the matched segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'a> {
    /// Parameter name, without the leading marker.
    pub name: &'a str,
    /// The concrete path segment bound to it.
    pub value: &'a str,
}

/// Ordered parameters of a resolution, in left-to-right path order.
///
/// Names borrow from the routing table and values from the request path, so
/// a lookup with up to [`INLINE_PARAMS`] parameters performs no allocation.
/// Longer routes spill to the heap instead of dropping parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a> {
    inner: SmallVec<[Param<'a>; INLINE_PARAMS]>,
}

impl<'a> Params<'a> {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binding; lookups push in path order.
    pub fn push(&mut self, name: &'a str, value: &'a str) {
        self.inner.push(Param { name, value });
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.inner
            .iter()
            .find(|param| param.name == name)
            .map(|param| param.value)
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if the parameters outgrew the inline buffer.
    #[must_use]
    pub fn spilled(&self) -> bool {
        self.inner.spilled()
    }

    /// Iterates parameters in path order.
    pub fn iter(&self) -> impl Iterator<Item = &Param<'a>> {
        self.inner.iter()
    }
}

impl<'p, 'a> IntoIterator for &'p Params<'a> {
    type Item = &'p Param<'a>;
    type IntoIter = std::slice::Iter<'p, Param<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
