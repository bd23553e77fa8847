//! Node References
//!
//! Callers can point at a node either by name or by handle, and many graph
//! operations accept one reference or a whole list of them. [`NodeRef`] and
//! [`NodeRefs`] carry those arguments; the `From` impls let call sites pass
//! `"A"`, `id`, `["A", "B"]`, `vec![id1, id2]` or a mixed list of
//! `NodeRef`s directly.

use smallvec::SmallVec;

use super::node::NodeId;

/// A node named by string or by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef<'a> {
    /// Resolve through the graph's name index.
    Name(&'a str),
    /// Use the handle as-is.
    Id(NodeId),
}

impl<'a> From<&'a str> for NodeRef<'a> {
    fn from(name: &'a str) -> Self {
        NodeRef::Name(name)
    }
}

impl<'a> From<&'a String> for NodeRef<'a> {
    fn from(name: &'a String) -> Self {
        NodeRef::Name(name.as_str())
    }
}

impl From<NodeId> for NodeRef<'_> {
    fn from(id: NodeId) -> Self {
        NodeRef::Id(id)
    }
}

impl From<&NodeId> for NodeRef<'_> {
    fn from(id: &NodeId) -> Self {
        NodeRef::Id(*id)
    }
}

/// One or more node references, in caller order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRefs<'a>(SmallVec<[NodeRef<'a>; 4]>);

impl<'a> NodeRefs<'a> {
    /// Number of references.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether there are no references.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the references in order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'a>> + '_ {
        self.0.iter().copied()
    }
}

impl<'a> From<NodeRef<'a>> for NodeRefs<'a> {
    fn from(node: NodeRef<'a>) -> Self {
        Self(SmallVec::from_elem(node, 1))
    }
}

impl<'a> From<&'a str> for NodeRefs<'a> {
    fn from(name: &'a str) -> Self {
        NodeRef::from(name).into()
    }
}

impl<'a> From<&'a String> for NodeRefs<'a> {
    fn from(name: &'a String) -> Self {
        NodeRef::from(name).into()
    }
}

impl From<NodeId> for NodeRefs<'_> {
    fn from(id: NodeId) -> Self {
        NodeRef::from(id).into()
    }
}

impl<'a, T: Into<NodeRef<'a>>> From<Vec<T>> for NodeRefs<'a> {
    fn from(nodes: Vec<T>) -> Self {
        nodes.into_iter().collect()
    }
}

impl<'a, T: Into<NodeRef<'a>>, const N: usize> From<[T; N]> for NodeRefs<'a> {
    fn from(nodes: [T; N]) -> Self {
        nodes.into_iter().collect()
    }
}

impl<'a, T> From<&'a [T]> for NodeRefs<'a>
where
    &'a T: Into<NodeRef<'a>>,
{
    fn from(nodes: &'a [T]) -> Self {
        nodes.iter().collect()
    }
}

impl<'a, R: Into<NodeRef<'a>>> FromIterator<R> for NodeRefs<'a> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for NodeRefs<'a> {
    type Item = NodeRef<'a>;
    type IntoIter = smallvec::IntoIter<[NodeRef<'a>; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_references() {
        let id = NodeId::from_index(3);
        let owned = String::from("B");

        assert_eq!(NodeRefs::from("A").iter().collect::<Vec<_>>(), vec![NodeRef::Name("A")]);
        assert_eq!(NodeRefs::from(&owned).iter().collect::<Vec<_>>(), vec![NodeRef::Name("B")]);
        assert_eq!(NodeRefs::from(id).iter().collect::<Vec<_>>(), vec![NodeRef::Id(id)]);
    }

    #[test]
    fn sequences_keep_caller_order() {
        let id = NodeId::from_index(1);
        let refs = NodeRefs::from(vec![NodeRef::from("A"), NodeRef::from(id), "C".into()]);
        assert_eq!(refs.len(), 3);
        assert_eq!(
            refs.into_iter().collect::<Vec<_>>(),
            vec![NodeRef::Name("A"), NodeRef::Id(id), NodeRef::Name("C")]
        );
    }

    #[test]
    fn slices_and_arrays() {
        let names = vec![String::from("X"), String::from("Y")];
        let refs = NodeRefs::from(names.as_slice());
        assert_eq!(refs.iter().collect::<Vec<_>>(), vec![NodeRef::Name("X"), NodeRef::Name("Y")]);

        let ids = [NodeId::from_index(0), NodeId::from_index(1)];
        assert_eq!(NodeRefs::from(&ids[..]).len(), 2);
        assert_eq!(NodeRefs::from(ids).len(), 2);

        let empty: [&str; 0] = [];
        assert!(NodeRefs::from(empty).is_empty());
    }
}
