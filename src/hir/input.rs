//! Merge scopes for one generation run.

use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;

use super::symbols::SourcedTable;

/// Key of a merge scope: the target namespace and the layout it is emitted in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeKey<L> {
    pub namespace: Arc<str>,
    pub layout: L,
}

/// Every parsed command table, grouped by merge scope.
///
/// Built once per generation run and then only read. Scopes iterate in the
/// order they first appeared; tables within a scope keep insertion order,
/// which is the document order the merger relies on.
#[derive(Clone, Debug)]
pub struct NamespaceMap<L> {
    scopes: IndexMap<ScopeKey<L>, Vec<SourcedTable>>,
}

impl<L> Default for NamespaceMap<L> {
    fn default() -> Self {
        Self {
            scopes: IndexMap::new(),
        }
    }
}

impl<L> ScopeKey<L> {
    pub fn new(namespace: impl Into<Arc<str>>, layout: L) -> Self {
        Self {
            namespace: namespace.into(),
            layout,
        }
    }
}

impl<L: Clone + Eq + Hash> NamespaceMap<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the scope of `(namespace, layout)`.
    pub fn insert(&mut self, namespace: impl Into<Arc<str>>, layout: L, table: SourcedTable) {
        self.scopes
            .entry(ScopeKey::new(namespace, layout))
            .or_default()
            .push(table);
    }

    /// Tables of one scope, in insertion order.
    pub fn tables(&self, key: &ScopeKey<L>) -> &[SourcedTable] {
        self.scopes.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ScopeKey<L>, &[SourcedTable])> + '_ {
        self.scopes.iter().map(|(key, tables)| (key, tables.as_slice()))
    }

    /// Number of scopes.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl<L: Clone + Eq + Hash> FromIterator<(Arc<str>, L, SourcedTable)> for NamespaceMap<L> {
    fn from_iter<I: IntoIterator<Item = (Arc<str>, L, SourcedTable)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (namespace, layout, table) in iter {
            map.insert(namespace, layout, table);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::symbols::CommandTable;

    fn table(path: &str) -> SourcedTable {
        SourcedTable::new(path, CommandTable::new("T", vec![]))
    }

    #[test]
    fn test_groups_by_namespace_and_layout() {
        let mut map = NamespaceMap::new();
        map.insert("Foo", 0u8, table("a.vsct"));
        map.insert("Bar", 0u8, table("b.vsct"));
        map.insert("Foo", 0u8, table("c.vsct"));
        map.insert("Foo", 1u8, table("d.vsct"));

        assert_eq!(map.len(), 3);
        let paths: Vec<_> = map
            .tables(&ScopeKey::new("Foo", 0))
            .iter()
            .map(|t| &*t.path)
            .collect();
        assert_eq!(paths, ["a.vsct", "c.vsct"]);
        assert_eq!(map.tables(&ScopeKey::new("Foo", 1)).len(), 1);
        assert!(map.tables(&ScopeKey::new("Baz", 0)).is_empty());
        assert!(map.tables(&ScopeKey::new("Bar", 1)).is_empty());
    }

    #[test]
    fn test_scopes_in_first_appearance_order() {
        let map: NamespaceMap<u8> = [
            (Arc::from("Zeta"), 0, table("a.vsct")),
            (Arc::from("Alpha"), 0, table("b.vsct")),
            (Arc::from("Zeta"), 0, table("c.vsct")),
        ]
        .into_iter()
        .collect();

        let namespaces: Vec<_> = map.iter().map(|(key, _)| &*key.namespace).collect();
        assert_eq!(namespaces, ["Zeta", "Alpha"]);
    }
}
