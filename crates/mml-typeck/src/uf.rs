//! Path-compressed union-find over variable names.
//!
//! Grounded on `original_source/unification/util.py`'s `UnionFind`: `find`
//! path-compresses recursively, `union` reparents the second root under the
//! first ("child-of-root"), `union_all` unions every element against the
//! first one in iteration order, and `get_sets` groups the remaining names
//! by their root.

use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct UnionFind {
    parent: FxHashMap<String, String>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure(&mut self, name: &str) {
        self.parent
            .entry(name.to_string())
            .or_insert_with(|| name.to_string());
    }

    /// Finds the root of `name`'s set, path-compressing along the way.
    /// Names never seen before are their own root.
    pub fn find(&mut self, name: &str) -> String {
        self.ensure(name);
        let parent = self.parent.get(name).unwrap().clone();
        if parent == name {
            return parent;
        }
        let root = self.find(&parent);
        self.parent.insert(name.to_string(), root.clone());
        root
    }

    /// Unions the sets containing `a` and `b`; `b`'s root becomes a child
    /// of `a`'s root.
    pub fn union(&mut self, a: &str, b: &str) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent.insert(root_b, root_a);
        }
    }

    /// Unions every name in `names` against the first one (pivot). Unioning
    /// the pivot against itself is harmless.
    pub fn union_all<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let mut iter = names.into_iter();
        let Some(pivot) = iter.next() else {
            return;
        };
        self.ensure(pivot);
        for name in iter {
            self.union(pivot, name);
        }
    }

    /// Partitions every name seen so far into equivalence classes, grouped
    /// by root.
    pub fn get_sets(&mut self) -> Vec<Vec<String>> {
        let names: Vec<String> = self.parent.keys().cloned().collect();
        let mut groups: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for name in names {
            let root = self.find(&name);
            groups.entry(root).or_default().push(name);
        }
        groups.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_name_is_its_own_root() {
        let mut uf = UnionFind::new();
        assert_eq!(uf.find("x"), "x");
    }

    #[test]
    fn union_joins_two_names() {
        let mut uf = UnionFind::new();
        uf.union("x", "y");
        assert_eq!(uf.find("x"), uf.find("y"));
    }

    #[test]
    fn union_is_child_of_root() {
        let mut uf = UnionFind::new();
        uf.union("x", "y");
        // x's root absorbs y, so find(y) == find(x) == "x"
        assert_eq!(uf.find("x"), "x");
        assert_eq!(uf.find("y"), "x");
    }

    #[test]
    fn union_all_merges_everything_against_pivot() {
        let mut uf = UnionFind::new();
        uf.union_all(["a", "b", "c"]);
        let root = uf.find("a");
        assert_eq!(uf.find("b"), root);
        assert_eq!(uf.find("c"), root);
    }

    #[test]
    fn get_sets_groups_by_root() {
        let mut uf = UnionFind::new();
        uf.union("x", "y");
        uf.union("y", "z");
        uf.find("w");
        let mut sets = uf.get_sets();
        for set in sets.iter_mut() {
            set.sort();
        }
        sets.sort();
        assert_eq!(sets, vec![vec!["w".to_string()], vec!["x".to_string(), "y".to_string(), "z".to_string()]]);
    }

    #[test]
    fn path_compression_does_not_change_semantics() {
        let mut uf = UnionFind::new();
        uf.union("a", "b");
        uf.union("b", "c");
        uf.union("c", "d");
        let root = uf.find("d");
        assert_eq!(uf.find("a"), root);
    }
}
