//! Byte trie backing the path interner.
//!
//! Nodes live in an arena indexed by `u32`. Each node records its parent and
//! the byte on the edge from it, so a handle reconstructs its string by
//! walking parent links from the terminal node and reversing.

use crate::interner::error::{InternError, InternResult};
use crate::types::PathId;

const ROOT: u32 = 0;

#[derive(Debug)]
struct Node {
    parent: u32,
    byte: u8,
    /// Indices of child nodes; each child's `byte` identifies its edge.
    children: Vec<u32>,
    /// Set when a previously interned string ends at this node.
    terminal: Option<PathId>,
}

impl Node {
    fn new(parent: u32, byte: u8) -> Self {
        Self {
            parent,
            byte,
            children: Vec::new(),
            terminal: None,
        }
    }
}

/// Prefix tree over path bytes.
///
/// Memory is proportional to the number of distinct prefixes across all
/// inserted strings, not the sum of their lengths. Terminal markers for a
/// string and its strict prefixes coexist on the shared node path.
#[derive(Debug)]
pub(crate) struct ByteTrie {
    nodes: Vec<Node>,
    /// Handle table: `PathId` value - 1 maps to the terminal node index.
    terminals: Vec<u32>,
}

impl ByteTrie {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::new(ROOT, 0)],
            terminals: Vec::new(),
        }
    }

    /// Find an already-interned string without mutating the trie.
    pub(crate) fn lookup(&self, path: &str) -> Option<PathId> {
        let mut current = ROOT;
        for &byte in path.as_bytes() {
            current = self.child(current, byte)?;
        }
        self.nodes[current as usize].terminal
    }

    /// Insert a string, creating nodes only for the suffix not already
    /// present. Idempotent: an already-interned string returns its
    /// original handle.
    pub(crate) fn insert(&mut self, path: &str) -> InternResult<PathId> {
        let mut current = ROOT;
        for &byte in path.as_bytes() {
            current = match self.child(current, byte) {
                Some(child) => child,
                None => self.add_child(current, byte)?,
            };
        }

        if let Some(id) = self.nodes[current as usize].terminal {
            return Ok(id);
        }

        let next = self.terminals.len() as u64 + 1;
        if next > u32::MAX as u64 {
            return Err(InternError::ResourceExhausted {
                interned: self.terminals.len(),
            });
        }
        let id = PathId::new(next as u32).ok_or(InternError::ResourceExhausted {
            interned: self.terminals.len(),
        })?;
        self.terminals.push(current);
        self.nodes[current as usize].terminal = Some(id);
        Ok(id)
    }

    /// Reconstruct the exact string a handle was issued for.
    pub(crate) fn resolve(&self, id: PathId) -> InternResult<String> {
        let index = (id.value() - 1) as usize;
        let mut current = *self
            .terminals
            .get(index)
            .ok_or(InternError::InvalidHandle { handle: id.value() })?;

        let mut bytes = Vec::new();
        while current != ROOT {
            let node = &self.nodes[current as usize];
            bytes.push(node.byte);
            current = node.parent;
        }
        bytes.reverse();

        // Bytes along a root-to-terminal path are exactly the UTF-8 of the
        // inserted string, so this cannot fail for handles we issued.
        String::from_utf8(bytes).map_err(|_| InternError::InvalidHandle { handle: id.value() })
    }

    /// Number of distinct interned strings.
    pub(crate) fn len(&self) -> usize {
        self.terminals.len()
    }

    fn child(&self, parent: u32, byte: u8) -> Option<u32> {
        // Fan-out under a path component is small; a linear scan wins over
        // a per-node map.
        self.nodes[parent as usize]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child as usize].byte == byte)
    }

    fn add_child(&mut self, parent: u32, byte: u8) -> InternResult<u32> {
        let index = u32::try_from(self.nodes.len()).map_err(|_| InternError::ResourceExhausted {
            interned: self.terminals.len(),
        })?;
        self.nodes.push(Node::new(parent, byte));
        self.nodes[parent as usize].children.push(index);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut trie = ByteTrie::new();

        let id = trie.insert("/project/out/classes").unwrap();
        assert_eq!(trie.resolve(id).unwrap(), "/project/out/classes");
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut trie = ByteTrie::new();

        let first = trie.insert("/out").unwrap();
        let second = trie.insert("/out").unwrap();

        assert_eq!(first, second);
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.resolve(first).unwrap(), "/out");
        assert_eq!(trie.resolve(second).unwrap(), "/out");
    }

    #[test]
    fn test_empty_string_round_trips() {
        let mut trie = ByteTrie::new();

        let id = trie.insert("").unwrap();
        assert_eq!(trie.resolve(id).unwrap(), "");

        // The root terminal must not disturb other entries.
        let other = trie.insert("a").unwrap();
        assert_eq!(trie.resolve(other).unwrap(), "a");
        assert_eq!(trie.resolve(id).unwrap(), "");
    }

    #[test]
    fn test_prefix_entries_coexist() {
        let mut trie = ByteTrie::new();

        let ab = trie.insert("a/b").unwrap();
        let abc = trie.insert("a/b/c").unwrap();
        let a = trie.insert("a").unwrap();

        assert_eq!(trie.resolve(ab).unwrap(), "a/b");
        assert_eq!(trie.resolve(abc).unwrap(), "a/b/c");
        assert_eq!(trie.resolve(a).unwrap(), "a");
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_shared_prefixes_share_nodes() {
        let mut trie = ByteTrie::new();

        trie.insert("/out/classes").unwrap();
        let nodes_after_first = trie.nodes.len();
        trie.insert("/out/generated").unwrap();

        // "/out/" is 5 shared nodes; only the distinct suffix was added.
        assert_eq!(
            trie.nodes.len(),
            nodes_after_first + "generated".len(),
            "second insert must only allocate nodes for its unshared suffix"
        );
    }

    #[test]
    fn test_resolve_unknown_handle_fails() {
        let mut trie = ByteTrie::new();
        trie.insert("/out").unwrap();

        let foreign = PathId::new(99).unwrap();
        assert!(matches!(
            trie.resolve(foreign),
            Err(InternError::InvalidHandle { handle: 99 })
        ));
    }

    #[test]
    fn test_non_ascii_paths() {
        let mut trie = ByteTrie::new();

        let id = trie.insert("/out/построение").unwrap();
        assert_eq!(trie.resolve(id).unwrap(), "/out/построение");
    }
}
