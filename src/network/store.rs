/*!

`NodeStore` is the arena that owns every node of a network together with the label registry.

Edges are stored symmetrically in both endpoints' adjacency lists. All edge mutation goes
through this type so the symmetry and internal-budget invariants are maintained in one
place: adding an edge between two nodes of the same group spends one unit of each tracked
budget, removing it refunds them. External edges never touch budgets.

Slots are never reused; a removed node leaves a `None` behind so that outstanding `NodeId`s
cannot alias a newer node.

*/

use log::trace;

use crate::hashing::HashMap;
use crate::network::node::{Node, NodeId, UNBOUNDED_BUDGET};

#[derive(Default)]
pub(crate) struct NodeStore {
    slots: Vec<Option<Node>>,
    by_label: HashMap<String, NodeId>,
}

impl NodeStore {
    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.slots.len());
        self.by_label.insert(node.label().to_string(), id);
        self.slots.push(Some(node));
        id
    }

    /// Removes the node and every edge incident to it.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.clear_connections(id);
        let node = self.slots.get_mut(id.0)?.take()?;
        self.by_label.remove(node.label());
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub(crate) fn id_by_label(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|node| (NodeId(index), node)))
    }

    pub(crate) fn len(&self) -> usize {
        self.by_label.len()
    }

    /// Number of slots ever allocated, live or not. Suitable for sizing per-node side tables.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.get(a).is_some_and(|node| node.has_connection(b))
    }

    fn is_internal(&self, a: NodeId, b: NodeId) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(x), Some(y)) => x.group() == y.group(),
            _ => false,
        }
    }

    /// Adds the undirected edge `a`-`b`. Returns `false` and changes nothing if either node is
    /// missing, `a == b`, the edge already exists, or the edge is internal and either endpoint
    /// has no internal budget left.
    pub(crate) fn add_connection(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return false;
        }
        let (Some(x), Some(y)) = (self.get(a), self.get(b)) else {
            return false;
        };
        if x.has_connection(b) {
            return false;
        }
        let internal = x.group() == y.group();
        if internal && !(x.has_internal_capacity() && y.has_internal_capacity()) {
            trace!(
                "refusing internal edge {}-{}: budget exhausted",
                x.label(),
                y.label()
            );
            return false;
        }

        for (this, other) in [(a, b), (b, a)] {
            if let Some(node) = self.get_mut(this) {
                node.connections.push(other);
                if internal {
                    node.spend_internal_budget();
                }
            }
        }
        true
    }

    /// Removes the undirected edge `a`-`b`. Returns `false` if it does not exist.
    pub(crate) fn remove_connection(&mut self, a: NodeId, b: NodeId) -> bool {
        if !self.are_connected(a, b) {
            return false;
        }
        let internal = self.is_internal(a, b);
        for (this, other) in [(a, b), (b, a)] {
            if let Some(node) = self.get_mut(this) {
                if let Some(pos) = node.connections.iter().position(|&n| n == other) {
                    node.connections.swap_remove(pos);
                }
                if internal {
                    node.refund_internal_budget();
                }
            }
        }
        true
    }

    /// Removes every edge of `id` and marks its budget as unassigned.
    pub(crate) fn clear_connections(&mut self, id: NodeId) {
        let neighbors = match self.get(id) {
            Some(node) => node.connections.clone(),
            None => return,
        };
        for neighbor in neighbors {
            self.remove_connection(id, neighbor);
        }
        if let Some(node) = self.get_mut(id) {
            node.available_internal_connections = UNBOUNDED_BUDGET;
        }
    }

    /// Removes every edge of `id` whose other endpoint satisfies `predicate`.
    pub(crate) fn remove_connections_where(
        &mut self,
        id: NodeId,
        predicate: impl Fn(&Node) -> bool,
    ) -> usize {
        let Some(node) = self.get(id) else {
            return 0;
        };
        let doomed: Vec<NodeId> = node
            .connections
            .iter()
            .copied()
            .filter(|&neighbor| self.get(neighbor).is_some_and(&predicate))
            .collect();
        doomed
            .into_iter()
            .filter(|&neighbor| self.remove_connection(id, neighbor))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::GroupId;

    fn store_with(groups: &[usize]) -> (NodeStore, Vec<NodeId>) {
        let mut store = NodeStore::default();
        let ids = groups
            .iter()
            .enumerate()
            .map(|(counter, &group)| store.insert(Node::new(GroupId(group), counter)))
            .collect();
        (store, ids)
    }

    fn budget(store: &NodeStore, id: NodeId) -> i32 {
        store.get(id).unwrap().available_internal_connections()
    }

    #[test]
    fn add_is_symmetric_and_unique() {
        let (mut store, ids) = store_with(&[0, 0]);
        assert!(store.add_connection(ids[0], ids[1]));
        assert!(store.are_connected(ids[0], ids[1]));
        assert!(store.are_connected(ids[1], ids[0]));
        assert!(!store.add_connection(ids[1], ids[0]));
        assert!(!store.add_connection(ids[0], ids[0]));
        assert!(!store.add_connection(ids[0], NodeId(99)));
        assert_eq!(store.get(ids[0]).unwrap().degree(), 1);
    }

    #[test]
    fn internal_edges_spend_budget() {
        let (mut store, ids) = store_with(&[0, 0, 0, 1]);
        store.get_mut(ids[0]).unwrap().available_internal_connections = 1;
        store.get_mut(ids[1]).unwrap().available_internal_connections = 2;
        store.get_mut(ids[2]).unwrap().available_internal_connections = 2;

        assert!(store.add_connection(ids[0], ids[1]));
        assert_eq!(budget(&store, ids[0]), 0);
        assert_eq!(budget(&store, ids[1]), 1);
        // exhausted endpoint
        assert!(!store.add_connection(ids[0], ids[2]));
        assert_eq!(budget(&store, ids[2]), 2);
        // external edges ignore budgets
        assert!(store.add_connection(ids[0], ids[3]));
        assert_eq!(budget(&store, ids[0]), 0);

        assert!(store.remove_connection(ids[1], ids[0]));
        assert_eq!(budget(&store, ids[0]), 1);
        assert_eq!(budget(&store, ids[1]), 2);
        assert!(!store.remove_connection(ids[1], ids[0]));
    }

    #[test]
    fn clear_resets_budget_and_refunds_neighbors() {
        let (mut store, ids) = store_with(&[0, 0, 0]);
        for &id in &ids {
            store.get_mut(id).unwrap().available_internal_connections = 2;
        }
        store.add_connection(ids[0], ids[1]);
        store.add_connection(ids[0], ids[2]);
        store.clear_connections(ids[0]);

        assert_eq!(store.get(ids[0]).unwrap().degree(), 0);
        assert_eq!(budget(&store, ids[0]), UNBOUNDED_BUDGET);
        assert_eq!(budget(&store, ids[1]), 2);
        assert!(!store.are_connected(ids[1], ids[0]));
    }

    #[test]
    fn remove_leaves_no_dangling_edges() {
        let (mut store, ids) = store_with(&[0, 1, 1]);
        store.add_connection(ids[0], ids[1]);
        store.add_connection(ids[0], ids[2]);
        let removed = store.remove(ids[0]).unwrap();
        assert_eq!(removed.label(), "0-0");
        assert!(store.get(ids[0]).is_none());
        assert!(store.id_by_label("0-0").is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.capacity(), 3);
        assert!(store.iter().all(|(_, node)| node.degree() == 0));
    }

    #[test]
    fn remove_connections_to_one_group() {
        let (mut store, ids) = store_with(&[0, 1, 2, 0]);
        for &other in &ids[1..] {
            store.add_connection(ids[0], other);
        }
        let removed = store.remove_connections_where(ids[0], |n| n.group() == GroupId(1));
        assert_eq!(removed, 1);
        assert_eq!(store.get(ids[0]).unwrap().degree(), 2);
        assert!(!store.are_connected(ids[0], ids[1]));
    }
}
