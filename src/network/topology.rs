/*!

Materializes group populations and wires them into a degree-budgeted random graph.

Wiring uses configuration-model stub matching: every node contributes one stub per unit of
budget (or quota, for external wiring), the stubs are shuffled and then greedily paired,
skipping pairs that would form a self-loop or a duplicate edge. A closing pass afterwards
connects any remaining pair that is still valid, so when wiring finishes there is no pair
of unconnected nodes that both have capacity left. Shortfall is accepted.

The builder holds no state of its own. It borrows the node arena and the network's random
streams for the duration of one operation.

*/

use std::iter::repeat_n;

use log::{debug, trace};

use crate::define_rng;
use crate::hashing::HashMap;
use crate::network::group::NodeGroup;
use crate::network::node::{Node, NodeId};
use crate::network::store::NodeStore;
use crate::params::ExternalConnection;
use crate::rand::Rng;
use crate::random::{RandomState, RngId};

define_rng!(InternalDegreeRng);
define_rng!(InternalWiringRng);
define_rng!(ExternalDegreeRng);
define_rng!(ExternalWiringRng);

/// Draws a degree uniformly from `[avg - delta, avg + delta]` and clamps it to `[0, cap]`.
fn draw_degree<R: RngId>(
    random: &RandomState,
    rng_id: R,
    spec: ExternalConnection,
    cap: usize,
) -> u32
where
    R::RngType: Rng,
{
    let low = spec.avg.saturating_sub(spec.delta);
    let high = spec.avg.saturating_add(spec.delta);
    let degree = random.sample_range(rng_id, low..=high);
    degree.min(u32::try_from(cap).unwrap_or(u32::MAX))
}

pub(crate) struct TopologyBuilder<'a> {
    store: &'a mut NodeStore,
    random: &'a RandomState,
}

impl<'a> TopologyBuilder<'a> {
    pub(crate) fn new(store: &'a mut NodeStore, random: &'a RandomState) -> Self {
        TopologyBuilder { store, random }
    }

    /// Brings the group's population to its configured size. New nodes get fresh labels and
    /// an unassigned budget; surplus nodes are removed from the end with all their edges.
    pub(crate) fn materialize_nodes(&mut self, group: &mut NodeGroup) {
        while group.nodes.len() > group.size() {
            if let Some(id) = group.nodes.pop() {
                self.store.remove(id);
            }
        }
        while group.nodes.len() < group.size() {
            let counter = group.next_counter();
            let id = self.store.insert(Node::new(group.id(), counter));
            group.nodes.push(id);
        }
        trace!("group {} has {} nodes", group.id(), group.nodes.len());
    }

    /// Removes every edge of every node in the group, internal and external.
    pub(crate) fn clear_group(&mut self, group: &NodeGroup) {
        for &id in &group.nodes {
            self.store.clear_connections(id);
        }
    }

    /// Assigns each node its internal degree target and returns the targets in node order.
    pub(crate) fn assign_internal_degree(&mut self, group: &NodeGroup) -> Vec<u32> {
        let spec = ExternalConnection {
            avg: group.params.avg_internal_connections,
            delta: group.params.delta_internal_connections,
        };
        let cap = group.nodes.len().saturating_sub(1);
        group
            .nodes
            .iter()
            .map(|&id| {
                let target = draw_degree(self.random, InternalDegreeRng, spec, cap);
                if let Some(node) = self.store.get_mut(id) {
                    node.available_internal_connections =
                        i32::try_from(target).unwrap_or(i32::MAX);
                }
                target
            })
            .collect()
    }

    fn has_budget(&self, id: NodeId) -> bool {
        self.store
            .get(id)
            .is_some_and(|node| node.available_internal_connections > 0)
    }

    /// Connects pairs of group members that both have budget left. Returns the number of
    /// edges added.
    pub(crate) fn wire_internal(&mut self, group: &NodeGroup) -> usize {
        let mut stubs: Vec<NodeId> = group
            .nodes
            .iter()
            .flat_map(|&id| {
                let budget = self
                    .store
                    .get(id)
                    .map_or(0, |node| node.available_internal_connections.max(0));
                repeat_n(id, usize::try_from(budget).unwrap_or(0))
            })
            .collect();
        let stub_count = stubs.len();
        self.random.shuffle(InternalWiringRng, &mut stubs);

        let mut added = 0;
        let mut pending: Vec<NodeId> = Vec::new();
        for stub in stubs {
            if !self.has_budget(stub) {
                continue;
            }
            let partner = pending.iter().position(|&other| {
                other != stub && self.has_budget(other) && !self.store.are_connected(stub, other)
            });
            match partner {
                Some(pos) => {
                    let other = pending.swap_remove(pos);
                    if self.store.add_connection(stub, other) {
                        added += 1;
                    }
                }
                None => pending.push(stub),
            }
        }

        let closing = self.close_internal(&group.nodes);
        debug!(
            "group {}: {} internal edges from {stub_count} stubs ({closing} in closing pass)",
            group.id(),
            added + closing
        );
        added + closing
    }

    fn close_internal(&mut self, members: &[NodeId]) -> usize {
        let open: Vec<NodeId> = members
            .iter()
            .copied()
            .filter(|&id| self.has_budget(id))
            .collect();
        let mut added = 0;
        for (i, &a) in open.iter().enumerate() {
            for &b in &open[i + 1..] {
                if !self.has_budget(a) {
                    break;
                }
                if self.has_budget(b) && self.store.add_connection(a, b) {
                    added += 1;
                }
            }
        }
        added
    }

    fn draw_quotas(
        &self,
        members: &[NodeId],
        spec: ExternalConnection,
        cap: usize,
    ) -> HashMap<NodeId, u32> {
        members
            .iter()
            .map(|&id| (id, draw_degree(self.random, ExternalDegreeRng, spec, cap)))
            .collect()
    }

    /// Connects nodes of `a` to nodes of `b`. `spec_a` drives the number of contacts each
    /// member of `a` gets into `b`, `spec_b` the reverse. Quotas only live for this pass.
    pub(crate) fn wire_external(
        &mut self,
        a: &NodeGroup,
        b: &NodeGroup,
        spec_a: ExternalConnection,
        spec_b: ExternalConnection,
    ) -> usize {
        let mut quota_a = self.draw_quotas(&a.nodes, spec_a, b.nodes.len());
        let mut quota_b = self.draw_quotas(&b.nodes, spec_b, a.nodes.len());

        let stubs = |members: &[NodeId], quota: &HashMap<NodeId, u32>| -> Vec<NodeId> {
            members
                .iter()
                .flat_map(|id| repeat_n(*id, quota.get(id).copied().unwrap_or(0) as usize))
                .collect()
        };
        let mut stubs_a = stubs(&a.nodes, &quota_a);
        let mut stubs_b = stubs(&b.nodes, &quota_b);
        self.random.shuffle(ExternalWiringRng, &mut stubs_a);
        self.random.shuffle(ExternalWiringRng, &mut stubs_b);

        let mut added = 0;
        for stub in stubs_a {
            let partner = stubs_b
                .iter()
                .position(|&other| !self.store.are_connected(stub, other));
            if let Some(pos) = partner {
                let other = stubs_b.swap_remove(pos);
                if self.store.add_connection(stub, other) {
                    decrement(&mut quota_a, stub);
                    decrement(&mut quota_b, other);
                    added += 1;
                }
            }
        }

        // closing pass over the nodes that still have quota
        let open = |members: &[NodeId], quota: &HashMap<NodeId, u32>| -> Vec<NodeId> {
            members
                .iter()
                .copied()
                .filter(|id| quota.get(id).copied().unwrap_or(0) > 0)
                .collect()
        };
        let open_a = open(&a.nodes, &quota_a);
        let open_b = open(&b.nodes, &quota_b);
        for &x in &open_a {
            for &y in &open_b {
                if quota_a.get(&x).copied().unwrap_or(0) == 0 {
                    break;
                }
                if quota_b.get(&y).copied().unwrap_or(0) > 0 && self.store.add_connection(x, y) {
                    decrement(&mut quota_a, x);
                    decrement(&mut quota_b, y);
                    added += 1;
                }
            }
        }

        debug!("groups {} and {}: {added} external edges", a.id(), b.id());
        added
    }

    /// Removes every edge between members of `a` and members of `b`.
    pub(crate) fn disconnect_groups(&mut self, a: &NodeGroup, b: &NodeGroup) -> usize {
        let target = b.id();
        a.nodes
            .iter()
            .map(|&id| self.store.remove_connections_where(id, |node| node.group() == target))
            .sum()
    }

    /// Removes every edge between members of `group` and nodes of any other group.
    pub(crate) fn disconnect_external(&mut self, group: &NodeGroup) -> usize {
        let own = group.id();
        group
            .nodes
            .iter()
            .map(|&id| self.store.remove_connections_where(id, |node| node.group() != own))
            .sum()
    }
}

fn decrement(quota: &mut HashMap<NodeId, u32>, id: NodeId) {
    if let Some(left) = quota.get_mut(&id) {
        *left = left.saturating_sub(1);
    }
}
