use std::fmt::{self, Display};

use indexmap::IndexMap;

use crate::network::node::NodeId;
use crate::params::{ExternalConnection, GroupParams};

/// Identifies a [`NodeGroup`] within its network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

impl GroupId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A demographic cohort: its statistics, its external contact targets and its nodes.
#[derive(Clone, Debug)]
pub struct NodeGroup {
    id: GroupId,
    pub(crate) params: GroupParams,
    pub(crate) active: bool,
    /// Contact statistics towards other groups, in insertion order.
    pub(crate) external: IndexMap<GroupId, ExternalConnection>,
    pub(crate) nodes: Vec<NodeId>,
    /// Next per-group suffix for node labels. Only ever grows.
    pub(crate) node_id_counter: usize,
}

impl NodeGroup {
    pub(crate) fn new(id: GroupId, params: GroupParams) -> Self {
        NodeGroup {
            id,
            params,
            active: true,
            external: IndexMap::new(),
            nodes: Vec::new(),
            node_id_counter: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.params.name
    }

    #[must_use]
    pub fn params(&self) -> &GroupParams {
        &self.params
    }

    /// Configured population size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.params.member_count
    }

    #[must_use]
    pub fn age(&self) -> u32 {
        self.params.age
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.params.color
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    #[must_use]
    pub fn external_connections(&self) -> &IndexMap<GroupId, ExternalConnection> {
        &self.external
    }

    #[must_use]
    pub fn external_connection(&self, target: GroupId) -> Option<ExternalConnection> {
        self.external.get(&target).copied()
    }

    pub(crate) fn next_counter(&mut self) -> usize {
        let counter = self.node_id_counter;
        self.node_id_counter += 1;
        counter
    }

    /// Whether a parameter change requires rebuilding this group's wiring.
    pub(crate) fn topology_differs(&self, other: &GroupParams) -> bool {
        self.params.member_count != other.member_count
            || self.params.avg_internal_connections != other.avg_internal_connections
            || self.params.delta_internal_connections != other.delta_internal_connections
    }
}
