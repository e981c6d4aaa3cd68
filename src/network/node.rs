//! A single individual of the contact network.
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::network::GroupId;

/// Budget value of a node whose internal degree has not been assigned yet. Such a node accepts
/// any number of internal edges.
pub const UNBOUNDED_BUDGET: i32 = -1;

/// Index of a node inside its network's node arena. Ids are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthState {
    #[default]
    Healthy,
    Infected,
    Cured,
    Vaccinated,
    Deceased,
}

impl HealthState {
    /// Whether a node in this state can catch the disease from an infected neighbor.
    #[must_use]
    pub fn is_susceptible(self) -> bool {
        matches!(
            self,
            HealthState::Healthy | HealthState::Cured | HealthState::Vaccinated
        )
    }
}

impl Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            HealthState::Healthy => "healthy",
            HealthState::Infected => "infected",
            HealthState::Cured => "cured",
            HealthState::Vaccinated => "vaccinated",
            HealthState::Deceased => "deceased",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    /// `<group id>-<per-group counter>`, unique within a network.
    label: String,
    group: GroupId,
    pub(crate) connections: Vec<NodeId>,
    health: HealthState,
    infection_count: u32,
    /// Remaining internal edges this node may take. See [`UNBOUNDED_BUDGET`].
    pub(crate) available_internal_connections: i32,
}

impl Node {
    pub(crate) fn new(group: GroupId, counter: usize) -> Self {
        Node {
            label: format!("{group}-{counter}"),
            group,
            connections: Vec::new(),
            health: HealthState::Healthy,
            infection_count: 0,
            available_internal_connections: UNBOUNDED_BUDGET,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn group(&self) -> GroupId {
        self.group
    }

    #[must_use]
    pub fn connections(&self) -> &[NodeId] {
        &self.connections
    }

    #[must_use]
    pub fn health(&self) -> HealthState {
        self.health
    }

    /// How many times this node has been infected.
    #[must_use]
    pub fn infection_count(&self) -> u32 {
        self.infection_count
    }

    #[must_use]
    pub fn available_internal_connections(&self) -> i32 {
        self.available_internal_connections
    }

    #[must_use]
    pub fn has_connection(&self, other: NodeId) -> bool {
        self.connections.contains(&other)
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.connections.len()
    }

    /// True once the internal budget has been assigned and fully spent.
    #[must_use]
    pub fn is_fully_internal_connected(&self) -> bool {
        self.available_internal_connections == 0
    }

    pub(crate) fn has_internal_capacity(&self) -> bool {
        self.available_internal_connections != 0
    }

    pub fn infect(&mut self) {
        self.health = HealthState::Infected;
        self.infection_count += 1;
    }

    pub fn cure(&mut self) {
        self.health = HealthState::Cured;
    }

    pub fn vaccinate(&mut self) {
        self.health = HealthState::Vaccinated;
    }

    pub fn decease(&mut self) {
        self.health = HealthState::Deceased;
    }

    /// Returns the node to the state it had when it was created, keeping its edges.
    pub fn reset(&mut self) {
        self.health = HealthState::Healthy;
        self.infection_count = 0;
    }

    pub(crate) fn spend_internal_budget(&mut self) {
        if self.available_internal_connections > 0 {
            self.available_internal_connections -= 1;
        }
    }

    pub(crate) fn refund_internal_budget(&mut self) {
        if self.available_internal_connections != UNBOUNDED_BUDGET {
            self.available_internal_connections += 1;
        }
    }
}
