use serde::Serialize;

use crate::network::{GroupId, HealthState};

/// The state of one node at a tick boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub node: String,
    pub group: usize,
    pub state: HealthState,
    pub color: String,
}

/// Read-only export of every participating node's state after a tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub nodes: Vec<NodeSnapshot>,
}

impl Snapshot {
    /// Number of nodes currently in `state`.
    #[must_use]
    pub fn count(&self, state: HealthState) -> usize {
        self.nodes.iter().filter(|node| node.state == state).count()
    }

    #[must_use]
    pub fn state_of(&self, label: &str) -> Option<HealthState> {
        self.nodes
            .iter()
            .find(|node| node.node == label)
            .map(|node| node.state)
    }
}

/// Per-state head counts of one group.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub healthy: usize,
    pub infected: usize,
    pub cured: usize,
    pub vaccinated: usize,
    pub deceased: usize,
}

impl StateCounts {
    pub fn record(&mut self, state: HealthState) {
        match state {
            HealthState::Healthy => self.healthy += 1,
            HealthState::Infected => self.infected += 1,
            HealthState::Cured => self.cured += 1,
            HealthState::Vaccinated => self.vaccinated += 1,
            HealthState::Deceased => self.deceased += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.healthy + self.infected + self.cured + self.vaccinated + self.deceased
    }
}

/// What happened during one call to `Simulation::step`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepSummary {
    pub tick: u64,
    pub new_infections: usize,
    pub recoveries: usize,
    pub deaths: usize,
}

/// Group counts keyed by group, in group order.
pub type GroupCounts = indexmap::IndexMap<GroupId, StateCounts>;
