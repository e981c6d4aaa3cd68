//! The contact network: groups of nodes, the registered diseases and the display palette.
//!
//! A [`Network`] owns every [`Node`] in an arena and hands out [`NodeId`]s. Groups keep the
//! ids of their members plus the statistics the topology is generated from. Every mutation
//! that changes those statistics validates its input first and only then regenerates the
//! affected part of the graph:
//!
//! - adding, duplicating, resizing or editing the size/degree parameters of a group rebuilds
//!   that group's internal edges and its external edges to every other active group;
//! - changing one external connection rewires only that pair of groups;
//! - toggling a group's `active` flag rewires only that group's external edges;
//! - [`Network::rebuild`] regenerates everything.
//!
//! Topology randomness comes from the network's own [`RandomState`], so two networks built
//! with the same seed and the same sequence of mutations are identical.
mod group;
mod node;
mod store;
mod topology;

pub use group::{GroupId, NodeGroup};
use indexmap::IndexMap;
use log::{debug, info};
pub use node::{HealthState, Node, NodeId, UNBOUNDED_BUDGET};
use serde::{Deserialize, Serialize};
use store::NodeStore;
use topology::TopologyBuilder;

use crate::disease::{Disease, DiseaseId};
use crate::error::EpiError;
use crate::params::{check_delta, DiseaseParams, ExternalConnection, GroupParams, ParamMap};
use crate::random::RandomState;

/// Colors used to render nodes by health state. Infected nodes use the disease's color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusColors {
    pub healthy: String,
    pub cured: String,
    pub vaccinated: String,
    pub deceased: String,
}

impl Default for StatusColors {
    fn default() -> Self {
        StatusColors {
            healthy: "rgb(0.043, 0.388, 0.082)".to_string(),
            cured: "rgb(0.192, 0.961, 0.573)".to_string(),
            vaccinated: "rgb(0.067, 0, 0.941)".to_string(),
            deceased: "rgb(0.012, 0.012, 0.012)".to_string(),
        }
    }
}

impl StatusColors {
    #[must_use]
    pub fn color_for<'a>(&'a self, state: HealthState, infected: &'a str) -> &'a str {
        match state {
            HealthState::Healthy => &self.healthy,
            HealthState::Infected => infected,
            HealthState::Cured => &self.cured,
            HealthState::Vaccinated => &self.vaccinated,
            HealthState::Deceased => &self.deceased,
        }
    }
}

/// The wiring of one group, with nodes identified by label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupTopology {
    pub group: usize,
    pub nodes: Vec<String>,
    pub internal_edges: Vec<(String, String)>,
    /// Edges to other groups. Each edge appears once, under the group with the smaller id.
    pub external_edges: Vec<(String, String)>,
}

/// How many contacts each side of a group pair should get, or `None` if neither group
/// targets the other. A side without its own setting mirrors the other side's.
fn external_specs(
    a: &NodeGroup,
    b: &NodeGroup,
) -> Option<(ExternalConnection, ExternalConnection)> {
    match (a.external_connection(b.id()), b.external_connection(a.id())) {
        (Some(x), Some(y)) => Some((x, y)),
        (Some(x), None) => Some((x, x)),
        (None, Some(y)) => Some((y, y)),
        (None, None) => None,
    }
}

pub struct Network {
    name: String,
    groups: IndexMap<GroupId, NodeGroup>,
    diseases: IndexMap<DiseaseId, Disease>,
    nodes: NodeStore,
    colors: StatusColors,
    random: RandomState,
    next_group_id: usize,
    next_disease_id: usize,
}

impl Network {
    #[must_use]
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Network {
            name: name.into(),
            groups: IndexMap::new(),
            diseases: IndexMap::new(),
            nodes: NodeStore::default(),
            colors: StatusColors::default(),
            random: RandomState::new(seed),
            next_group_id: 0,
            next_disease_id: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Restarts the topology random streams from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.random.init_random(seed);
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.random.base_seed()
    }

    #[must_use]
    pub fn colors(&self) -> &StatusColors {
        &self.colors
    }

    pub fn set_colors(&mut self, colors: StatusColors) {
        self.colors = colors;
    }

    // Groups

    /// Adds a group from a raw parameter map and builds its wiring.
    ///
    /// # Errors
    /// Returns [`EpiError`] if the map does not describe a valid group.
    pub fn add_group(&mut self, map: &ParamMap) -> Result<GroupId, EpiError> {
        self.add_group_params(GroupParams::try_from(map)?)
    }

    /// # Errors
    /// Returns [`EpiError`] if `params` fails validation.
    pub fn add_group_params(&mut self, params: GroupParams) -> Result<GroupId, EpiError> {
        params.validate()?;
        let id = self.allocate_group_id();
        info!(
            "adding group {id} {:?} with {} members",
            params.name, params.member_count
        );
        self.groups.insert(id, NodeGroup::new(id, params));
        self.build_group(id);
        Ok(id)
    }

    /// Replaces a group's parameters. Returns whether the topology was rebuilt, which happens
    /// only when the size or the internal degree statistics changed.
    ///
    /// # Errors
    /// Returns [`EpiError`] if the group does not exist or the map is invalid. Nothing is
    /// changed in that case.
    pub fn update_group(&mut self, id: GroupId, map: &ParamMap) -> Result<bool, EpiError> {
        let params = GroupParams::try_from(map)?;
        self.update_group_params(id, params)
    }

    /// # Errors
    /// Returns [`EpiError`] if the group does not exist or `params` fails validation.
    pub fn update_group_params(
        &mut self,
        id: GroupId,
        params: GroupParams,
    ) -> Result<bool, EpiError> {
        params.validate()?;
        let group = self.group_mut(id)?;
        let rebuild = group.topology_differs(&params);
        group.params = params;
        if rebuild {
            debug!("group {id} statistics changed, rebuilding");
            self.build_group(id);
        }
        Ok(rebuild)
    }

    /// Changes the number of members. Returns whether the topology was rebuilt.
    ///
    /// # Errors
    /// Returns [`EpiError::UnknownGroup`] if the group does not exist.
    pub fn resize_group(&mut self, id: GroupId, size: usize) -> Result<bool, EpiError> {
        let group = self.group_mut(id)?;
        if group.params.member_count == size {
            return Ok(false);
        }
        info!(
            "resizing group {id} from {} to {size}",
            group.params.member_count
        );
        group.params.member_count = size;
        self.build_group(id);
        Ok(true)
    }

    /// Activates or deactivates a group. Only that group's external edges are rewired.
    /// Returns whether anything changed.
    ///
    /// # Errors
    /// Returns [`EpiError::UnknownGroup`] if the group does not exist.
    pub fn set_group_active(&mut self, id: GroupId, active: bool) -> Result<bool, EpiError> {
        let group = self.group_mut(id)?;
        if group.active == active {
            return Ok(false);
        }
        group.active = active;
        debug!("group {id} active = {active}");
        self.rewire_external(id);
        Ok(true)
    }

    /// Creates a copy of a group with the same statistics and external targets but its own
    /// id and a freshly generated population.
    ///
    /// # Errors
    /// Returns [`EpiError::UnknownGroup`] if the group does not exist.
    pub fn duplicate_group(&mut self, id: GroupId) -> Result<GroupId, EpiError> {
        let source = self.group(id).ok_or(EpiError::UnknownGroup(id))?;
        let params = source.params.clone();
        let external = source.external.clone();
        let active = source.active;

        let copy_id = self.allocate_group_id();
        info!("duplicating group {id} as {copy_id}");
        let mut copy = NodeGroup::new(copy_id, params);
        copy.external = external;
        copy.active = active;
        self.groups.insert(copy_id, copy);
        self.build_group(copy_id);
        Ok(copy_id)
    }

    /// Deletes a group, all of its nodes and every edge touching them. Other groups' external
    /// settings that target it are dropped as well.
    ///
    /// # Errors
    /// Returns [`EpiError::UnknownGroup`] if the group does not exist.
    pub fn remove_group(&mut self, id: GroupId) -> Result<NodeGroup, EpiError> {
        let group = self
            .groups
            .shift_remove(&id)
            .ok_or(EpiError::UnknownGroup(id))?;
        for &node in &group.nodes {
            self.nodes.remove(node);
        }
        for other in self.groups.values_mut() {
            other.external.shift_remove(&id);
        }
        info!("removed group {id} and its {} nodes", group.nodes.len());
        Ok(group)
    }

    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&NodeGroup> {
        self.groups.get(&id)
    }

    fn group_mut(&mut self, id: GroupId) -> Result<&mut NodeGroup, EpiError> {
        self.groups.get_mut(&id).ok_or(EpiError::UnknownGroup(id))
    }

    /// The first group with the given name.
    #[must_use]
    pub fn group_by_name(&self, name: &str) -> Option<GroupId> {
        self.groups
            .values()
            .find(|group| group.name() == name)
            .map(NodeGroup::id)
    }

    /// All groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &NodeGroup> {
        self.groups.values()
    }

    fn allocate_group_id(&mut self) -> GroupId {
        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;
        id
    }

    // External connections

    /// Sets how many contacts each member of `from` has into `to` and rewires that pair.
    ///
    /// # Errors
    /// Returns [`EpiError`] if either group is unknown, `from == to`, or `delta > avg`.
    pub fn set_external_connection(
        &mut self,
        from: GroupId,
        to: GroupId,
        connection: ExternalConnection,
    ) -> Result<(), EpiError> {
        if from == to {
            return Err(EpiError::SelfConnection(from));
        }
        check_delta("external_connections", connection.avg, connection.delta)?;
        if !self.groups.contains_key(&to) {
            return Err(EpiError::UnknownGroup(to));
        }
        self.group_mut(from)?.external.insert(to, connection);
        debug!(
            "external connection {from} -> {to}: avg {}, delta {}",
            connection.avg, connection.delta
        );
        self.rewire_pair(from, to);
        Ok(())
    }

    /// Like [`Network::set_external_connection`] but reads `avg` and `delta` from a raw map.
    ///
    /// # Errors
    /// Returns [`EpiError`] if the map is invalid or the groups are.
    pub fn set_external_connection_map(
        &mut self,
        from: GroupId,
        to: GroupId,
        map: &ParamMap,
    ) -> Result<(), EpiError> {
        self.set_external_connection(from, to, ExternalConnection::try_from(map)?)
    }

    /// Drops `from`'s setting towards `to` and rewires that pair. Returns whether a setting
    /// existed.
    ///
    /// # Errors
    /// Returns [`EpiError::UnknownGroup`] if `from` does not exist.
    pub fn remove_external_connection(
        &mut self,
        from: GroupId,
        to: GroupId,
    ) -> Result<bool, EpiError> {
        let removed = self.group_mut(from)?.external.shift_remove(&to).is_some();
        if removed {
            self.rewire_pair(from, to);
        }
        Ok(removed)
    }

    // Diseases

    /// # Errors
    /// Returns [`EpiError`] if the map does not describe a valid disease. No id is consumed.
    pub fn add_disease(&mut self, map: &ParamMap) -> Result<DiseaseId, EpiError> {
        self.add_disease_params(DiseaseParams::try_from(map)?)
    }

    /// # Errors
    /// Returns [`EpiError`] if `params` fails validation.
    pub fn add_disease_params(&mut self, params: DiseaseParams) -> Result<DiseaseId, EpiError> {
        let id = DiseaseId(self.next_disease_id);
        let disease = Disease::from_params(id, params)?;
        self.next_disease_id += 1;
        info!("adding disease {id} {:?}", disease.name());
        self.diseases.insert(id, disease);
        Ok(id)
    }

    /// Replaces all parameters of a disease at once.
    ///
    /// # Errors
    /// Returns [`EpiError`] if the disease is unknown or the map is invalid.
    pub fn update_disease(&mut self, id: DiseaseId, map: &ParamMap) -> Result<(), EpiError> {
        self.diseases
            .get_mut(&id)
            .ok_or(EpiError::UnknownDisease(id))?
            .set_from_params(map)
    }

    /// # Errors
    /// Returns [`EpiError::UnknownDisease`] if the disease does not exist.
    pub fn duplicate_disease(&mut self, id: DiseaseId) -> Result<DiseaseId, EpiError> {
        let source = self.disease(id).ok_or(EpiError::UnknownDisease(id))?;
        let copy_id = DiseaseId(self.next_disease_id);
        let copy = source.duplicate(copy_id);
        self.next_disease_id += 1;
        self.diseases.insert(copy_id, copy);
        Ok(copy_id)
    }

    /// # Errors
    /// Returns [`EpiError::UnknownDisease`] if the disease does not exist.
    pub fn remove_disease(&mut self, id: DiseaseId) -> Result<Disease, EpiError> {
        self.diseases
            .shift_remove(&id)
            .ok_or(EpiError::UnknownDisease(id))
    }

    #[must_use]
    pub fn disease(&self, id: DiseaseId) -> Option<&Disease> {
        self.diseases.get(&id)
    }

    #[must_use]
    pub fn disease_by_name(&self, name: &str) -> Option<DiseaseId> {
        self.diseases
            .values()
            .find(|disease| disease.name() == name)
            .map(Disease::id)
    }

    pub fn diseases(&self) -> impl Iterator<Item = &Disease> {
        self.diseases.values()
    }

    // Nodes and edges

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    #[must_use]
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.nodes.id_by_label(label)
    }

    #[must_use]
    pub fn node_by_label(&self, label: &str) -> Option<&Node> {
        self.node_id(label).and_then(|id| self.nodes.get(id))
    }

    /// Every live node, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Total number of live nodes, active or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Upper bound on `NodeId::index()` of any live node.
    #[must_use]
    pub(crate) fn node_capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Ids of the members of every active group, in group order.
    #[must_use]
    pub fn active_nodes(&self) -> Vec<NodeId> {
        self.groups
            .values()
            .filter(|group| group.active)
            .flat_map(|group| group.nodes.iter().copied())
            .collect()
    }

    /// Number of nodes that take part in a simulation.
    #[must_use]
    pub fn population(&self) -> usize {
        self.groups
            .values()
            .filter(|group| group.active)
            .map(|group| group.nodes.len())
            .sum()
    }

    /// Adds an undirected edge. Returns `false` if either node is missing, `a == b`, the edge
    /// already exists, or it would overdraw an internal budget.
    pub fn add_connection(&mut self, a: NodeId, b: NodeId) -> bool {
        self.nodes.add_connection(a, b)
    }

    /// Returns `false` if the edge does not exist.
    pub fn remove_connection(&mut self, a: NodeId, b: NodeId) -> bool {
        self.nodes.remove_connection(a, b)
    }

    /// [`Network::add_connection`] addressed by node label.
    pub fn add_connection_by_label(&mut self, a: &str, b: &str) -> bool {
        match (self.node_id(a), self.node_id(b)) {
            (Some(a), Some(b)) => self.add_connection(a, b),
            _ => false,
        }
    }

    /// [`Network::remove_connection`] addressed by node label.
    pub fn remove_connection_by_label(&mut self, a: &str, b: &str) -> bool {
        match (self.node_id(a), self.node_id(b)) {
            (Some(a), Some(b)) => self.remove_connection(a, b),
            _ => false,
        }
    }

    /// Removes all edges of a node and resets its internal budget to unassigned.
    pub fn clear_connections(&mut self, id: NodeId) {
        self.nodes.clear_connections(id);
    }

    // Topology

    /// Regenerates the whole graph: internal wiring of every group, then external wiring of
    /// every pair of active groups.
    pub fn rebuild(&mut self) {
        let mut builder = TopologyBuilder::new(&mut self.nodes, &self.random);
        for group in self.groups.values_mut() {
            builder.clear_group(group);
            builder.materialize_nodes(group);
            builder.assign_internal_degree(group);
            builder.wire_internal(group);
        }
        let active: Vec<&NodeGroup> = self.groups.values().filter(|g| g.active).collect();
        for (i, a) in active.iter().enumerate() {
            for b in &active[i + 1..] {
                if let Some((spec_a, spec_b)) = external_specs(a, b) {
                    builder.wire_external(a, b, spec_a, spec_b);
                }
            }
        }
        info!(
            "rebuilt network {:?}: {} groups, {} nodes",
            self.name,
            self.groups.len(),
            self.nodes.len()
        );
    }

    /// Rebuilds one group's population and internal edges, then its external edges.
    fn build_group(&mut self, id: GroupId) {
        let Some(group) = self.groups.get_mut(&id) else {
            return;
        };
        let mut builder = TopologyBuilder::new(&mut self.nodes, &self.random);
        builder.clear_group(group);
        builder.materialize_nodes(group);
        builder.assign_internal_degree(group);
        builder.wire_internal(group);
        self.rewire_external(id);
    }

    fn rewire_external(&mut self, id: GroupId) {
        let Some(group) = self.groups.get(&id) else {
            return;
        };
        let mut builder = TopologyBuilder::new(&mut self.nodes, &self.random);
        builder.disconnect_external(group);
        if !group.active {
            return;
        }
        for other in self.groups.values() {
            if other.id() == id || !other.active {
                continue;
            }
            if let Some((spec_a, spec_b)) = external_specs(group, other) {
                builder.wire_external(group, other, spec_a, spec_b);
            }
        }
    }

    fn rewire_pair(&mut self, a: GroupId, b: GroupId) {
        let (Some(x), Some(y)) = (self.groups.get(&a), self.groups.get(&b)) else {
            return;
        };
        let mut builder = TopologyBuilder::new(&mut self.nodes, &self.random);
        builder.disconnect_groups(x, y);
        if x.active && y.active {
            if let Some((spec_a, spec_b)) = external_specs(x, y) {
                builder.wire_external(x, y, spec_a, spec_b);
            }
        }
    }

    /// The current wiring of every group, with nodes identified by label.
    #[must_use]
    pub fn topology(&self) -> Vec<GroupTopology> {
        let label = |id: NodeId| {
            self.nodes
                .get(id)
                .map(|node| node.label().to_string())
                .unwrap_or_default()
        };
        self.groups
            .values()
            .map(|group| {
                let mut export = GroupTopology {
                    group: group.id().index(),
                    nodes: group.nodes.iter().map(|&id| label(id)).collect(),
                    internal_edges: Vec::new(),
                    external_edges: Vec::new(),
                };
                for &id in &group.nodes {
                    let Some(node) = self.nodes.get(id) else {
                        continue;
                    };
                    for &neighbor in node.connections() {
                        let Some(other) = self.nodes.get(neighbor) else {
                            continue;
                        };
                        let pair = (node.label().to_string(), other.label().to_string());
                        if other.group() == group.id() {
                            if id < neighbor {
                                export.internal_edges.push(pair);
                            }
                        } else if group.id() < other.group() {
                            export.external_edges.push(pair);
                        }
                    }
                }
                export
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::param_map;

    fn params(name: &str, size: usize, avg: u32, delta: u32) -> GroupParams {
        GroupParams {
            name: name.to_string(),
            member_count: size,
            avg_internal_connections: avg,
            delta_internal_connections: delta,
            age: 30,
            vaccination_rate: 0.0,
            max_vaccination_rate: 0.0,
            color: "#123456".to_string(),
        }
    }

    #[test]
    fn add_group_from_map_builds_population() {
        let mut network = Network::new("test", 1);
        let id = network
            .add_group(&param_map([
                ("name", "Kids"),
                ("member count", "12"),
                ("avg internal connections", "3"),
                ("delta internal connections", "1"),
                ("age", "8"),
                ("vaccination rate", "0.2"),
                ("max vaccination rate", "0.5"),
                ("color", "#ffffff"),
            ]))
            .unwrap();
        let group = network.group(id).unwrap();
        assert_eq!(group.nodes().len(), 12);
        assert_eq!(network.node_count(), 12);
        assert_eq!(network.node_by_label("0-11").unwrap().group(), id);
    }

    #[test]
    fn invalid_group_creates_nothing() {
        let mut network = Network::new("test", 1);
        let result = network.add_group_params(params("bad", 10, 1, 2));
        assert!(matches!(result, Err(EpiError::DeltaExceedsAverage { .. })));
        assert_eq!(network.groups().count(), 0);
        assert_eq!(network.node_count(), 0);
        // the failed attempt must not burn an id
        let id = network.add_group_params(params("ok", 1, 0, 0)).unwrap();
        assert_eq!(id, GroupId(0));
    }

    #[test]
    fn update_group_only_rebuilds_on_topology_change() {
        let mut network = Network::new("test", 1);
        let id = network.add_group_params(params("a", 10, 2, 0)).unwrap();
        let before: Vec<NodeId> = network.group(id).unwrap().nodes().to_vec();

        let mut renamed = params("renamed", 10, 2, 0);
        renamed.age = 70;
        assert!(!network.update_group_params(id, renamed).unwrap());
        assert_eq!(network.group(id).unwrap().name(), "renamed");
        assert_eq!(network.group(id).unwrap().nodes(), before.as_slice());

        assert!(network.update_group_params(id, params("renamed", 10, 4, 1)).unwrap());
        assert!(network.resize_group(id, 15).unwrap());
        assert!(!network.resize_group(id, 15).unwrap());
        assert_eq!(network.group(id).unwrap().nodes().len(), 15);
    }

    #[test]
    fn external_connection_validation() {
        let mut network = Network::new("test", 1);
        let a = network.add_group_params(params("a", 5, 0, 0)).unwrap();
        let b = network.add_group_params(params("b", 5, 0, 0)).unwrap();
        assert!(matches!(
            network.set_external_connection(a, a, ExternalConnection { avg: 1, delta: 0 }),
            Err(EpiError::SelfConnection(_))
        ));
        assert!(matches!(
            network.set_external_connection(a, b, ExternalConnection { avg: 1, delta: 2 }),
            Err(EpiError::DeltaExceedsAverage { .. })
        ));
        let one = ExternalConnection { avg: 1, delta: 0 };
        assert!(matches!(
            network.set_external_connection(a, GroupId(9), one),
            Err(EpiError::UnknownGroup(GroupId(9)))
        ));
        assert!(network.group(a).unwrap().external_connections().is_empty());
    }

    #[test]
    fn deactivating_a_group_drops_only_its_external_edges() {
        let mut network = Network::new("test", 4);
        let a = network.add_group_params(params("a", 10, 2, 0)).unwrap();
        let b = network.add_group_params(params("b", 10, 2, 0)).unwrap();
        network
            .set_external_connection(a, b, ExternalConnection { avg: 1, delta: 0 })
            .unwrap();
        let internal_edges = |network: &Network| -> usize {
            network
                .topology()
                .iter()
                .map(|g| g.internal_edges.len())
                .sum()
        };
        let internal_before = internal_edges(&network);
        assert_eq!(network.topology()[0].external_edges.len(), 10);

        assert!(network.set_group_active(b, false).unwrap());
        let topology = network.topology();
        assert!(topology.iter().all(|g| g.external_edges.is_empty()));
        assert_eq!(internal_before, internal_edges(&network));
        assert_eq!(network.population(), 10);

        assert!(network.set_group_active(b, true).unwrap());
        assert!(!network.topology()[0].external_edges.is_empty());
    }

    #[test]
    fn diseases_register_and_duplicate() {
        let mut network = Network::new("test", 1);
        let flu = network
            .add_disease_params(DiseaseParams {
                name: "Flu".to_string(),
                color: "#ff00ff".to_string(),
                fatality_rate: 0.1,
                vaccinated_fatality_rate: 0.0,
                infection_rate: 0.5,
                reinfection_rate: 0.1,
                vaccinated_infection_rate: 0.05,
                duration: 5,
                initial_infection_count: 2,
            })
            .unwrap();
        let copy = network.duplicate_disease(flu).unwrap();
        assert_ne!(flu, copy);
        assert_eq!(network.disease_by_name("Flu"), Some(flu));
        assert_eq!(network.diseases().count(), 2);
        network.remove_disease(flu).unwrap();
        assert!(network.disease(flu).is_none());
        assert!(matches!(
            network.remove_disease(flu),
            Err(EpiError::UnknownDisease(_))
        ));
    }

    #[test]
    fn status_colors_pick_disease_color_for_infected() {
        let colors = StatusColors::default();
        assert_eq!(colors.color_for(HealthState::Infected, "red"), "red");
        assert_eq!(
            colors.color_for(HealthState::Healthy, "red"),
            "rgb(0.043, 0.388, 0.082)"
        );
    }
}
