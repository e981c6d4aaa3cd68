//! The tick-based epidemic engine.
//!
//! A [`Simulation`] binds one disease to a network, which it borrows exclusively for the
//! whole run. Only members of active groups take part.
//!
//! `init` resets every participant to healthy, samples vaccination per group and then seeds
//! the initial infections among unvaccinated participants. Each `step` then
//!
//! 1. counts down every infection and resolves the finished ones to deceased (with the
//!    fatality rate matching the node's vaccination status) or cured;
//! 2. exposes every healthy, cured or vaccinated node with `k` infected neighbors, infecting
//!    it with probability `1 - (1 - rate)^k` where `rate` depends on its state.
//!
//! All decisions of a tick read the states as they were at the end of the previous tick;
//! the resulting transitions are applied together afterwards. Deceased nodes never change
//! state again and never expose anyone.
mod snapshot;

use log::{debug, info, trace};
pub use snapshot::{GroupCounts, NodeSnapshot, Snapshot, StateCounts, StepSummary};

use crate::define_rng;
use crate::disease::{Disease, DiseaseId};
use crate::error::EpiError;
use crate::network::{GroupId, HealthState, Network, NodeId};
use crate::random::RandomState;

define_rng!(VaccinationRng);
define_rng!(SeedingRng);
define_rng!(TransmissionRng);
define_rng!(OutcomeRng);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Transition {
    Infect,
    Cure,
    Decease,
}

/// Probability of at least one successful transmission out of `k` independent exposures.
#[must_use]
pub fn exposure_probability(rate: f64, k: usize) -> f64 {
    let k = i32::try_from(k).unwrap_or(i32::MAX);
    1.0 - (1.0 - rate).powi(k)
}

pub struct Simulation<'a> {
    network: &'a mut Network,
    disease: Disease,
    random: RandomState,
    tick: u64,
    participants: Vec<NodeId>,
    /// The following are indexed by `NodeId::index()`.
    participating: Vec<bool>,
    vaccinated: Vec<bool>,
    countdown: Vec<u32>,
}

impl<'a> Simulation<'a> {
    /// Binds `disease` to `network` and runs `init`.
    ///
    /// # Errors
    /// - [`EpiError::UnknownDisease`] if the disease is not registered with the network
    /// - [`EpiError::EmptyPopulation`] if no active group has members
    pub fn new(
        network: &'a mut Network,
        disease: DiseaseId,
        seed: u64,
    ) -> Result<Self, EpiError> {
        let disease = network
            .disease(disease)
            .cloned()
            .ok_or(EpiError::UnknownDisease(disease))?;
        let mut simulation = Simulation {
            network,
            disease,
            random: RandomState::new(seed),
            tick: 0,
            participants: Vec::new(),
            participating: Vec::new(),
            vaccinated: Vec::new(),
            countdown: Vec::new(),
        };
        simulation.init()?;
        Ok(simulation)
    }

    /// Discards all epidemic state and runs `init` again. The random streams are not
    /// reseeded, so a restarted run draws fresh numbers.
    ///
    /// # Errors
    /// [`EpiError::EmptyPopulation`] if no active group has members.
    pub fn restart(&mut self) -> Result<(), EpiError> {
        self.init()
    }

    fn init(&mut self) -> Result<(), EpiError> {
        let participants = self.network.active_nodes();
        if participants.is_empty() {
            return Err(EpiError::EmptyPopulation);
        }

        let capacity = self.network.node_capacity();
        self.tick = 0;
        self.participating = vec![false; capacity];
        self.vaccinated = vec![false; capacity];
        self.countdown = vec![0; capacity];
        for &id in &participants {
            self.participating[id.index()] = true;
        }
        let all: Vec<NodeId> = self.network.nodes().map(|(id, _)| id).collect();
        for id in all {
            if let Some(node) = self.network.node_mut(id) {
                node.reset();
            }
        }
        self.participants = participants;

        let vaccinated = self.vaccinate();
        let seeded = self.seed_infections();
        info!(
            "simulation of {:?} initialized: {} participants, {vaccinated} vaccinated, {seeded} infected",
            self.disease.name(),
            self.participants.len()
        );
        Ok(())
    }

    /// Each member of an active group is vaccinated with the group's vaccination rate, but
    /// never more than `max_vaccination_rate` of the group.
    fn vaccinate(&mut self) -> usize {
        let plan: Vec<(Vec<NodeId>, f64, usize)> = self
            .network
            .groups()
            .filter(|group| group.is_active())
            .map(|group| {
                let params = group.params();
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let cap =
                    (params.max_vaccination_rate * group.nodes().len() as f64).floor() as usize;
                (group.nodes().to_vec(), params.vaccination_rate, cap)
            })
            .collect();

        let mut total = 0;
        for (members, rate, cap) in plan {
            let mut chosen: Vec<NodeId> = members
                .into_iter()
                .filter(|_| self.random.sample_bool(VaccinationRng, rate))
                .collect();
            if chosen.len() > cap {
                let keep = self.random.sample_indices(VaccinationRng, chosen.len(), cap);
                chosen = keep.into_iter().map(|index| chosen[index]).collect();
            }
            for id in chosen {
                if let Some(node) = self.network.node_mut(id) {
                    node.vaccinate();
                    self.vaccinated[id.index()] = true;
                    total += 1;
                }
            }
        }
        total
    }

    fn seed_infections(&mut self) -> usize {
        let eligible: Vec<NodeId> = self
            .participants
            .iter()
            .copied()
            .filter(|id| !self.vaccinated[id.index()])
            .collect();
        let picks = self.random.sample_indices(
            SeedingRng,
            eligible.len(),
            self.disease.initial_infection_count(),
        );
        let duration = self.disease.duration();
        for index in &picks {
            let id = eligible[*index];
            if let Some(node) = self.network.node_mut(id) {
                node.infect();
                self.countdown[id.index()] = duration;
                trace!("seeded infection in {}", node.label());
            }
        }
        picks.len()
    }

    fn infected_neighbors(&self, id: NodeId) -> usize {
        self.network.node(id).map_or(0, |node| {
            node.connections()
                .iter()
                .filter(|&&neighbor| {
                    self.participating[neighbor.index()]
                        && self
                            .network
                            .node(neighbor)
                            .is_some_and(|n| n.health() == HealthState::Infected)
                })
                .count()
        })
    }

    fn infection_rate_for(&self, state: HealthState) -> f64 {
        match state {
            HealthState::Cured => self.disease.reinfection_rate(),
            HealthState::Vaccinated => self.disease.vaccinated_infection_rate(),
            _ => self.disease.infection_rate(),
        }
    }

    /// Advances the epidemic by one tick.
    pub fn step(&mut self) -> StepSummary {
        let mut transitions: Vec<(NodeId, Transition)> = Vec::new();

        for &id in &self.participants {
            let Some(state) = self.network.node(id).map(|node| node.health()) else {
                continue;
            };
            match state {
                HealthState::Infected => {
                    let remaining = &mut self.countdown[id.index()];
                    *remaining = remaining.saturating_sub(1);
                    if *remaining == 0 {
                        let fatality = if self.vaccinated[id.index()] {
                            self.disease.vaccinated_fatality_rate()
                        } else {
                            self.disease.fatality_rate()
                        };
                        let outcome = if self.random.sample_bool(OutcomeRng, fatality) {
                            Transition::Decease
                        } else {
                            Transition::Cure
                        };
                        transitions.push((id, outcome));
                    }
                }
                HealthState::Healthy | HealthState::Cured | HealthState::Vaccinated => {
                    let k = self.infected_neighbors(id);
                    if k == 0 {
                        continue;
                    }
                    let p = exposure_probability(self.infection_rate_for(state), k);
                    if self.random.sample_bool(TransmissionRng, p.clamp(0.0, 1.0)) {
                        transitions.push((id, Transition::Infect));
                    }
                }
                HealthState::Deceased => {}
            }
        }

        self.tick += 1;
        let mut summary = StepSummary {
            tick: self.tick,
            ..StepSummary::default()
        };
        let duration = self.disease.duration();
        for (id, transition) in transitions {
            let Some(node) = self.network.node_mut(id) else {
                continue;
            };
            match transition {
                Transition::Infect => {
                    node.infect();
                    self.countdown[id.index()] = duration;
                    summary.new_infections += 1;
                }
                Transition::Cure => {
                    node.cure();
                    summary.recoveries += 1;
                }
                Transition::Decease => {
                    node.decease();
                    summary.deaths += 1;
                }
            }
            trace!("tick {}: {} -> {}", self.tick, node.label(), node.health());
        }

        debug!(
            "tick {}: {} new infections, {} recoveries, {} deaths",
            summary.tick, summary.new_infections, summary.recoveries, summary.deaths
        );
        summary
    }

    /// Every participant's label, group, state and display color. Deceased members of active
    /// groups stay in the snapshot with state [`HealthState::Deceased`]; filter on `state` for
    /// the living population.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let colors = self.network.colors();
        let nodes = self
            .participants
            .iter()
            .filter_map(|&id| self.network.node(id))
            .map(|node| NodeSnapshot {
                node: node.label().to_string(),
                group: node.group().index(),
                state: node.health(),
                color: colors
                    .color_for(node.health(), self.disease.color())
                    .to_string(),
            })
            .collect();
        Snapshot {
            tick: self.tick,
            nodes,
        }
    }

    /// Head counts per state for every active group.
    #[must_use]
    pub fn group_counts(&self) -> GroupCounts {
        let mut counts: GroupCounts = self
            .network
            .groups()
            .filter(|group| group.is_active())
            .map(|group| (group.id(), StateCounts::default()))
            .collect();
        for &id in &self.participants {
            if let Some(node) = self.network.node(id) {
                counts.entry(node.group()).or_default().record(node.health());
            }
        }
        counts
    }

    /// Number of currently infected participants.
    #[must_use]
    pub fn infected_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|&&id| {
                self.network
                    .node(id)
                    .is_some_and(|node| node.health() == HealthState::Infected)
            })
            .count()
    }

    /// Whether the node was vaccinated during `init`. Stays true after it is infected.
    #[must_use]
    pub fn was_vaccinated(&self, id: NodeId) -> bool {
        self.vaccinated.get(id.index()).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn disease(&self) -> &Disease {
        &self.disease
    }

    #[must_use]
    pub fn network(&self) -> &Network {
        &*self.network
    }

    #[must_use]
    pub fn group_name(&self, id: GroupId) -> Option<&str> {
        self.network.group(id).map(|group| group.name())
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::params::{DiseaseParams, GroupParams};

    fn group(size: usize, avg: u32, delta: u32, vaccination: f64) -> GroupParams {
        GroupParams {
            name: "people".to_string(),
            member_count: size,
            avg_internal_connections: avg,
            delta_internal_connections: delta,
            age: 40,
            vaccination_rate: vaccination,
            max_vaccination_rate: vaccination,
            color: "#aaaaaa".to_string(),
        }
    }

    fn disease(infection_rate: f64, duration: u32, seeds: usize) -> DiseaseParams {
        DiseaseParams {
            name: "Flu".to_string(),
            color: "#ff0000".to_string(),
            fatality_rate: 0.0,
            vaccinated_fatality_rate: 0.0,
            infection_rate,
            reinfection_rate: 0.0,
            vaccinated_infection_rate: 0.0,
            duration,
            initial_infection_count: seeds,
        }
    }

    #[test]
    fn exposure_combines_independent_trials() {
        assert_approx_eq!(exposure_probability(0.5, 1), 0.5);
        assert_approx_eq!(exposure_probability(0.5, 2), 0.75);
        assert_approx_eq!(exposure_probability(0.0, 10), 0.0);
        assert_approx_eq!(exposure_probability(1.0, 3), 1.0);
    }

    #[test]
    fn unknown_disease_is_rejected() {
        let mut network = Network::new("n", 0);
        network.add_group_params(group(5, 1, 0, 0.0)).unwrap();
        assert!(matches!(
            Simulation::new(&mut network, DiseaseId(3), 0),
            Err(EpiError::UnknownDisease(DiseaseId(3)))
        ));
    }

    #[test]
    fn empty_population_is_rejected() {
        let mut network = Network::new("n", 0);
        let id = network.add_group_params(group(5, 1, 0, 0.0)).unwrap();
        network.set_group_active(id, false).unwrap();
        let flu = network.add_disease_params(disease(0.5, 2, 1)).unwrap();
        assert!(matches!(
            Simulation::new(&mut network, flu, 0),
            Err(EpiError::EmptyPopulation)
        ));
    }

    #[test]
    fn seed_count_is_bounded_by_population() {
        let mut network = Network::new("n", 0);
        network.add_group_params(group(4, 1, 0, 0.0)).unwrap();
        let flu = network.add_disease_params(disease(0.0, 3, 10)).unwrap();
        let simulation = Simulation::new(&mut network, flu, 0).unwrap();
        assert_eq!(simulation.infected_count(), 4);
        assert_eq!(simulation.snapshot().count(HealthState::Infected), 4);
    }

    #[test]
    fn infection_resolves_after_duration() {
        let mut network = Network::new("n", 0);
        network.add_group_params(group(3, 0, 0, 0.0)).unwrap();
        let flu = network.add_disease_params(disease(1.0, 3, 3)).unwrap();
        let mut simulation = Simulation::new(&mut network, flu, 0).unwrap();
        simulation.step();
        simulation.step();
        assert_eq!(simulation.infected_count(), 3);
        let summary = simulation.step();
        assert_eq!(summary.recoveries, 3);
        assert_eq!(summary.tick, 3);
        assert_eq!(simulation.snapshot().count(HealthState::Cured), 3);
    }

    #[test]
    fn restart_resets_states() {
        let mut network = Network::new("n", 1);
        network.add_group_params(group(30, 4, 1, 0.0)).unwrap();
        let flu = network.add_disease_params(disease(1.0, 2, 1)).unwrap();
        let mut simulation = Simulation::new(&mut network, flu, 1).unwrap();
        for _ in 0..5 {
            simulation.step();
        }
        simulation.restart().unwrap();
        assert_eq!(simulation.tick(), 0);
        assert_eq!(simulation.infected_count(), 1);
        assert_eq!(simulation.snapshot().count(HealthState::Healthy), 29);
    }

    #[test]
    fn group_counts_cover_every_participant() {
        let mut network = Network::new("n", 2);
        let a = network.add_group_params(group(10, 2, 0, 0.0)).unwrap();
        let b = network.add_group_params(group(5, 2, 0, 0.0)).unwrap();
        let flu = network.add_disease_params(disease(0.3, 2, 3)).unwrap();
        let mut simulation = Simulation::new(&mut network, flu, 2).unwrap();
        simulation.step();
        let counts = simulation.group_counts();
        assert_eq!(counts[&a].total(), 10);
        assert_eq!(counts[&b].total(), 5);
    }
}
