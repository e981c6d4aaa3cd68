//! Epidemic spread over synthetic contact networks.
//!
//! `epinet` builds a random social-contact graph from coarse per-group statistics and then
//! advances the health state of every individual tick by tick under a configurable disease.
//!
//! The pieces, leaves first:
//! * [`params`]: validated parameter bundles parsed from raw key-value maps or JSON.
//! * [`network`]: nodes, groups and the [`Network`] aggregate. Every group-level mutation
//!   validates first and then regenerates the affected part of the graph with a
//!   degree-budgeted stub-matching builder.
//! * [`disease`]: the disease parameter bundle a simulation binds to.
//! * [`simulation`]: the [`Simulation`] stepper with its per-tick snapshots.
//! * [`scenario`], [`report`] and [`runner`]: loading a run description from JSON, writing
//!   per-group counts as CSV, and the `epinet` command line driver.
//!
//! All randomness flows through named streams derived from one base seed (see [`random`]),
//! so a fixed seed reproduces a run exactly.
pub mod disease;
pub mod error;
pub mod hashing;
pub mod log;
pub mod network;
pub mod params;
pub mod random;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod simulation;

pub use disease::{Disease, DiseaseId};
pub use error::EpiError;
pub use network::{GroupId, HealthState, Network, NodeGroup, NodeId};
pub use params::{DiseaseParams, ExternalConnection, GroupParams, ParamMap};
// Re-exports for use in macros
#[doc(hidden)]
pub use paste;
pub use rand;
pub use simulation::{Simulation, Snapshot, StepSummary};
