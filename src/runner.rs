use std::path::{Path, PathBuf};

use clap::{Args, Command, FromArgMatches as _};
use log::info;

use crate::error::EpiError;
use crate::log::set_log_level_named;
use crate::report::{GroupCountsRow, ReportWriter};
use crate::scenario::ScenarioConfig;
use crate::simulation::{Simulation, StateCounts};

/// Name of the per-tick group counts report inside `--output-dir`.
pub const GROUP_COUNTS_REPORT: &str = "group_counts.csv";

/// Default cli arguments for the epinet runner
#[derive(Args, Debug)]
pub struct BaseArgs {
    /// Random seed. Overrides the scenario's `random_seed`.
    #[arg(short, long)]
    pub random_seed: Option<u64>,

    /// Path to the scenario JSON file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Optional directory for report output
    #[arg(short, long, default_value = "")]
    pub output_dir: String,

    /// Number of ticks to simulate. Overrides the scenario's `ticks`.
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// Enable logging at the given level (error, warn, info, debug, trace)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

/// What a finished run looked like.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub population: usize,
    pub totals: StateCounts,
    pub report: Option<PathBuf>,
}

fn create_epinet_cli() -> Command {
    let cli = Command::new("epinet").about("Epidemic spread over synthetic contact networks");
    BaseArgs::augment_args(cli)
}

/// Parses the process arguments and runs the described scenario.
///
/// # Errors
/// Returns an error if argument parsing, loading the scenario, or writing the report fails
pub fn run_with_args() -> Result<RunSummary, Box<dyn std::error::Error>> {
    let matches = create_epinet_cli().get_matches();
    let args = BaseArgs::from_arg_matches(&matches)?;
    Ok(run_with_args_internal(&args)?)
}

/// Runs a scenario with already parsed arguments.
///
/// # Errors
/// Returns [`EpiError`] if the scenario is invalid or the report cannot be written
pub fn run_with_args_internal(args: &BaseArgs) -> Result<RunSummary, EpiError> {
    if let Some(level) = &args.log_level {
        set_log_level_named(level)?;
    }

    let config = ScenarioConfig::load(&args.config)?;
    let seed = args.random_seed.or(config.random_seed).unwrap_or(0);
    let ticks = args.ticks.unwrap_or(config.ticks);

    let (mut network, disease) = config.build_network(seed)?;
    let population = network.population();
    let mut simulation = Simulation::new(&mut network, disease, seed)?;

    let mut report = if args.output_dir.is_empty() {
        None
    } else {
        let path = Path::new(&args.output_dir).join(GROUP_COUNTS_REPORT);
        Some(ReportWriter::create(path)?)
    };

    if let Some(report) = report.as_mut() {
        write_counts(report, &simulation)?;
    }
    for _ in 0..ticks {
        simulation.step();
        if let Some(report) = report.as_mut() {
            write_counts(report, &simulation)?;
        }
    }

    let mut totals = StateCounts::default();
    for node in simulation.snapshot().nodes {
        totals.record(node.state);
    }
    info!("finished {ticks} ticks of {:?}: {totals:?}", config.name);
    Ok(RunSummary {
        seed,
        ticks,
        population,
        totals,
        report: report.map(|report| report.path().to_path_buf()),
    })
}

fn write_counts(report: &mut ReportWriter, simulation: &Simulation) -> Result<(), EpiError> {
    for (group, counts) in simulation.group_counts() {
        let name = simulation.group_name(group).unwrap_or_default();
        report.send(&GroupCountsRow::new(simulation.tick(), group, name, counts))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(output_dir: &str) -> BaseArgs {
        BaseArgs {
            random_seed: Some(42),
            config: PathBuf::from("tests/data/scenario.json"),
            output_dir: output_dir.to_string(),
            ticks: Some(5),
            log_level: None,
        }
    }

    #[test]
    fn test_run_with_random_seed() {
        let first = run_with_args_internal(&args("")).unwrap();
        let second = run_with_args_internal(&args("")).unwrap();
        assert_eq!(first.seed, 42);
        assert_eq!(first.ticks, 5);
        assert_eq!(first, second);
        assert_eq!(first.totals.total(), first.population);
        assert!(first.report.is_none());
    }

    #[test]
    fn test_run_writes_report() {
        let temp_dir = tempdir().unwrap();
        let summary = run_with_args_internal(&args(temp_dir.path().to_str().unwrap())).unwrap();
        let path = summary.report.unwrap();
        assert_eq!(path, temp_dir.path().join(GROUP_COUNTS_REPORT));

        let mut reader = csv::Reader::from_path(path).unwrap();
        let rows: Vec<GroupCountsRow> = reader.deserialize().map(Result::unwrap).collect();
        // ticks 0..=5 for each of the three groups
        assert_eq!(rows.len(), 6 * 3);
        assert_eq!(rows.last().unwrap().tick, 5);
    }

    #[test]
    fn test_bad_log_level() {
        let mut bad = args("");
        bad.log_level = Some("loud".to_string());
        assert!(matches!(
            run_with_args_internal(&bad),
            Err(EpiError::InvalidField { ref field, .. }) if field == "log_level"
        ));
    }

    #[test]
    fn test_missing_config() {
        let mut bad = args("");
        bad.config = PathBuf::from("tests/data/does_not_exist.json");
        assert!(matches!(
            run_with_args_internal(&bad),
            Err(EpiError::IoError(_))
        ));
    }
}
