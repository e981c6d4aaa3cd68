use std::process::ExitCode;

use epinet::runner::run_with_args;

fn main() -> ExitCode {
    match run_with_args() {
        Ok(summary) => {
            let totals = summary.totals;
            println!(
                "seed {} | {} ticks | population {} | healthy {} infected {} cured {} vaccinated {} deceased {}",
                summary.seed,
                summary.ticks,
                summary.population,
                totals.healthy,
                totals.infected,
                totals.cured,
                totals.vaccinated,
                totals.deceased
            );
            if let Some(report) = summary.report {
                println!("report written to {}", report.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("epinet: {e}");
            ExitCode::FAILURE
        }
    }
}
