//! Shortest-shadow finder CLI - entry point and exit handling.

use noonshadow::error::CliError;
use noonshadow::{cli, compute, output, planner};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    let params = match cli::parse_cli(args) {
        Ok(params) => params,
        Err(CliError::Exit(message)) => {
            print!("{}", message);
            if !message.ends_with('\n') {
                println!();
            }
            std::process::exit(0);
        }
        Err(CliError::Message(message)) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    };

    let start = if params.perf {
        Some(std::time::Instant::now())
    } else {
        None
    };

    let (compute_plan, output_plan) = match planner::build_job(&params) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let results = compute::calculate_stream(compute_plan);

    let summary = match output::dispatch_output(results, &output_plan) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    if let Some(start_time) = start {
        let elapsed = start_time.elapsed();
        eprintln!(
            "Processed {} records ({} probes) in {:.3}s ({:.0} probes/sec)",
            summary.records,
            summary.probes,
            elapsed.as_secs_f64(),
            summary.probes as f64 / elapsed.as_secs_f64()
        );
    }

    if summary.failures > 0 {
        std::process::exit(1);
    }
}
