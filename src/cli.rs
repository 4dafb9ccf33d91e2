use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use crate::api::run_http_server;
use crate::config::{DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT, ServerConfig};
use crate::core::{compare_scenarios, compute_scenario_results_from_year, current_year};
use crate::error::AppError;
use crate::plan::Plan;
use crate::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "relocation-planner",
    about = "Project relocation scenarios year by year and score them against your goals",
    version
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, env = "PLANNER_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API
    Serve(ServeArgs),
    /// Compute results for the scenarios in a plan file and print them as JSON
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "PLANNER_HOST", default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, env = "PLANNER_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    /// Plan JSON with assets, goals and scenarios
    pub(crate) plan: PathBuf,
    /// Only evaluate the scenario with this id
    #[arg(long)]
    pub(crate) scenario: Option<String>,
    /// First projected year, defaults to the current year
    #[arg(long)]
    pub(crate) start_year: Option<i32>,
    /// Print a ranked comparison instead of full results
    #[arg(long, conflicts_with = "scenario")]
    pub(crate) compare: bool,
}

impl ServeArgs {
    fn into_config(self, log_level: String) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            log_level,
        }
    }
}

pub(crate) fn evaluate_plan(plan: &Plan, args: &EvaluateArgs) -> Result<Value, AppError> {
    plan.validate()?;
    let first_year = args.start_year.unwrap_or_else(current_year);

    if args.compare {
        let rows = compare_scenarios(first_year, &plan.scenarios, &plan.assets, &plan.goals)?;
        return Ok(serde_json::to_value(rows)?);
    }

    if let Some(id) = &args.scenario {
        let scenario = plan.scenario(id)?;
        let results =
            compute_scenario_results_from_year(first_year, scenario, &plan.assets, &plan.goals)?;
        return Ok(serde_json::to_value(results)?);
    }

    let all = plan
        .scenarios
        .iter()
        .map(|scenario| {
            compute_scenario_results_from_year(first_year, scenario, &plan.assets, &plan.goals)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_value(all)?)
}

pub async fn run() -> Result<(), AppError> {
    let Cli { log_level, command } = Cli::parse();

    match command {
        Command::Serve(args) => {
            let config = args.into_config(log_level);
            telemetry::init(&config.log_level)?;
            run_http_server(&config).await
        }
        Command::Evaluate(args) => {
            telemetry::init(&log_level)?;
            let plan = Plan::from_path(&args.plan)?;
            info!(
                path = %args.plan.display(),
                scenarios = plan.scenarios.len(),
                "evaluating plan"
            );
            let output = evaluate_plan(&plan, &args)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
    }
}
