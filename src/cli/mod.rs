//! Command-line interface.

pub mod dispatch;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::core::plan::{self, Context, Step};
use crate::core::process::SystemExecutor;
use crate::core::secrets::GcloudSecretStore;
use crate::core::settings::Settings;
use crate::error::Result;

/// localdev - Deploy services, tools and CI/CD config to a local Minikube cluster.
#[derive(Parser, Debug)]
#[command(
    name = "localdev",
    about = "Deploy services, tools and CI/CD config to a local Minikube cluster",
    version,
    after_help = "Flags run in a fixed order: build-test, deploy, deploy-group, tools, \
                  remove-tools, cicd, then the subcommand."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the planned steps without running anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Deploy a service, or a group with "group <name>"
    #[arg(long, value_name = "TARGET")]
    pub deploy: Option<String>,

    /// Deploy a group of services
    #[arg(long, value_name = "NAME")]
    pub deploy_group: Option<String>,

    /// Deploy cluster tools
    #[arg(long, value_enum, num_args = 1.., value_name = "TOOL")]
    pub tools: Vec<Tool>,

    /// Deploy CI/CD configuration
    #[arg(long, value_enum, value_name = "TYPE")]
    pub cicd: Option<CicdKind>,

    /// Remove cluster tools
    #[arg(long, value_enum, num_args = 1.., value_name = "TOOL")]
    pub remove_tools: Vec<Tool>,

    /// Build and test a service
    #[arg(long, value_name = "SERVICE")]
    pub build_test: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Standalone subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Remove a deployed service
    Remove {
        /// Service name
        service_name: String,
    },

    /// Stop the Minikube cluster
    Stop,

    /// Start the Minikube cluster
    Start,

    /// Delete and recreate the Minikube cluster
    Reset,
}

/// Cluster tools the tools helper knows about.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Mongo,
    Elastic,
    Redis,
    Istio,
    Prometheus,
    All,
}

impl Tool {
    /// Name passed to the helper.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mongo => "mongo",
            Self::Elastic => "elastic",
            Self::Redis => "redis",
            Self::Istio => "istio",
            Self::Prometheus => "prometheus",
            Self::All => "all",
        }
    }
}

/// CI/CD configuration kinds.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CicdKind {
    All,
    Secret,
    Configmap,
}

impl CicdKind {
    /// Name passed to the helper.
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Secret => "secret",
            Self::Configmap => "configmap",
        }
    }
}

/// Execute a parsed invocation.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = Settings::load()?;
    let steps = dispatch::plan(cli, &settings);
    debug!(steps = steps.len(), "plan built");

    if steps.is_empty() {
        output::hint(&format!("nothing to do, see {}", output::cmd("localdev --help")));
        return Ok(());
    }

    if cli.dry_run {
        print_plan(&steps);
        return Ok(());
    }

    let store = GcloudSecretStore::new();
    let mut executor = SystemExecutor;
    let mut ctx = Context {
        settings: &settings,
        store: &store,
        executor: &mut executor,
    };
    let failed = plan::run(&steps, &mut ctx, |step| output::step(&step.label))?;

    if failed.is_empty() {
        output::success("done");
    } else {
        output::hint(&format!(
            "finished with {} failed step(s): {}",
            failed.len(),
            failed.join(", ")
        ));
    }
    Ok(())
}

fn print_plan(steps: &[Step]) {
    output::section("Plan");
    for (i, step) in steps.iter().enumerate() {
        println!("{}. {}", i + 1, step.label);
        output::kv("command", &step.action);
        output::kv("policy", step.policy);
    }
}
