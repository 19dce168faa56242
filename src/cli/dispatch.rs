//! Command dispatcher.
//!
//! Turns parsed arguments into the ordered step list. Order is fixed:
//! build-test, deploy, deploy-group, tools, remove-tools, cicd, then the
//! terminal subcommand. Minikube lifecycle steps only log failures; everything
//! else aborts the run.

use crate::cli::{CicdKind, Cli, Command, Tool};
use crate::core::constants;
use crate::core::plan::{Action, Policy, Step};
use crate::core::settings::Settings;

/// Build the full plan for one invocation.
pub fn plan(cli: &Cli, settings: &Settings) -> Vec<Step> {
    let mut steps = Vec::new();

    if let Some(service) = &cli.build_test {
        steps.push(build_test(service));
    }
    if let Some(target) = &cli.deploy {
        steps.push(deploy_services(settings, target));
    }
    if let Some(group) = &cli.deploy_group {
        steps.push(deploy_services(settings, &format!("group {}", group)));
    }
    steps.extend(deploy_tools(settings, &cli.tools));
    steps.extend(remove_tools(settings, &cli.remove_tools));
    if let Some(kind) = cli.cicd {
        steps.push(deploy_cicd(settings, kind));
    }
    if let Some(command) = &cli.command {
        steps.extend(terminal(settings, command));
    }

    steps
}

/// Build-test a service. Its exit code is reported, not fatal.
pub fn build_test(service: &str) -> Step {
    Step {
        label: format!("build-test {}", service),
        action: Action::BuildTest {
            service: service.to_string(),
        },
        policy: Policy::LogAndContinue,
    }
}

/// Deploy a single service, or a group when the target reads `group <name>`.
pub fn deploy_services(settings: &Settings, target: &str) -> Step {
    let (kind, name) = match target.strip_prefix("group ") {
        Some(group) => ("group", group.trim()),
        None => ("service", target),
    };
    Step::exec(
        format!("deploy {} {}", kind, name),
        settings.helper(constants::DEPLOY_SERVICE_HELPER),
        &[kind, name],
        Policy::AbortOnFailure,
    )
}

/// One deploy step per tool, in the order given.
pub fn deploy_tools(settings: &Settings, tools: &[Tool]) -> Vec<Step> {
    tools
        .iter()
        .map(|tool| {
            Step::exec(
                format!("deploy tool {}", tool.name()),
                settings.helper(constants::DEPLOY_TOOLS_HELPER),
                &[tool.name()],
                Policy::AbortOnFailure,
            )
        })
        .collect()
}

/// One removal step per tool, in the order given.
pub fn remove_tools(settings: &Settings, tools: &[Tool]) -> Vec<Step> {
    tools
        .iter()
        .map(|tool| {
            Step::exec(
                format!("remove tool {}", tool.name()),
                settings.helper(constants::DEPLOY_TOOLS_HELPER),
                &["remove", tool.name()],
                Policy::AbortOnFailure,
            )
        })
        .collect()
}

/// Deploy CI/CD configuration.
pub fn deploy_cicd(settings: &Settings, kind: CicdKind) -> Step {
    Step::exec(
        format!("deploy cicd {}", kind.name()),
        settings.helper(constants::DEPLOY_CICD_HELPER),
        &[kind.name()],
        Policy::AbortOnFailure,
    )
}

/// Steps for the standalone subcommand.
pub fn terminal(settings: &Settings, command: &Command) -> Vec<Step> {
    let minikube = |verb: &str| {
        Step::exec(
            format!("minikube {}", verb),
            settings.minikube.clone(),
            &[verb],
            Policy::LogAndContinue,
        )
    };

    match command {
        Command::Remove { service_name } => vec![Step::exec(
            format!("remove service {}", service_name),
            settings.helper(constants::DEPLOY_SERVICE_HELPER),
            &["remove", service_name.as_str()],
            Policy::AbortOnFailure,
        )],
        Command::Start => vec![minikube("start")],
        Command::Stop => vec![minikube("stop")],
        Command::Reset => vec![minikube("delete"), minikube("start")],
    }
}
