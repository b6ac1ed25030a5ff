//! Smoke checks against a running AutoCompChem server.
//!
//! Used by the `autocompchem-smoke` binary to verify that the endpoints the
//! MCP tools depend on respond before wiring the server into a client.

use itertools::Itertools;
use serde_json::{json, Value};

use crate::client::{ClientError, RemoteApi};
use crate::endpoints;
use crate::format;

/// Checks that must pass for the server to be considered usable.
pub const MIN_PASSING: usize = 3;

/// Tasks tried in order by the task-help check.
pub const HELP_CANDIDATES: [&str; 3] = [
    "prepareInputGaussian",
    "readGaussianOutput",
    "readAtomContainers",
];

/// Task executed by the simple execution check.
pub const PROBE_TASK: &str = "readAtomContainers";

/// Outcome of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    /// What was observed, or the error that failed the check.
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct SmokeReport {
    pub results: Vec<CheckResult>,
}

impl SmokeReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// True when at least [`MIN_PASSING`] checks passed.
    pub fn is_healthy(&self) -> bool {
        self.passed() >= MIN_PASSING
    }
}

fn outcome(name: &'static str, result: Result<String, ClientError>) -> CheckResult {
    match result {
        Ok(detail) => CheckResult {
            name,
            passed: true,
            detail,
        },
        Err(e) => {
            tracing::warn!("{} failed: {}", name, e);
            CheckResult {
                name,
                passed: false,
                detail: e.to_string(),
            }
        }
    }
}

async fn connectivity(api: &dyn RemoteApi) -> Result<String, ClientError> {
    let health = api.get(endpoints::HEALTH).await?;
    let info = api.get(endpoints::API_INFO).await?;
    Ok(format!("Health check: {health}\nAPI Info: {info}"))
}

async fn task_listing(api: &dyn RemoteApi) -> Result<String, ClientError> {
    let tasks = api.get(endpoints::TASKS).await?;
    Ok(match &tasks {
        Value::Array(items) => {
            let first = items.iter().take(5).map(format::display_value).join(", ");
            format!("Found {} tasks (first few: {first})", items.len())
        }
        _ => "Found unknown tasks".to_string(),
    })
}

async fn software_support(api: &dyn RemoteApi) -> Result<String, ClientError> {
    let software = api.get(endpoints::SOFTWARE).await?;
    Ok(format!("Software support data: {}", format::pretty(&software)))
}

async fn task_help(api: &dyn RemoteApi) -> CheckResult {
    let mut failures = Vec::new();
    for task in HELP_CANDIDATES {
        match api.get(&endpoints::task_help(task)).await {
            Ok(help) => {
                let preview = format::truncate_display(&format::display_value(&help), 100);
                return outcome("Task Help", Ok(format!("Help for '{task}': {preview}")));
            }
            Err(e) => {
                tracing::warn!("Help for '{}' failed: {}", task, e);
                failures.push(format!("'{task}': {e}"));
            }
        }
    }
    CheckResult {
        name: "Task Help",
        passed: false,
        detail: format!("No task help was successful ({})", failures.join("; ")),
    }
}

async fn task_execution(api: &dyn RemoteApi) -> Result<String, ClientError> {
    let params = json!({ "TASK": PROBE_TASK });
    let result = api
        .post(&endpoints::task_execute(PROBE_TASK), &params)
        .await?;
    Ok(format!("Task execution result: {}", format::pretty(&result)))
}

/// Run every check in order. Individual failures never abort the run.
pub async fn run_all(api: &dyn RemoteApi) -> SmokeReport {
    let results = vec![
        outcome("API Connectivity", connectivity(api).await),
        outcome("Task Listing", task_listing(api).await),
        outcome("Software Support", software_support(api).await),
        task_help(api).await,
        outcome("Simple Task Execution", task_execution(api).await),
    ];
    SmokeReport { results }
}
