//! Rendering of AutoCompChem responses into tool output text.
//!
//! The remote service does not publish its response schemas, so every shape
//! here is decoded best-effort: missing keys and keys of an unexpected type
//! both come out as `None`. The functions are pure and never touch the
//! network.

use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnError};

/// Longest exposed-data value shown by [`task_execution`], in characters.
pub const EXPOSED_VALUE_LIMIT: usize = 200;

/// Placeholder for absent API info fields.
const NOT_AVAILABLE: &str = "N/A";

/// Response of `GET /autocompchem/info`.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiInfo {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub name: Option<Value>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub version: Option<Value>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub description: Option<Value>,
}

/// Response of `GET /autocompchem/health`.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub status: Option<Value>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub service: Option<Value>,
}

/// Response of `POST /autocompchem/tasks/{name}/execute`.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskExecution {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub status: Option<Value>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub exposed_data: Option<Map<String, Value>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub exposed_data_count: Option<Value>,
}

/// Response of `GET /compchem/software`: software name to task name.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupportedSoftware {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub input_writers: Option<Map<String, Value>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub output_readers: Option<Map<String, Value>>,
}

/// Response of `GET /molecules/formats`.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MoleculeFormats {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub input: Option<Vec<Value>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub output: Option<Vec<Value>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub description: Option<Value>,
}

/// Decode a response into one of the shapes above, falling back to an empty
/// shape when the value is not an object at all.
pub fn decode<T: DeserializeOwned + Default>(value: &Value) -> T {
    T::deserialize(value).unwrap_or_default()
}

/// Display a JSON value the way a person would read it: strings without
/// quotes, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pretty-printed JSON for pass-through results.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Cut `text` to `limit` characters, appending `...` when something was cut.
pub fn truncate_display(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let head: String = text.chars().take(limit).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// `Error <doing what>: <cause>`
pub fn error(context: &str, cause: impl std::fmt::Display) -> String {
    format!("Error {context}: {cause}")
}

fn or_na(value: &Option<Value>) -> String {
    value
        .as_ref()
        .map(display_value)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn api_info(info: &ApiInfo, health: &HealthStatus) -> String {
    format!(
        "AutoCompChem API Information:\n\
         - Name: {}\n\
         - Version: {}\n\
         - Description: {}\n\
         - Status: {}\n\
         - Service: {}\n",
        or_na(&info.name),
        or_na(&info.version),
        or_na(&info.description),
        or_na(&health.status),
        or_na(&health.service),
    )
}

pub fn task_list(tasks: &Value) -> String {
    match tasks {
        Value::Array(items) => {
            let lines = items
                .iter()
                .map(|task| format!("- {}", display_value(task)))
                .join("\n");
            format!("Available AutoCompChem tasks:\n{lines}")
        }
        other => format!("Available tasks: {}", display_value(other)),
    }
}

pub fn task_help(task_name: &str, help: &Value) -> String {
    format!("Help for task '{task_name}':\n{}", display_value(help))
}

pub fn task_execution(task_name: &str, result: &TaskExecution) -> String {
    let status = result
        .status
        .as_ref()
        .map(display_value)
        .unwrap_or_else(|| "Unknown".to_string());
    let count = result
        .exposed_data_count
        .as_ref()
        .map(display_value)
        .unwrap_or_else(|| "0".to_string());

    let mut response = format!(
        "Task '{task_name}' execution result:\nStatus: {status}\nExposed data items: {count}\n"
    );

    if let Some(exposed) = result.exposed_data.as_ref().filter(|m| !m.is_empty()) {
        response.push_str("\nExposed data:\n");
        for (key, value) in exposed {
            let shown = truncate_display(&display_value(value), EXPOSED_VALUE_LIMIT);
            response.push_str(&format!("- {key}: {shown}\n"));
        }
    }

    response
}

fn software_section(title: &str, entries: Option<&Map<String, Value>>) -> String {
    let mut section = format!("{title}:\n");
    for (software, task) in entries.into_iter().flatten() {
        section.push_str(&format!(
            "- {}: {}\n",
            software.to_uppercase(),
            display_value(task)
        ));
    }
    section
}

pub fn supported_software(software: &SupportedSoftware) -> String {
    format!(
        "Supported Computational Chemistry Software:\n\n{}\n{}",
        software_section("Input File Generators", software.input_writers.as_ref()),
        software_section("Output File Readers", software.output_readers.as_ref()),
    )
}

pub fn input_generation(software: &str, result: &Value) -> String {
    format!(
        "Input file generation for {}:\n{}",
        software.to_uppercase(),
        pretty(result)
    )
}

pub fn output_analysis(software: &str, result: &Value) -> String {
    format!(
        "Output file analysis for {}:\n{}",
        software.to_uppercase(),
        pretty(result)
    )
}

pub fn job_evaluation(result: &Value) -> String {
    format!("Job evaluation result:\n{}", pretty(result))
}

pub fn molecule_creation(smiles: &str, result: &Value) -> String {
    format!("Molecule creation from SMILES '{smiles}':\n{}", pretty(result))
}

pub fn geometry_optimization(software: &str, result: &Value) -> String {
    format!(
        "Geometry optimization setup for {}:\n{}\n\n\
         Note: This creates the input file. You'll need to run the calculation with the \
         quantum chemistry software and then parse the output.",
        software.to_uppercase(),
        pretty(result)
    )
}

pub fn frequency_calculation(software: &str, result: &Value) -> String {
    format!(
        "Frequency calculation setup for {}:\n{}\n\n\
         Note: This creates the input file for frequency analysis. Run the calculation and \
         parse output to get vibrational frequencies, zero-point energy, and thermochemical data.",
        software.to_uppercase(),
        pretty(result)
    )
}

pub fn worker_capabilities(result: &Value) -> String {
    format!("Registered worker capabilities:\n{}", pretty(result))
}

pub fn job_evaluation_info(result: &Value) -> String {
    format!("Job evaluation capabilities:\n{}", pretty(result))
}

pub fn molecule_formats(formats: &MoleculeFormats, raw: &Value) -> String {
    if formats.input.is_none() && formats.output.is_none() {
        return format!("Supported molecular file formats:\n{}", pretty(raw));
    }

    let list = |items: &Option<Vec<Value>>| {
        items
            .iter()
            .flatten()
            .map(display_value)
            .join(", ")
    };

    let mut response = format!(
        "Supported molecular file formats:\n- Input: {}\n- Output: {}\n",
        list(&formats.input),
        list(&formats.output)
    );
    if let Some(description) = &formats.description {
        response.push_str(&format!("\n{}\n", display_value(description)));
    }
    response
}
