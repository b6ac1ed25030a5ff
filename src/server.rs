//! MCP tool server exposing the AutoCompChem REST API.
//!
//! Every tool returns plain text. Failures of any kind (bad parameter JSON,
//! unreachable server, non-2xx status) are rendered into the returned text
//! instead of being reported as MCP errors, so the calling agent always gets
//! something it can read.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ServerHandler,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

use crate::client::{AutoCompChemClient, ClientError, RemoteApi};
use crate::endpoints;
use crate::format;
use crate::options::ClientOptions;

const INSTRUCTIONS: &str = "AutoCompChem MCP server: generate input files for quantum chemistry \
software (Gaussian, ORCA, NWChem, xTB, Spartan), parse their output files, evaluate jobs and run \
AutoCompChem tasks. Task parameters are passed as a JSON object string with upper-case keys such \
as INFILE, OUTFILE, JOBTYPE, METHOD and BASISSET.";

fn default_output_format() -> String {
    "XYZ".to_string()
}

fn default_software() -> String {
    "gaussian".to_string()
}

fn default_method() -> String {
    "B3LYP".to_string()
}

fn default_basis_set() -> String {
    "6-31G*".to_string()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TaskHelpArgs {
    #[schemars(description = "Name of the task to get help for (e.g., 'prepareInputGaussian', 'readGaussianOutput')")]
    pub task_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExecuteTaskArgs {
    #[schemars(description = "Name of the task to execute (e.g., 'prepareInputGaussian', 'readGaussianOutput')")]
    pub task_name: String,
    #[schemars(description = "JSON object string with task parameters, e.g. '{\"INFILE\": \"/path/to/input.xyz\", \"OUTFILE\": \"/path/to/output.inp\"}'")]
    pub parameters: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateInputArgs {
    #[schemars(description = "Software name (gaussian, orca, nwchem, xtb, spartan)")]
    pub software: String,
    #[schemars(description = "JSON object string with parameters like molecular geometry, calculation type, etc.")]
    pub parameters: String,
    #[serde(default)]
    #[schemars(description = "Optional working directory for the calculation")]
    pub working_directory: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadOutputArgs {
    #[schemars(description = "Software name (gaussian, orca, nwchem, xtb, spartan)")]
    pub software: String,
    #[schemars(description = "JSON object string with parameters including output file path and analysis options")]
    pub parameters: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EvaluateJobArgs {
    #[schemars(description = "JSON object string with job evaluation parameters (e.g., output file paths, criteria)")]
    pub parameters: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SmilesArgs {
    #[schemars(description = "SMILES string representation of the molecule")]
    pub smiles: String,
    #[serde(default = "default_output_format")]
    #[schemars(description = "Output format for the molecular structure (XYZ, SDF, etc.)")]
    pub output_format: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculationArgs {
    #[schemars(description = "Path to input molecular structure file")]
    pub input_file: String,
    #[serde(default = "default_software")]
    #[schemars(description = "Computational chemistry software to use (gaussian, orca, etc.)")]
    pub software: String,
    #[serde(default = "default_method")]
    #[schemars(description = "DFT method or level of theory (e.g., B3LYP, M06-2X)")]
    pub method: String,
    #[serde(default = "default_basis_set")]
    #[schemars(description = "Basis set for the calculation (e.g., 6-31G*, def2-TZVP)")]
    pub basis_set: String,
}

/// Kind of calculation prepared by the geometry and frequency tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    Optimization,
    Frequencies,
}

impl JobType {
    /// Value of the `JOBTYPE` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Optimization => "OPT",
            JobType::Frequencies => "FREQ",
        }
    }

    fn error_context(&self) -> &'static str {
        match self {
            JobType::Optimization => "setting up geometry optimization",
            JobType::Frequencies => "setting up frequency calculation",
        }
    }
}

/// Parse the `parameters` argument of a tool into a JSON object.
///
/// The error side is the finished tool output.
pub fn parse_parameters(raw: &str) -> Result<Map<String, Value>, String> {
    serde_json::from_str(raw).map_err(|e| {
        tracing::warn!("Rejected parameters {:?}: {}", raw, e);
        format!("Error parsing parameters JSON: {e}")
    })
}

/// Per-call working directory, removed when dropped.
fn scratch_dir() -> Result<TempDir, ClientError> {
    Ok(tempfile::Builder::new().prefix("autocompchem-").tempdir()?)
}

fn reply(context: &str, result: Result<String, ClientError>) -> String {
    result.unwrap_or_else(|e| {
        tracing::error!("Error {}: {}", context, e);
        format::error(context, e)
    })
}

/// MCP server handler forwarding tool calls to AutoCompChem.
#[derive(Clone)]
pub struct AutoCompChemServer {
    api: Arc<dyn RemoteApi>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AutoCompChemServer {
    /// Create a server forwarding to the given API.
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self {
            api,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a server with an HTTP client built from `options`.
    pub fn from_options(options: ClientOptions) -> Self {
        Self::new(Arc::new(AutoCompChemClient::new(options)))
    }

    #[tool(description = "Get information about the AutoCompChem API and available capabilities.")]
    pub async fn get_api_info(&self) -> String {
        reply("getting API info", self.api_info().await)
    }

    #[tool(description = "Get a list of all available computational chemistry tasks.")]
    pub async fn list_available_tasks(&self) -> String {
        let result = self.api.get(endpoints::TASKS).await;
        reply("getting tasks", result.map(|tasks| format::task_list(&tasks)))
    }

    #[tool(description = "Get detailed help information for a specific computational chemistry task.")]
    pub async fn get_task_help(
        &self,
        Parameters(TaskHelpArgs { task_name }): Parameters<TaskHelpArgs>,
    ) -> String {
        let result = self.api.get(&endpoints::task_help(&task_name)).await;
        reply(
            &format!("getting help for task '{task_name}'"),
            result.map(|help| format::task_help(&task_name, &help)),
        )
    }

    #[tool(description = "Execute a computational chemistry task with specified parameters.")]
    pub async fn execute_task(
        &self,
        Parameters(ExecuteTaskArgs {
            task_name,
            parameters,
        }): Parameters<ExecuteTaskArgs>,
    ) -> String {
        let params = match parse_parameters(&parameters) {
            Ok(params) => params,
            Err(message) => return message,
        };

        let result = self
            .api
            .post(&endpoints::task_execute(&task_name), &Value::Object(params))
            .await;
        reply(
            &format!("executing task '{task_name}'"),
            result.map(|value| format::task_execution(&task_name, &format::decode(&value))),
        )
    }

    #[tool(description = "Get information about supported computational chemistry software packages.")]
    pub async fn get_supported_software(&self) -> String {
        let result = self.api.get(endpoints::SOFTWARE).await;
        reply(
            "getting supported software",
            result.map(|value| format::supported_software(&format::decode(&value))),
        )
    }

    #[tool(description = "Generate input file for computational chemistry software.")]
    pub async fn generate_input_file(
        &self,
        Parameters(GenerateInputArgs {
            software,
            parameters,
            working_directory,
        }): Parameters<GenerateInputArgs>,
    ) -> String {
        let mut params = match parse_parameters(&parameters) {
            Ok(params) => params,
            Err(message) => return message,
        };

        if let Some(dir) = working_directory.filter(|d| !d.is_empty()) {
            params.insert("WORKDIR".to_string(), Value::String(dir));
        }

        let result = self
            .api
            .post(&endpoints::software_input(&software), &Value::Object(params))
            .await;
        reply(
            &format!("generating {software} input file"),
            result.map(|value| format::input_generation(&software, &value)),
        )
    }

    #[tool(description = "Parse output file from computational chemistry software.")]
    pub async fn read_output_file(
        &self,
        Parameters(ReadOutputArgs {
            software,
            parameters,
        }): Parameters<ReadOutputArgs>,
    ) -> String {
        let params = match parse_parameters(&parameters) {
            Ok(params) => params,
            Err(message) => return message,
        };

        let result = self
            .api
            .post(&endpoints::software_output(&software), &Value::Object(params))
            .await;
        reply(
            &format!("reading {software} output file"),
            result.map(|value| format::output_analysis(&software, &value)),
        )
    }

    #[tool(description = "Evaluate a computational chemistry job to assess its quality and suggest improvements.")]
    pub async fn evaluate_job(
        &self,
        Parameters(EvaluateJobArgs { parameters }): Parameters<EvaluateJobArgs>,
    ) -> String {
        let params = match parse_parameters(&parameters) {
            Ok(params) => params,
            Err(message) => return message,
        };

        let result = self
            .api
            .post(endpoints::JOB_EVALUATE, &Value::Object(params))
            .await;
        reply(
            "evaluating job",
            result.map(|value| format::job_evaluation(&value)),
        )
    }

    #[tool(description = "Create a 3D molecular structure from a SMILES string.")]
    pub async fn create_molecule_from_smiles(
        &self,
        Parameters(SmilesArgs {
            smiles,
            output_format,
        }): Parameters<SmilesArgs>,
    ) -> String {
        reply(
            &format!("creating molecule from SMILES '{smiles}'"),
            self.molecule_from_smiles(&smiles, &output_format).await,
        )
    }

    #[tool(description = "Perform geometry optimization of a molecular structure.")]
    pub async fn optimize_geometry(&self, Parameters(args): Parameters<CalculationArgs>) -> String {
        let job = JobType::Optimization;
        reply(job.error_context(), self.setup_calculation(job, &args).await)
    }

    #[tool(description = "Set up a frequency calculation to compute vibrational frequencies and thermochemical properties.")]
    pub async fn calculate_frequencies(
        &self,
        Parameters(args): Parameters<CalculationArgs>,
    ) -> String {
        let job = JobType::Frequencies;
        reply(job.error_context(), self.setup_calculation(job, &args).await)
    }

    #[tool(description = "List the capabilities of every worker registered in AutoCompChem.")]
    pub async fn get_worker_capabilities(&self) -> String {
        let result = self.api.get(endpoints::CAPABILITIES).await;
        reply(
            "getting worker capabilities",
            result.map(|value| format::worker_capabilities(&value)),
        )
    }

    #[tool(description = "Describe the job evaluation and healing capabilities of AutoCompChem.")]
    pub async fn get_job_evaluation_info(&self) -> String {
        let result = self.api.get(endpoints::JOB_EVALUATION_INFO).await;
        reply(
            "getting job evaluation info",
            result.map(|value| format::job_evaluation_info(&value)),
        )
    }

    #[tool(description = "Get the molecular file formats AutoCompChem can read and write.")]
    pub async fn get_supported_formats(&self) -> String {
        let result = self.api.get(endpoints::MOLECULE_FORMATS).await;
        reply(
            "getting supported formats",
            result.map(|value| format::molecule_formats(&format::decode(&value), &value)),
        )
    }
}

impl AutoCompChemServer {
    async fn api_info(&self) -> Result<String, ClientError> {
        let info = self.api.get(endpoints::API_INFO).await?;
        let health = self.api.get(endpoints::HEALTH).await?;
        Ok(format::api_info(
            &format::decode(&info),
            &format::decode(&health),
        ))
    }

    async fn molecule_from_smiles(
        &self,
        smiles: &str,
        output_format: &str,
    ) -> Result<String, ClientError> {
        let workdir = scratch_dir()?;
        let params = json!({
            "SMILES": smiles,
            "OUTFORMAT": output_format,
            "WORKDIR": workdir.path().to_string_lossy(),
        });

        let result = self
            .api
            .post(&endpoints::task_execute(endpoints::SMILES_TASK), &params)
            .await?;
        Ok(format::molecule_creation(smiles, &result))
    }

    async fn setup_calculation(
        &self,
        job: JobType,
        args: &CalculationArgs,
    ) -> Result<String, ClientError> {
        let workdir = scratch_dir()?;
        let params = json!({
            "INFILE": args.input_file,
            "JOBTYPE": job.as_str(),
            "METHOD": args.method,
            "BASISSET": args.basis_set,
            "WORKDIR": workdir.path().to_string_lossy(),
        });

        let result = self
            .api
            .post(&endpoints::software_input(&args.software), &params)
            .await?;
        Ok(match job {
            JobType::Optimization => format::geometry_optimization(&args.software, &result),
            JobType::Frequencies => format::frequency_calculation(&args.software, &result),
        })
    }
}

#[tool_handler]
impl ServerHandler for AutoCompChemServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parameters_rejects_invalid_json() {
        let message = parse_parameters("{not json").unwrap_err();
        assert!(message.starts_with("Error parsing parameters JSON: "));
        assert!(message.contains("key must be a string"));
    }

    #[test]
    fn test_parse_parameters_requires_object() {
        let message = parse_parameters("[1, 2]").unwrap_err();
        assert!(message.contains("invalid type"));
    }

    #[test]
    fn test_calculation_args_defaults() {
        let args: CalculationArgs =
            serde_json::from_value(json!({"input_file": "/data/h2o.xyz"})).unwrap();
        assert_eq!(args.software, "gaussian");
        assert_eq!(args.method, "B3LYP");
        assert_eq!(args.basis_set, "6-31G*");
    }

    #[test]
    fn test_job_type_values() {
        assert_eq!(JobType::Optimization.as_str(), "OPT");
        assert_eq!(JobType::Frequencies.as_str(), "FREQ");
    }

    #[test]
    fn test_server_info() {
        let server = AutoCompChemServer::from_options(ClientOptions::new());
        let info = server.get_info();
        assert_eq!(info.server_info.name, "autocompchem-mcp");
        assert!(info.capabilities.tools.is_some());
    }
}
