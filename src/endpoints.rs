//! Path templates of the AutoCompChem REST API.
//!
//! Every path is absolute and is appended verbatim to the configured base URL.

pub const API_INFO: &str = "/api/v1/autocompchem/info";
pub const HEALTH: &str = "/api/v1/autocompchem/health";
pub const TASKS: &str = "/api/v1/autocompchem/tasks";
pub const CAPABILITIES: &str = "/api/v1/autocompchem/capabilities";
pub const SOFTWARE: &str = "/api/v1/compchem/software";
pub const JOB_EVALUATE: &str = "/api/v1/compchem/job/evaluate";
pub const JOB_EVALUATION_INFO: &str = "/api/v1/compchem/job/evaluation";
pub const MOLECULE_FORMATS: &str = "/api/v1/molecules/formats";

/// Task that builds a 3D structure from a SMILES string.
pub const SMILES_TASK: &str = "createMoleculeFromSMILES";

pub fn task_help(task_name: &str) -> String {
    format!("{TASKS}/{task_name}/help")
}

pub fn task_execute(task_name: &str) -> String {
    format!("{TASKS}/{task_name}/execute")
}

/// Input-file generation for one software package (`gaussian`, `orca`, ...).
pub fn software_input(software: &str) -> String {
    format!("{SOFTWARE}/{software}/input")
}

/// Output-file parsing for one software package.
pub fn software_output(software: &str) -> String {
    format!("{SOFTWARE}/{software}/output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_paths() {
        assert_eq!(
            task_help("readGaussianOutput"),
            "/api/v1/autocompchem/tasks/readGaussianOutput/help"
        );
        assert_eq!(
            task_execute(SMILES_TASK),
            "/api/v1/autocompchem/tasks/createMoleculeFromSMILES/execute"
        );
    }

    #[test]
    fn test_software_paths() {
        assert_eq!(software_input("orca"), "/api/v1/compchem/software/orca/input");
        assert_eq!(software_output("xtb"), "/api/v1/compchem/software/xtb/output");
    }
}
