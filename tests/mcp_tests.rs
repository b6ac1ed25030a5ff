mod common;

use std::collections::HashSet;
use std::sync::Arc;

use autocompchem_mcp::AutoCompChemServer;
use common::MockApi;
use rmcp::model::{CallToolRequestParam, RawContent};
use rmcp::ServiceExt;
use serde_json::json;

const TOOL_NAMES: [&str; 14] = [
    "get_api_info",
    "list_available_tasks",
    "get_task_help",
    "execute_task",
    "get_supported_software",
    "generate_input_file",
    "read_output_file",
    "evaluate_job",
    "create_molecule_from_smiles",
    "optimize_geometry",
    "calculate_frequencies",
    "get_worker_capabilities",
    "get_job_evaluation_info",
    "get_supported_formats",
];

#[tokio::test]
async fn test_tools_over_mcp() {
    let api = MockApi::new().json(
        "/api/v1/compchem/job/evaluate",
        json!({"verdict": "normal termination"}),
    );
    let server = AutoCompChemServer::new(Arc::new(api.clone()));
    let (client_transport, server_transport) = tokio::io::duplex(4096);

    tokio::spawn(async move {
        let service = server
            .serve(server_transport)
            .await
            .expect("Failed to start server");
        service.waiting().await.expect("Server error");
    });

    let client = ().serve(client_transport).await.unwrap();

    let tools = client.list_tools(None).await.unwrap();
    let names: HashSet<String> = tools.tools.iter().map(|t| t.name.to_string()).collect();
    let expected: HashSet<String> = TOOL_NAMES.iter().map(|n| n.to_string()).collect();
    assert_eq!(names, expected);

    let result = client
        .call_tool(CallToolRequestParam {
            name: "evaluate_job".into(),
            arguments: json!({"parameters": "{\"OUTFILE\": \"job.log\"}"})
                .as_object()
                .cloned(),
        })
        .await
        .unwrap();

    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        other => panic!("Expected text content, got {other:?}"),
    };
    assert!(text.starts_with("Job evaluation result:\n"));
    assert!(text.contains("normal termination"));
    assert_eq!(api.requests()[0].payload, Some(json!({"OUTFILE": "job.log"})));

    client.cancel().await.unwrap();
}
