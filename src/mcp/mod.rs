//! MCP (Model Context Protocol) server over stdio.
//!
//! Exposes tools: check_benfords_law, benford_distribution.

use crate::config::validate_threshold;
use crate::input::NUMBERS_FIELD;
use crate::{benford_table, BenfordAnalyzer, ValidationError, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};

/// MCP JSON-RPC request
#[derive(Debug, Deserialize, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: Option<String>,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// MCP JSON-RPC response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC "method not found"
pub const METHOD_NOT_FOUND: i32 = -32601;

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// Tool definition for MCP tools/list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolDef {
    name: &'static str,
    description: &'static str,
    input_schema: InputSchema,
}

#[derive(Debug, Serialize)]
struct InputSchema {
    #[serde(rename = "type")]
    typ: &'static str,
    properties: Value,
    required: Vec<&'static str>,
}

/// Failure of a single tool call
#[derive(Debug)]
enum ToolError {
    Validation(ValidationError),
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ToolError {
    fn from(e: anyhow::Error) -> Self {
        ToolError::Other(e)
    }
}

fn tool_definitions() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "check_benfords_law",
            description: "Check whether a list of positive integers conforms to Benford's Law",
            input_schema: InputSchema {
                typ: "object",
                properties: serde_json::json!({
                    "numbers": {
                        "type": "array",
                        "items": { "type": "integer", "minimum": 1 },
                        "description": "Positive integers to analyze"
                    },
                    "threshold": {
                        "type": "number",
                        "description": format!("Maximum per-digit probability difference (default {})", DEFAULT_THRESHOLD)
                    }
                }),
                required: vec!["numbers"],
            },
        },
        ToolDef {
            name: "benford_distribution",
            description: "Return the expected leading-digit probabilities log10(1 + 1/d)",
            input_schema: InputSchema {
                typ: "object",
                properties: serde_json::json!({}),
                required: vec![],
            },
        },
    ]
}

/// Handle a single JSON-RPC request and return a response.
pub fn handle_request(req: &JsonRpcRequest) -> JsonRpcResponse {
    let id = req.id.clone();
    let result = match req.method.as_str() {
        "initialize" => Some(serde_json::json!({
            "protocolVersion": "2024-11-05",
            "capabilities": { "tools": {} },
            "serverInfo": { "name": "benford", "version": env!("CARGO_PKG_VERSION") }
        })),
        "tools/list" => Some(serde_json::json!({ "tools": tool_definitions() })),
        "tools/call" => {
            let (name, args) = req
                .params
                .as_ref()
                .and_then(|p| p.get("params").or(Some(p)))
                .map(|p| {
                    let name = p.get("name").and_then(|n| n.as_str()).unwrap_or("");
                    let args = p
                        .get("arguments")
                        .and_then(|a| a.as_object())
                        .cloned()
                        .unwrap_or_default();
                    (name, args)
                })
                .unwrap_or(("", serde_json::Map::new()));

            tracing::debug!(tool = name, "tools/call");
            let result = match name {
                "check_benfords_law" => run_check(&args),
                "benford_distribution" => Ok(serde_json::json!({
                    "benfords_distribution": benford_table()
                })),
                _ => Err(ToolError::Other(anyhow::anyhow!("Unknown tool: {}", name))),
            };

            Some(match result {
                Ok(val) => serde_json::json!({
                    "content": [{ "type": "text", "text": serde_json::to_string(&val).unwrap_or_else(|_| "{}".to_string()) }]
                }),
                Err(ToolError::Validation(e)) => serde_json::json!({
                    "content": [{ "type": "text", "text": format!("Error: {}", e) }],
                    "isError": true,
                    "errorCode": e.code()
                }),
                Err(ToolError::Other(e)) => serde_json::json!({
                    "content": [{ "type": "text", "text": format!("Error: {}", e) }],
                    "isError": true
                }),
            })
        }
        method => {
            tracing::debug!(method, "unknown method");
            return JsonRpcResponse {
                jsonrpc: "2.0",
                id,
                result: None,
                error: Some(JsonRpcError {
                    code: METHOD_NOT_FOUND,
                    message: format!("Method not found: {}", method),
                }),
            };
        }
    };

    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result,
        error: None,
    }
}

/// Run the MCP server loop (stdin / stdout).
pub fn run_mcp_server() -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let reader = BufReader::new(stdin.lock());

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let req: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unparsable request");
                continue;
            }
        };

        let response = handle_request(&req);
        // Notifications carry no id and get no reply
        if req.id.is_none() {
            continue;
        }
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn run_check(args: &serde_json::Map<String, Value>) -> Result<Value, ToolError> {
    let analyzer = match args.get("threshold") {
        None | Some(Value::Null) => BenfordAnalyzer::new(),
        Some(t) => {
            let threshold = t
                .as_f64()
                .ok_or_else(|| anyhow::anyhow!("threshold must be a number"))?;
            BenfordAnalyzer::new().with_threshold(validate_threshold(threshold)?)
        }
    };

    let numbers = args.get(NUMBERS_FIELD).unwrap_or(&Value::Null);
    let verdict = analyzer.check(numbers).map_err(ToolError::Validation)?;
    serde_json::to_value(&verdict).map_err(|e| ToolError::Other(e.into()))
}
