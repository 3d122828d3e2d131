//! palette-match MCP (Model Context Protocol) server
//!
//! Standalone MCP server binary that exposes dominant-color extraction and
//! palette matching over JSON-RPC on stdio. The palette catalog is loaded
//! once at startup from the first command-line argument or the
//! `PALETTE_CATALOG` environment variable.

use palette_match::{AnalysisOptions, Catalog, analyze_file, load_catalog};
use serde_json::{Value, json};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Largest `num_colors` the tool accepts.
const MAX_NUM_COLORS: u64 = 32;

/// MCP Request structure. Requests without an `id` are notifications.
#[derive(Debug, serde::Deserialize)]
struct McpRequest {
    #[serde(default)]
    #[allow(dead_code)]
    jsonrpc: String,
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, serde::Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// MCP Response structure
#[derive(Debug, serde::Serialize)]
struct McpResponse {
    jsonrpc: String,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, serde::Serialize)]
struct McpError {
    code: i32,
    message: String,
}

impl McpResponse {
    fn ok(id: Value, result: Value) -> Self {
        McpResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn err(id: Value, code: i32, message: String) -> Self {
        McpResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError { code, message }),
        }
    }
}

struct PaletteMatchMcpServer {
    catalog: Catalog,
}

impl PaletteMatchMcpServer {
    fn handle_initialize(&self, _params: Value, id: Value) -> McpResponse {
        McpResponse::ok(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "serverInfo": {
                    "name": "palette-match",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "capabilities": {
                    "tools": {
                        "listChanged": false
                    }
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> McpResponse {
        McpResponse::ok(
            id,
            json!({
                "tools": [
                    {
                        "name": "match_image_palettes",
                        "description": "Extract the dominant colors of a raster image (PNG, JPEG, etc.) with k-means clustering and rank the loaded palette catalog by perceptual (CIE Lab) similarity to them.",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "input_path": {
                                    "type": "string",
                                    "description": "Path to the input image file"
                                },
                                "num_colors": {
                                    "type": "integer",
                                    "description": "Number of dominant colors to extract (1-32, default: 5)",
                                    "minimum": 1,
                                    "maximum": 32,
                                    "default": 5
                                },
                                "top_n": {
                                    "type": "integer",
                                    "description": "Number of similar palettes to return (default: 8)",
                                    "minimum": 0,
                                    "default": 8
                                },
                                "seed": {
                                    "type": "integer",
                                    "description": "Random seed for reproducible results",
                                    "minimum": 0
                                }
                            },
                            "required": ["input_path"]
                        }
                    }
                ]
            }),
        )
    }

    fn handle_tools_call(&self, params: ToolCallParams, id: Value) -> McpResponse {
        if params.name != "match_image_palettes" {
            return McpResponse::err(id, -32601, format!("Unknown tool: {}", params.name));
        }

        let args = match params.arguments {
            Value::Object(map) => map,
            _ => {
                return McpResponse::err(
                    id,
                    -32602,
                    "Invalid arguments: expected object".to_string(),
                );
            }
        };

        let Some(input) = args.get("input_path").and_then(|v| v.as_str()) else {
            return McpResponse::err(
                id,
                -32602,
                "Missing required parameter: input_path".to_string(),
            );
        };

        let defaults = AnalysisOptions::default();
        let num_colors = match args.get("num_colors") {
            None => defaults.num_colors,
            Some(v) => match v.as_u64() {
                Some(n) if (1..=MAX_NUM_COLORS).contains(&n) => n as usize,
                _ => {
                    return McpResponse::err(
                        id,
                        -32602,
                        format!("Invalid num_colors: expected an integer from 1 to {}", MAX_NUM_COLORS),
                    );
                }
            },
        };
        let options = AnalysisOptions {
            num_colors,
            top_n: args
                .get("top_n")
                .and_then(|v| v.as_u64())
                .map_or(defaults.top_n, |n| n as usize),
            seed: args.get("seed").and_then(|v| v.as_u64()),
            ..defaults
        };

        match analyze_file(Path::new(input), &self.catalog, &options) {
            Ok(result) => {
                let structured = match serde_json::to_value(&result) {
                    Ok(v) => v,
                    Err(e) => {
                        return McpResponse::err(id, -32000, format!("Serialization failed: {}", e));
                    }
                };
                McpResponse::ok(
                    id,
                    json!({
                        "content": [
                            {
                                "type": "text",
                                "text": result.to_text()
                            }
                        ],
                        "structuredContent": structured
                    }),
                )
            }
            Err(e) => McpResponse::err(id, -32000, format!("Analysis failed: {}", e)),
        }
    }

    /// Answer one request line. Notifications get no reply.
    fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let req = match serde_json::from_str::<McpRequest>(line) {
            Ok(req) => req,
            Err(e) => {
                let code = if e.is_syntax() || e.is_eof() { -32700 } else { -32600 };
                return Some(McpResponse::err(Value::Null, code, format!("Invalid request: {}", e)));
            }
        };

        let Some(id) = req.id else {
            log::debug!("notification {}", req.method);
            return None;
        };

        let response = match req.method.as_str() {
            "initialize" => self.handle_initialize(req.params, id),
            "ping" => McpResponse::ok(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => match serde_json::from_value::<ToolCallParams>(req.params) {
                Ok(params) => self.handle_tools_call(params, id),
                Err(e) => McpResponse::err(id, -32602, format!("Invalid params: {}", e)),
            },
            other => McpResponse::err(id, -32601, format!("Method not found: {}", other)),
        };
        Some(response)
    }

    fn run(&self) {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut stdout_lock = stdout.lock();

        for line in stdin.lock().lines() {
            let Ok(json_str) = line else { break };
            if json_str.trim().is_empty() {
                continue;
            }
            let Some(response) = self.handle_line(&json_str) else {
                continue;
            };

            if let Ok(response_json) = serde_json::to_string(&response) {
                writeln!(stdout_lock, "{}", response_json).ok();
                stdout_lock.flush().ok();
            }
        }
    }
}

fn catalog_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("PALETTE_CATALOG").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("palettes.json"))
}

fn main() {
    env_logger::init();

    let catalog = match load_catalog(&catalog_path()) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let server = PaletteMatchMcpServer { catalog };
    server.run();
}
