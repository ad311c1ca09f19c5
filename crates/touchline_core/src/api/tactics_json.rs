//! JSON API for tactic resolution
//!
//! String-in/string-out entry points for the dashboard backend. Every call
//! returns an `ApiResponse` envelope; errors are reported in the envelope,
//! never by panicking.

use crate::error::TacticsError;
use crate::library::{TacticLibrary, VisibleTactic};
use crate::resolve::{IgnoredOverride, ResolvedPosition};
use crate::tactic::Scope;
use chrono::{DateTime, Utc};
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, warn};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

/// Structured API error with codes and details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn from_tactics_error(error: &TacticsError) -> Self {
        let mut details = HashMap::new();
        match error {
            TacticsError::PositionOutOfRange { layer, index, squad_size } => {
                details.insert("layer".to_string(), serde_json::json!(layer));
                details.insert("index".to_string(), serde_json::json!(index));
                details.insert("squad_size".to_string(), serde_json::json!(squad_size));
            }
            TacticsError::CircularInheritance { cycle_path } => {
                details.insert("cycle_path".to_string(), serde_json::json!(cycle_path));
            }
            TacticsError::FormationNotFound { id } | TacticsError::TacticNotFound { id } => {
                details.insert("id".to_string(), serde_json::json!(id));
            }
            _ => {}
        }

        Self {
            code: error.kind().code().to_string(),
            message: error.to_string(),
            details: if details.is_empty() { None } else { Some(details) },
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Resolve one tactic
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResolveTacticRequest {
    pub schema_version: Option<String>,
    pub tactic_id: String,
    /// Include the SHA-256 fingerprint of the resolved positions
    #[serde(default)]
    pub include_fingerprint: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveTacticResponse {
    pub tactic_id: String,
    pub tactic_name: String,
    pub formation_id: String,
    pub chain: Vec<String>,
    pub positions: Vec<ResolvedPosition>,
    #[serde(default)]
    pub principles: Vec<PrincipleHighlight>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<IgnoredOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Principle with the indices to highlight when it is selected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipleHighlight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub positions: Vec<usize>,
}

/// Resolve a bare formation
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResolveFormationRequest {
    pub schema_version: Option<String>,
    pub formation_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveFormationResponse {
    pub formation_id: String,
    pub name: String,
    pub squad_size: usize,
    pub positions: Vec<ResolvedPosition>,
}

/// List tactics visible at a scope
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListTacticsRequest {
    pub schema_version: Option<String>,
    pub scope: Scope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTacticsResponse {
    pub scope: Scope,
    pub tactics: Vec<VisibleTactic>,
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| "{}".to_string())
}

fn parse_request<R: DeserializeOwned, T>(
    request_json: &str,
    name: &str,
) -> std::result::Result<R, ApiResponse<T>> {
    serde_json::from_str(request_json).map_err(|e| {
        error!("Failed to parse {}: {}", name, e);
        ApiResponse::error(ApiError::new("INVALID_REQUEST", &format!("Invalid JSON format: {}", e)))
    })
}

fn check_schema_version(version: Option<&str>) -> std::result::Result<(), ApiError> {
    match version {
        None => Ok(()),
        Some(v) if v == API_VERSION => Ok(()),
        Some(v) => Err(ApiError::new(
            "INVALID_REQUEST",
            &format!("Unsupported schema_version '{}', expected '{}'", v, API_VERSION),
        )),
    }
}

/// Resolve a tactic from a JSON `ResolveTacticRequest`
///
/// # Returns
/// JSON string containing `ApiResponse<ResolveTacticResponse>`
pub fn resolve_tactic_json(library: &TacticLibrary, request_json: &str) -> String {
    let request: ResolveTacticRequest = match parse_request(request_json, "ResolveTacticRequest") {
        Ok(req) => req,
        Err(response) => return to_json::<ResolveTacticResponse>(&response),
    };
    if let Err(error) = check_schema_version(request.schema_version.as_deref()) {
        return to_json(&ApiResponse::<ResolveTacticResponse>::error(error));
    }

    info!(tactic_id = %request.tactic_id, "Processing resolve tactic request");

    let resolved = match library.resolver().resolve_tactic(&request.tactic_id) {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!("Failed to resolve tactic {}: {}", request.tactic_id, e);
            let response: ApiResponse<ResolveTacticResponse> =
                ApiResponse::error(ApiError::from_tactics_error(&e));
            return to_json(&response);
        }
    };

    let fingerprint = if request.include_fingerprint {
        match resolved.fingerprint() {
            Ok(f) => Some(f),
            Err(e) => {
                let response: ApiResponse<ResolveTacticResponse> =
                    ApiResponse::error(ApiError::from_tactics_error(&e));
                return to_json(&response);
            }
        }
    } else {
        None
    };

    let squad_size = resolved.positions.len();
    let principles = resolved
        .principles
        .iter()
        .map(|p| PrincipleHighlight {
            id: p.id.clone(),
            title: p.title.clone(),
            description: p.description.clone(),
            positions: p.highlighted_positions(squad_size),
        })
        .collect();

    to_json(&ApiResponse::success(ResolveTacticResponse {
        tactic_id: resolved.tactic_id,
        tactic_name: resolved.tactic_name,
        formation_id: resolved.formation_id,
        chain: resolved.chain,
        positions: resolved.positions,
        principles,
        ignored: resolved.ignored,
        fingerprint,
    }))
}

/// Resolve a formation with no overrides from a JSON `ResolveFormationRequest`
pub fn resolve_formation_json(library: &TacticLibrary, request_json: &str) -> String {
    let request: ResolveFormationRequest =
        match parse_request(request_json, "ResolveFormationRequest") {
            Ok(req) => req,
            Err(response) => return to_json::<ResolveFormationResponse>(&response),
        };
    if let Err(error) = check_schema_version(request.schema_version.as_deref()) {
        return to_json(&ApiResponse::<ResolveFormationResponse>::error(error));
    }

    let result = library.resolver().resolve_formation(&request.formation_id).and_then(|positions| {
        let formation = library.get_formation(&request.formation_id).ok_or_else(|| {
            TacticsError::FormationNotFound { id: request.formation_id.clone() }
        })?;
        Ok(ResolveFormationResponse {
            formation_id: formation.id.clone(),
            name: formation.name.clone(),
            squad_size: formation.squad_size,
            positions,
        })
    });

    match result {
        Ok(data) => to_json(&ApiResponse::success(data)),
        Err(e) => {
            warn!("Failed to resolve formation {}: {}", request.formation_id, e);
            to_json(&ApiResponse::<ResolveFormationResponse>::error(ApiError::from_tactics_error(&e)))
        }
    }
}

/// List the tactics visible at a scope from a JSON `ListTacticsRequest`
pub fn list_tactics_json(library: &TacticLibrary, request_json: &str) -> String {
    let request: ListTacticsRequest = match parse_request(request_json, "ListTacticsRequest") {
        Ok(req) => req,
        Err(response) => return to_json::<ListTacticsResponse>(&response),
    };
    if let Err(error) = check_schema_version(request.schema_version.as_deref()) {
        return to_json(&ApiResponse::<ListTacticsResponse>::error(error));
    }

    let tactics = library.tactics_visible_to(&request.scope);
    info!(scope = %request.scope, count = tactics.len(), "Listed visible tactics");
    to_json(&ApiResponse::success(ListTacticsResponse { scope: request.scope, tactics }))
}

/// JSON schema for `ResolveTacticRequest`
pub fn request_schema_json() -> String {
    let schema = schema_for!(ResolveTacticRequest);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}

/// JSON schema for `ListTacticsRequest`
pub fn list_request_schema_json() -> String {
    let schema = schema_for!(ListTacticsRequest);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}
