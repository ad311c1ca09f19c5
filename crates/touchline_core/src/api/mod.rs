pub mod tactics_json;

pub use tactics_json::{
    list_request_schema_json, list_tactics_json, request_schema_json, resolve_formation_json,
    resolve_tactic_json, ApiError, ApiResponse, ListTacticsRequest, ListTacticsResponse,
    PrincipleHighlight, ResolveFormationRequest, ResolveFormationResponse, ResolveTacticRequest,
    ResolveTacticResponse, API_VERSION,
};
