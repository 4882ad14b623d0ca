use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::generation::parameters::{GalaxyParameters, hex_color};
use crate::engine::generation::random_source::GalaxyRng;
use crate::engine::systems::fps_tracking::current_fps;
use crate::engine::systems::regeneration::{
    CommitSource, GalaxyParametersCommitted, GalaxyRegenerationOutcome,
};
use crate::tools::parameter_edit::{
    GalaxyParameterField, ParameterEditError, ParameterValue, apply_parameter_edit,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between React and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to React frontend without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to React frontend.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    forward_regeneration_outcomes,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from React frontend.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Mutable galaxy state a request may touch.
pub struct GalaxyRpcContext<'a> {
    pub params: &'a mut GalaxyParameters,
    pub rng: &'a mut GalaxyRng,
    pub fps: Option<f64>,
    /// Set by handlers that want the galaxy rebuilt after this request.
    pub commit_requested: bool,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut params: ResMut<GalaxyParameters>,
    mut rng: ResMut<GalaxyRng>,
    mut commits: EventWriter<GalaxyParametersCommitted>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let mut context = GalaxyRpcContext {
                    params: &mut params,
                    rng: &mut rng,
                    fps: current_fps(&diagnostics),
                    commit_requested: false,
                };

                let response = handle_rpc_request(&request, &mut context);

                if context.commit_requested {
                    commits.write(GalaxyParametersCommitted {
                        source: CommitSource::Rpc,
                    });
                }
                if let Some(response) = response {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
                rpc_interface.queue_response(create_error_response(
                    serde_json::Value::Null,
                    -32700,
                    "Parse error",
                    Some(serde_json::json!({"message": parse_error.to_string()})),
                ));
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
///
/// Notifications (no ID) are executed but never answered.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &mut GalaxyRpcContext<'_>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_galaxy_parameters" => handle_get_galaxy_parameters(context),
        "set_galaxy_parameter" => handle_set_galaxy_parameter(&request.params, context),
        "regenerate_galaxy" => handle_regenerate_galaxy(&request.params, context),
        "get_fps" => handle_get_fps(context),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Current parameters, slider ranges and seed.
fn handle_get_galaxy_parameters(
    context: &GalaxyRpcContext<'_>,
) -> Result<serde_json::Value, RpcError> {
    let parameters = serde_json::to_value(&*context.params)
        .map_err(|e| RpcError::internal_error(&e.to_string()))?;

    let ranges: serde_json::Map<String, serde_json::Value> = GalaxyParameterField::ALL
        .iter()
        .filter_map(|field| {
            field.range().map(|range| {
                (
                    field.to_string().to_string(),
                    serde_json::json!({
                        "min": range.min,
                        "max": range.max,
                        "step": range.step
                    }),
                )
            })
        })
        .collect();

    Ok(serde_json::json!({
        "parameters": parameters,
        "ranges": ranges,
        "seed": context.rng.seed()
    }))
}

/// Edit one parameter. `commit` defaults to true; frontends streaming slider
/// drags send `false` until the drag ends.
fn handle_set_galaxy_parameter(
    params: &serde_json::Value,
    context: &mut GalaxyRpcContext<'_>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct SetParameterParams {
        field: String,
        value: serde_json::Value,
        #[serde(default = "commit_by_default")]
        commit: bool,
    }

    fn commit_by_default() -> bool {
        true
    }

    let set_params = serde_json::from_value::<SetParameterParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'field' and 'value' parameters"))?;

    let field = GalaxyParameterField::from_string(&set_params.field)
        .ok_or_else(|| ParameterEditError::UnknownField(set_params.field.clone()))?;

    let value = match &set_params.value {
        serde_json::Value::Number(number) => number.as_f64().map(ParameterValue::Number),
        serde_json::Value::String(raw) => Some(ParameterValue::Color(
            hex_color::parse(raw).map_err(|e| RpcError::invalid_params(&e))?,
        )),
        _ => None,
    }
    .ok_or_else(|| RpcError::invalid_params("Expected a number or a '#rrggbb' string"))?;

    let stored = apply_parameter_edit(context.params, field, value)?;
    if set_params.commit {
        context.commit_requested = true;
    }

    info!(
        "RPC set {} = {} (commit: {})",
        field.to_string(),
        stored.to_json(),
        set_params.commit
    );

    Ok(serde_json::json!({
        "field": field.to_string(),
        "value": stored.to_json(),
        "committed": set_params.commit
    }))
}

/// Request a rebuild, optionally restarting the generator from `seed`.
fn handle_regenerate_galaxy(
    params: &serde_json::Value,
    context: &mut GalaxyRpcContext<'_>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize, Default)]
    struct RegenerateParams {
        seed: Option<u64>,
    }

    let regenerate_params = if params.is_null() {
        RegenerateParams::default()
    } else {
        serde_json::from_value::<RegenerateParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected optional unsigned 'seed'"))?
    };

    if regenerate_params.seed.is_some() {
        context.rng.reseed(regenerate_params.seed);
    }
    context.commit_requested = true;

    Ok(serde_json::json!({
        "queued": true,
        "seed": context.rng.seed()
    }))
}

fn handle_get_fps(context: &GalaxyRpcContext<'_>) -> Result<serde_json::Value, RpcError> {
    let fps = context.fps.unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Relay regeneration results to the frontend.
fn forward_regeneration_outcomes(
    mut outcomes: EventReader<GalaxyRegenerationOutcome>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for outcome in outcomes.read() {
        let (method, params) = outcome_notification(outcome);
        rpc_interface.send_notification(method, params);
    }
}

pub fn outcome_notification(outcome: &GalaxyRegenerationOutcome) -> (&'static str, serde_json::Value) {
    match outcome {
        GalaxyRegenerationOutcome::Regenerated {
            point_count,
            regeneration,
            source,
        } => (
            "galaxy_regenerated",
            serde_json::json!({
                "point_count": point_count,
                "regeneration": regeneration,
                "source": source.as_str()
            }),
        ),
        GalaxyRegenerationOutcome::Failed { error, source } => (
            "galaxy_regeneration_failed",
            serde_json::json!({
                "field": error.field(),
                "message": error.to_string(),
                "source": source.as_str()
            }),
        ),
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to React frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (React frontend).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

impl From<ParameterEditError> for RpcError {
    fn from(error: ParameterEditError) -> Self {
        let field = match &error {
            ParameterEditError::UnknownField(name) => serde_json::json!(name),
            ParameterEditError::WrongValueType { field, .. } => serde_json::json!(field),
            ParameterEditError::Invalid(invalid) => serde_json::json!(invalid.field()),
        };
        Self {
            code: -32602,
            message: error.to_string(),
            data: Some(serde_json::json!({ "field": field })),
        }
    }
}
