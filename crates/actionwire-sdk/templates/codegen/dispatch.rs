// Code generated by actionwire. DO NOT EDIT.

use {{ runtime }}::axum::response::{IntoResponse, Response};
use {{ runtime }}::axum::routing::post;
use {{ runtime }}::axum::{Json, Router};
use {{ runtime }}::{DispatchError, Envelope};

/// Decode the envelope's arguments, call the named action, and encode its result.
pub async fn dispatch(
    envelope: &Envelope,
) -> Result<{{ runtime }}::serde_json::Value, DispatchError> {
    match envelope.function() {
{%- for route in routes %}
{%- if let Some(action) = route.action() %}
{%- for line in action.comment %}
        {{ line }}
{%- endfor %}
        {{ action.key }} => {{ action.call }},
{%- else %}
        unknown => Err(DispatchError::UnknownRoute(unknown.to_owned())),
{%- endif %}
{%- endfor %}
    }
}

/// HTTP handler for the action endpoint.
pub async fn action_handler(Json(envelope): Json<Envelope>) -> Response {
    match dispatch(&envelope).await {
        Ok(value) => Json(value).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Router serving every action at {{ route_doc }}.
pub fn router() -> Router {
    Router::new().route({{ route_literal }}, post(action_handler))
}
