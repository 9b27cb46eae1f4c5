// Code generated by actionwire. DO NOT EDIT.

use actionwire_runtime::axum::response::{IntoResponse, Response};
use actionwire_runtime::axum::routing::post;
use actionwire_runtime::axum::{Json, Router};
use actionwire_runtime::{DispatchError, Envelope};

/// Decode the envelope's arguments, call the named action, and encode its result.
pub async fn dispatch(
    envelope: &Envelope,
) -> Result<actionwire_runtime::serde_json::Value, DispatchError> {
    match envelope.function() {
        "find_user" => actionwire_runtime::invoke_async(envelope, |req: crate::actions::users::GetUserRequest| crate::actions::users::find_user(req)).await,
        // Look up a user by id.
        "get_user" => actionwire_runtime::invoke(envelope, |req: crate::actions::users::GetUserRequest| crate::actions::users::get_user(req)),
        // Echo the input back.
        "type" => actionwire_runtime::invoke(envelope, |req: String| {
            Ok::<_, std::convert::Infallible>(crate::actions::health::r#type(req))
        }),
        "uptime" => actionwire_runtime::invoke_async(envelope, |req: bool| async move {
            Ok::<_, std::convert::Infallible>(crate::actions::health::uptime(req).await)
        })
        .await,
        unknown => Err(DispatchError::UnknownRoute(unknown.to_owned())),
    }
}

/// HTTP handler for the action endpoint.
pub async fn action_handler(Json(envelope): Json<Envelope>) -> Response {
    match dispatch(&envelope).await {
        Ok(value) => Json(value).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Router serving every action at `/api/actions`.
pub fn router() -> Router {
    Router::new().route("/api/actions", post(action_handler))
}
