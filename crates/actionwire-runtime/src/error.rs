use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Coarse classification of a [`DispatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchErrorKind {
    UnknownRoute,
    Decode,
    Implementation,
    Encode,
}

/// Why a dispatched envelope produced no result.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No action is registered under the requested name.
    #[error("unknown action '{0}'")]
    UnknownRoute(String),

    /// `args` did not deserialize into the action's request type.
    #[error("invalid arguments for '{function}': {source}")]
    Decode {
        function: String,
        source: serde_json::Error,
    },

    /// The action itself returned an error.
    #[error("action '{function}' failed: {message}")]
    Implementation { function: String, message: String },

    /// The action's result could not be serialized.
    #[error("failed to encode result of '{function}': {source}")]
    Encode {
        function: String,
        source: serde_json::Error,
    },
}

impl DispatchError {
    pub fn kind(&self) -> DispatchErrorKind {
        match self {
            DispatchError::UnknownRoute(_) => DispatchErrorKind::UnknownRoute,
            DispatchError::Decode { .. } => DispatchErrorKind::Decode,
            DispatchError::Implementation { .. } => DispatchErrorKind::Implementation,
            DispatchError::Encode { .. } => DispatchErrorKind::Encode,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            DispatchErrorKind::UnknownRoute => StatusCode::NOT_FOUND,
            DispatchErrorKind::Decode => StatusCode::BAD_REQUEST,
            DispatchErrorKind::Implementation | DispatchErrorKind::Encode => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Action name the error concerns.
    pub fn function(&self) -> &str {
        match self {
            DispatchError::UnknownRoute(function)
            | DispatchError::Decode { function, .. }
            | DispatchError::Implementation { function, .. }
            | DispatchError::Encode { function, .. } => function,
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(
                function = self.function(),
                kind = ?self.kind(),
                error = %self,
                "Action dispatch failed"
            );
        } else {
            tracing::warn!(
                function = self.function(),
                kind = ?self.kind(),
                error = %self,
                "Rejected action request"
            );
        }
        (status, self.to_string()).into_response()
    }
}
