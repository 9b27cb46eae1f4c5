use std::fmt::Display;
use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{DispatchError, Envelope};

/// Decode `envelope`'s arguments, run `action`, and encode its response.
pub fn invoke<Req, Res, E, F>(envelope: &Envelope, action: F) -> Result<Value, DispatchError>
where
    Req: DeserializeOwned,
    Res: Serialize,
    E: Display,
    F: FnOnce(Req) -> Result<Res, E>,
{
    let request = decode(envelope)?;
    let response = action(request).map_err(|e| failed(envelope, e))?;
    encode(envelope, &response)
}

/// [`invoke`] for `async` actions.
pub async fn invoke_async<Req, Res, E, F, Fut>(
    envelope: &Envelope,
    action: F,
) -> Result<Value, DispatchError>
where
    Req: DeserializeOwned,
    Res: Serialize,
    E: Display,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = Result<Res, E>>,
{
    let request = decode(envelope)?;
    let response = action(request).await.map_err(|e| failed(envelope, e))?;
    encode(envelope, &response)
}

fn decode<Req: DeserializeOwned>(envelope: &Envelope) -> Result<Req, DispatchError> {
    tracing::debug!(function = envelope.function(), "Dispatching action");
    serde_json::from_str(envelope.args().get()).map_err(|source| DispatchError::Decode {
        function: envelope.function().to_owned(),
        source,
    })
}

fn encode<Res: Serialize>(envelope: &Envelope, response: &Res) -> Result<Value, DispatchError> {
    serde_json::to_value(response).map_err(|source| DispatchError::Encode {
        function: envelope.function().to_owned(),
        source,
    })
}

fn failed(envelope: &Envelope, error: impl Display) -> DispatchError {
    DispatchError::Implementation {
        function: envelope.function().to_owned(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[allow(non_snake_case)]
    struct GetUserRequest {
        ID: i64,
    }

    #[derive(Debug, Serialize)]
    #[allow(non_snake_case)]
    struct GetUserResponse {
        Name: String,
        Age: i32,
    }

    fn get_user(req: GetUserRequest) -> Result<GetUserResponse, String> {
        if req.ID == 7 {
            Ok(GetUserResponse {
                Name: "Ada".into(),
                Age: 36,
            })
        } else {
            Err(format!("user {} not found", req.ID))
        }
    }

    async fn count(req: String) -> usize {
        req.len()
    }

    fn envelope(function: &str, args: &str) -> Envelope {
        serde_json::from_str(&format!(r#"{{"fn":"{function}","args":{args}}}"#)).unwrap()
    }

    #[test]
    fn test_invoke_round_trip() {
        let value = invoke(&envelope("get_user", r#"{"ID":7}"#), get_user).unwrap();
        assert_eq!(value, json!({"Name": "Ada", "Age": 36}));
    }

    #[test]
    fn test_invoke_decode_failure() {
        let err = invoke(&envelope("get_user", r#"{"ID":"seven"}"#), get_user).unwrap_err();
        assert!(matches!(err, DispatchError::Decode { .. }));
        assert!(err.to_string().starts_with("invalid arguments for 'get_user'"));
    }

    #[test]
    fn test_invoke_implementation_failure() {
        let err = invoke(&envelope("get_user", r#"{"ID":1}"#), get_user).unwrap_err();
        assert_eq!(err.to_string(), "action 'get_user' failed: user 1 not found");
    }

    #[test]
    fn test_invoke_infallible_scalar() {
        let value = invoke(&envelope("double", "21"), |req: u64| {
            Ok::<_, Infallible>(req * 2)
        })
        .unwrap();
        assert_eq!(value, json!(42));
    }

    #[tokio::test]
    async fn test_invoke_async() {
        let value = invoke_async(&envelope("count", r#""four""#), |req: String| async move {
            Ok::<_, Infallible>(count(req).await)
        })
        .await
        .unwrap();
        assert_eq!(value, json!(4));
    }

    #[tokio::test]
    async fn test_invoke_async_decode_failure() {
        let err = invoke_async(&envelope("count", "null"), |req: String| async move {
            Ok::<_, Infallible>(count(req).await)
        })
        .await
        .unwrap_err();
        assert_eq!(err.status().as_u16(), 400);
    }
}
