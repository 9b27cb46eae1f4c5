use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Request body posted by every client binding: `{ "fn": <action>, "args": <request> }`.
///
/// `args` stays raw until the action is known, so it is decoded exactly once, straight
/// into that action's request type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "fn")]
    function: String,
    args: Box<RawValue>,
}

impl Envelope {
    pub fn new(function: impl Into<String>, args: Box<RawValue>) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }

    /// Build an envelope by serializing `args`.
    pub fn from_args<T: Serialize>(
        function: impl Into<String>,
        args: &T,
    ) -> Result<Self, serde_json::Error> {
        let raw = serde_json::value::to_raw_value(args)?;
        Ok(Self::new(function, raw))
    }

    /// Name of the action to invoke.
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &RawValue {
        &self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_wire_shape() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"fn":"get_user","args":{"ID": 7}}"#).unwrap();
        assert_eq!(envelope.function(), "get_user");
        assert_eq!(envelope.args().get(), r#"{"ID": 7}"#);

        let encoded = serde_json::to_string(&envelope).unwrap();
        assert_eq!(encoded, r#"{"fn":"get_user","args":{"ID": 7}}"#);
    }

    #[test]
    fn test_envelope_requires_both_fields() {
        assert!(serde_json::from_str::<Envelope>(r#"{"fn":"ping"}"#).is_err());
        assert!(serde_json::from_str::<Envelope>(r#"{"args":1}"#).is_err());
    }

    #[test]
    fn test_from_args() {
        let envelope = Envelope::from_args("ping", &"hello").unwrap();
        assert_eq!(envelope.args().get(), "\"hello\"");
    }
}
