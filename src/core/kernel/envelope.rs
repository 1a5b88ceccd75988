use crate::core::errors::ExchangeError;
use serde_json::Value;

/// Names of the envelope fields wrapping every API reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeFields {
    pub success: &'static str,
    pub result: &'static str,
    pub message: &'static str,
}

impl EnvelopeFields {
    pub const fn new(success: &'static str, result: &'static str, message: &'static str) -> Self {
        Self {
            success,
            result,
            message,
        }
    }
}

impl Default for EnvelopeFields {
    fn default() -> Self {
        Self::new("success", "result", "message")
    }
}

/// Validate a raw reply and return its result payload.
///
/// A body that is not JSON, or decodes to nothing, is a protocol failure
/// carrying the raw text. A reply without a result or without a positive
/// success flag is an API rejection carrying the embedded message, or the
/// whole payload when there is none.
pub fn extract_result(raw: &str, fields: &EnvelopeFields) -> Result<Value, ExchangeError> {
    let envelope: Value = serde_json::from_str(raw)
        .map_err(|_| ExchangeError::InvalidResponseFormat(format!("({})", raw)))?;

    if is_empty(&envelope) {
        return Err(ExchangeError::InvalidResponseFormat(format!("({})", raw)));
    }

    let mut object = match envelope {
        Value::Object(object) => object,
        other => return Err(rejection(&other, fields)),
    };

    if !object.contains_key(fields.result) || !is_success(object.get(fields.success)) {
        return Err(rejection(&Value::Object(object), fields));
    }

    Ok(object.remove(fields.result).unwrap_or(Value::Null))
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(object) => object.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn is_success(flag: Option<&Value>) -> bool {
    match flag {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => s == "1" || s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn rejection(payload: &Value, fields: &EnvelopeFields) -> ExchangeError {
    let message = payload
        .get(fields.message)
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty());

    match message {
        Some(message) => ExchangeError::ApiError(message.to_string()),
        None => ExchangeError::ApiError(payload.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> EnvelopeFields {
        EnvelopeFields::default()
    }

    #[test]
    fn test_returns_result_payload() {
        let raw = r#"{"success":true,"message":"","result":[{"Currency":"BTC"}]}"#;
        let result = extract_result(raw, &fields()).unwrap();
        assert_eq!(result, json!([{"Currency": "BTC"}]));
    }

    #[test]
    fn test_null_result_is_valid() {
        let raw = r#"{"success":true,"message":"","result":null}"#;
        assert_eq!(extract_result(raw, &fields()).unwrap(), Value::Null);
    }

    #[test]
    fn test_unparsable_body_is_protocol_error() {
        let err = extract_result("<html>502 Bad Gateway</html>", &fields()).unwrap_err();
        match err {
            ExchangeError::InvalidResponseFormat(body) => {
                assert_eq!(body, "(<html>502 Bad Gateway</html>)");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(
            extract_result("", &fields()),
            Err(ExchangeError::InvalidResponseFormat(_))
        ));
        assert!(matches!(
            extract_result("{}", &fields()),
            Err(ExchangeError::InvalidResponseFormat(_))
        ));
    }

    #[test]
    fn test_failure_flag_carries_message() {
        let raw = r#"{"success":false,"message":"INVALID_MARKET","result":null}"#;
        let err = extract_result(raw, &fields()).unwrap_err();
        assert_eq!(err.api_message(), Some("INVALID_MARKET"));
    }

    #[test]
    fn test_missing_result_dumps_payload() {
        let raw = r#"{"success":true}"#;
        let err = extract_result(raw, &fields()).unwrap_err();
        assert_eq!(err.api_message(), Some(r#"{"success":true}"#));
    }

    #[test]
    fn test_numeric_success_flag() {
        let raw = r#"{"success":1,"result":{"uuid":"abc"}}"#;
        assert_eq!(
            extract_result(raw, &fields()).unwrap(),
            json!({"uuid": "abc"})
        );
        let raw = r#"{"success":0,"result":{"uuid":"abc"}}"#;
        assert!(matches!(
            extract_result(raw, &fields()),
            Err(ExchangeError::ApiError(_))
        ));
    }

    #[test]
    fn test_custom_field_names() {
        let fields = EnvelopeFields::new("ok", "data", "error");
        let raw = r#"{"ok":false,"error":"denied"}"#;
        let err = extract_result(raw, &fields).unwrap_err();
        assert_eq!(err.api_message(), Some("denied"));
    }
}
