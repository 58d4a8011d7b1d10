//! Relay wire envelope.
//!
//! Every JSON body served by the relay is either `{"ok": payload}` or
//! `{"error": message, "externalUrl": url?}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Ok {
        ok: T,
    },
    Err {
        error: String,
        #[serde(rename = "externalUrl", default, skip_serializing_if = "Option::is_none")]
        external_url: Option<String>,
    },
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self::Ok { ok: payload }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self::Err {
            error: message.into(),
            external_url: None,
        }
    }

    pub fn with_external_url(self, url: impl Into<String>) -> Self {
        match self {
            Self::Err { error, .. } => Self::Err {
                error,
                external_url: Some(url.into()),
            },
            ok => ok,
        }
    }

    /// Split into the payload or the error message.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Ok { ok } => Ok(ok),
            Self::Err { error, .. } => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_wire_shape() {
        let json = serde_json::to_value(Envelope::ok(42)).unwrap();
        assert_eq!(json, serde_json::json!({"ok": 42}));
    }

    #[test]
    fn test_err_wire_shape() {
        let env: Envelope<u32> =
            Envelope::err("Failed to fetch chapter").with_external_url("https://mangadex.org/chapter/x");
        let json = serde_json::to_value(env).unwrap();
        assert_eq!(json["error"], "Failed to fetch chapter");
        assert_eq!(json["externalUrl"], "https://mangadex.org/chapter/x");
    }

    #[test]
    fn test_err_without_external_url_omits_field() {
        let json = serde_json::to_string(&Envelope::<u32>::err("boom")).unwrap();
        assert!(!json.contains("externalUrl"));
    }

    #[test]
    fn test_parse_error_body() {
        let env: Envelope<Vec<String>> =
            serde_json::from_str(r#"{"error":"API failed"}"#).unwrap();
        assert_eq!(env.into_result(), Err("API failed".to_string()));
    }

    #[test]
    fn test_parse_ok_body() {
        let env: Envelope<Vec<String>> = serde_json::from_str(r#"{"ok":["a","b"]}"#).unwrap();
        assert_eq!(env.into_result().unwrap(), vec!["a", "b"]);
    }
}
