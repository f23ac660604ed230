//! Write acknowledgement responses
//!
//! Both batch operations answer with the same body: `ok` ("true"/"false"
//! as strings, the historical wire format), the ids touched, and a
//! `message` only on failure. A failed batch never reports partial ids;
//! the transaction guarantees nothing from it was persisted.

use serde::Serialize;

/// Result body for Put and Delete.
#[derive(Debug, Clone, Serialize)]
pub struct WriteAck {
    pub ok: &'static str,
    pub id: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WriteAck {
    /// Acknowledge a committed batch with the ids it touched.
    pub fn success(ids: Vec<String>) -> Self {
        Self {
            ok: "true",
            id: ids,
            message: None,
        }
    }

    /// Report an aborted batch. The id list is always empty.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: "false",
            id: Vec::new(),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let ack = WriteAck::success(vec!["a".into(), "b".into()]);
        let json = serde_json::to_string(&ack).unwrap();
        assert_eq!(json, r#"{"ok":"true","id":["a","b"]}"#);
    }

    #[test]
    fn test_failure_shape() {
        let ack = WriteAck::failure("nil id");
        let json = serde_json::to_string(&ack).unwrap();
        assert_eq!(json, r#"{"ok":"false","id":[],"message":"nil id"}"#);
    }
}
