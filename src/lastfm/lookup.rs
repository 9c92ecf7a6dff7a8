//! Classifying upstream bodies

use bytes::Bytes;
use serde_json::Value;

use super::UpstreamResponse;

/// What a method call returned, from the point of view of one report
#[derive(Debug)]
pub enum Lookup {
    /// The expected top-level field, detached from the document
    Found(Value),
    /// Body was not JSON; carried through untouched
    ParseFailure {
        body: Bytes,
        content_type: Option<String>,
    },
    /// JSON, but without the expected field (usually an API error object)
    UnexpectedShape { status: u16, message: String },
}

impl Lookup {
    pub fn from_response(resp: UpstreamResponse, field: &str) -> Self {
        let mut document: Value = match serde_json::from_slice(&resp.body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("upstream body for {} is not json: {}", field, e);
                return Lookup::ParseFailure {
                    body: resp.body,
                    content_type: resp.content_type,
                };
            }
        };

        let data = document.get_mut(field).map(Value::take);
        match data {
            Some(data) if !data.is_null() => Lookup::Found(data),
            _ => {
                let message = document
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("No {} found", field));
                tracing::warn!(
                    "upstream reply without {} (status {}): {}",
                    field,
                    resp.status,
                    message
                );
                Lookup::UnexpectedShape {
                    status: resp.status,
                    message,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> UpstreamResponse {
        UpstreamResponse {
            status,
            content_type: Some("application/json".to_string()),
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    #[test]
    fn test_found() {
        let lookup = Lookup::from_response(
            response(200, r#"{"recenttracks":{"track":[]}}"#),
            "recenttracks",
        );
        match lookup {
            Lookup::Found(data) => assert!(data["track"].is_array()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_failure_keeps_bytes() {
        let lookup = Lookup::from_response(response(503, "<html>down</html>"), "recenttracks");
        match lookup {
            Lookup::ParseFailure { body, .. } => assert_eq!(&body[..], b"<html>down</html>"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_shape_carries_message() {
        let lookup = Lookup::from_response(
            response(404, r#"{"error":6,"message":"User not found"}"#),
            "lovedtracks",
        );
        match lookup {
            Lookup::UnexpectedShape { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "User not found");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
