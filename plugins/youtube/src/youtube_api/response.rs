//! Raw HTTP response to decoded value.

use crate::youtube_api::error::Error;
use crate::youtube_api::request::Verb;
use http::StatusCode;
use serde_json::Value;
use std::io::Read;

/// Inflates a gzip body. An empty body inflates to nothing.
pub fn decompress(body: &[u8]) -> Result<Vec<u8>, Error> {
    let mut decompressed = Vec::new();
    if body.is_empty() {
        return Ok(decompressed);
    }
    flate2::read::GzDecoder::new(body)
        .read_to_end(&mut decompressed)
        .map_err(Error::Decompression)?;
    Ok(decompressed)
}

/// Parses a body as JSON, yielding `null` for anything that is not valid JSON.
///
/// "No content" responses and other empty or malformed bodies must not fail the call; decoders
/// see `null` and treat every field as absent.
pub fn parse_lenient(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        if !body.is_empty() {
            tracing::trace!(error = %e, "response body is not JSON, treating as null");
        }
        Value::Null
    })
}

/// Whether `status` counts as success for the given verb.
pub fn is_success_status(verb: &Verb, status: StatusCode) -> bool {
    match verb {
        Verb::Get => status == StatusCode::OK,
        Verb::Post { .. } | Verb::Delete => matches!(
            status,
            StatusCode::CREATED | StatusCode::OK | StatusCode::NO_CONTENT
        ),
    }
}

/// Extracts the human-readable message from a failed response's `error` field.
///
/// The field is either a bare string or an object with a `message`. Anything else gives an
/// empty message.
pub fn error_message(root: &Value) -> String {
    match &root["error"] {
        Value::String(message) => message.clone(),
        Value::Object(error) => error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

/// Runs the whole pipeline for one response.
///
/// GET bodies are gzip-decompressed first; POST and DELETE bodies are parsed as-is. On a success
/// status the parsed document is handed to `decode`.
pub fn handle<T>(
    verb: &Verb,
    status: StatusCode,
    body: &[u8],
    decode: impl FnOnce(&Value) -> eyre::Result<T>,
) -> Result<T, Error> {
    let root = if verb.is_get() {
        parse_lenient(&decompress(body)?)
    } else {
        parse_lenient(body)
    };

    if !is_success_status(verb, status) {
        return Err(Error::Api {
            status,
            message: error_message(&root),
        });
    }

    decode(&root).map_err(Error::decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use serde_json::json;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn identity(root: &Value) -> eyre::Result<Value> {
        Ok(root.clone())
    }

    #[test]
    fn gzip_body_round_trips_to_the_document() {
        let document = json!({ "kind": "youtube#videoListResponse", "items": [{ "id": "a" }] });
        let body = gzip(document.to_string().as_bytes());
        let root = handle(&Verb::Get, StatusCode::OK, &body, identity).unwrap();
        assert_eq!(root, document);
    }

    #[test]
    fn empty_get_body_is_null_not_an_error() {
        let root = handle(&Verb::Get, StatusCode::OK, b"", identity).unwrap();
        assert_eq!(root, Value::Null);
    }

    #[test]
    fn malformed_gzip_is_a_decompression_error() {
        let result = handle(&Verb::Get, StatusCode::OK, b"{\"plain\": true}", identity);
        assert!(matches!(result, Err(Error::Decompression(_))), "{result:?}");
    }

    #[test]
    fn decompression_is_checked_before_status() {
        let result = handle(&Verb::Get, StatusCode::NOT_FOUND, b"garbage", identity);
        assert!(matches!(result, Err(Error::Decompression(_))), "{result:?}");
    }

    #[test]
    fn gzip_of_non_json_is_null() {
        let body = gzip(b"<html>oops</html>");
        let root = handle(&Verb::Get, StatusCode::OK, &body, identity).unwrap();
        assert_eq!(root, Value::Null);
    }

    #[test]
    fn get_requires_exactly_ok() {
        let body = gzip(json!({ "error": "quota exceeded" }).to_string().as_bytes());
        for status in [StatusCode::CREATED, StatusCode::NO_CONTENT, StatusCode::FORBIDDEN] {
            match handle(&Verb::Get, status, &body, identity) {
                Err(Error::Api { status: got, message }) => {
                    assert_eq!(got, status);
                    assert_eq!(message, "quota exceeded");
                }
                other => panic!("expected API error for {status}, got {other:?}"),
            }
        }
    }

    #[test]
    fn post_and_delete_accept_created_ok_and_no_content() {
        for verb in [Verb::post_empty(), Verb::Delete] {
            for status in [StatusCode::CREATED, StatusCode::OK, StatusCode::NO_CONTENT] {
                let decoded = handle(&verb, status, b"", |_| Ok(42)).unwrap();
                assert_eq!(decoded, 42);
            }
            let result = handle(&verb, StatusCode::BAD_REQUEST, b"", |_| Ok(42));
            assert!(matches!(result, Err(Error::Api { .. })), "{result:?}");
        }
    }

    #[test]
    fn unparseable_post_error_has_empty_message() {
        let result = handle(&Verb::post_empty(), StatusCode::UNAUTHORIZED, b"nope", identity);
        match result {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert!(message.is_empty());
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn structured_error_uses_its_message() {
        let root = json!({ "error": { "code": 403, "message": "forbidden", "errors": [] } });
        assert_eq!(error_message(&root), "forbidden");
        assert_eq!(error_message(&json!({ "error": 5 })), "");
        assert_eq!(error_message(&Value::Null), "");
    }

    #[test]
    fn decoder_failure_is_a_decode_error() {
        let body = gzip(b"{}");
        let result: Result<(), _> = handle(&Verb::Get, StatusCode::OK, &body, |_| {
            Err(eyre::eyre!("missing items"))
        });
        match result {
            Err(e @ Error::Decode(_)) => {
                let source = std::error::Error::source(&e).unwrap().to_string();
                assert_eq!(source, "missing items");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
