//! Turns a resolved [`ClientConfig`] plus an API path into a ready-to-send HTTP request.

use crate::youtube_api::config::ClientConfig;
use crate::youtube_api::error::Error;
use bytes::Bytes;
use http::header::{ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE, HeaderName, USER_AGENT};
use http::{HeaderValue, Method};

/// The header the API honours in place of a native DELETE.
pub const METHOD_OVERRIDE: HeaderName = HeaderName::from_static("x-http-method-override");

/// Which kind of call is being made.
///
/// The verb decides both how the request is built and which statuses count as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post { body: Bytes, content_type: String },
    /// Sent as an empty POST carrying `X-HTTP-Method-Override: DELETE`.
    Delete,
}

impl Verb {
    pub fn post_json(body: &impl serde::Serialize) -> eyre::Result<Self> {
        Ok(Self::Post {
            body: Bytes::from(serde_json::to_vec(body)?),
            content_type: "application/json".to_string(),
        })
    }

    pub fn post_empty() -> Self {
        Self::Post {
            body: Bytes::new(),
            content_type: String::new(),
        }
    }

    pub fn is_get(&self) -> bool {
        matches!(self, Self::Get)
    }
}

/// Composes `api_root/segment/segment?key=value&...`.
pub fn make_uri(
    api_root: &str,
    path: &[&str],
    query: &[(&str, &str)],
) -> Result<reqwest::Url, Error> {
    let invalid = |reason: String| Error::InvalidUri {
        uri: format!("{}/{}", api_root.trim_end_matches('/'), path.join("/")),
        reason,
    };

    let mut url = reqwest::Url::parse(api_root).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("API root cannot carry a path".to_string()))?
        .pop_if_empty()
        .extend(path);

    if !query.is_empty() {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in query {
            serializer.append_pair(key, value);
        }
        url.set_query(Some(&serializer.finish()));
    }

    Ok(url)
}

fn header(name: &HeaderName, value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|source| Error::InvalidHeader {
        name: name.clone(),
        source,
    })
}

/// Builds the request for one call.
///
/// Unauthenticated configs append the `key` query parameter; authenticated configs send an
/// `Authorization: Bearer` header instead. The two are never combined.
pub fn build_request(
    config: &ClientConfig,
    verb: &Verb,
    path: &[&str],
    query: &[(&str, &str)],
) -> Result<reqwest::Request, Error> {
    let mut complete_query = query.to_vec();
    if !config.authenticated {
        complete_query.push(("key", config.api_key.as_str()));
    }
    let url = make_uri(&config.api_root, path, &complete_query)?;

    let method = match verb {
        Verb::Get => Method::GET,
        Verb::Post { .. } | Verb::Delete => Method::POST,
    };
    let mut request = reqwest::Request::new(method, url);
    let headers = request.headers_mut();

    if config.authenticated {
        headers.insert(
            AUTHORIZATION,
            header(&AUTHORIZATION, &format!("Bearer {}", config.access_token))?,
        );
    }

    match verb {
        Verb::Get => {
            headers.insert(ACCEPT, header(&ACCEPT, &config.accept)?);
            let user_agent = format!("{} (gzip)", config.user_agent);
            headers.insert(USER_AGENT, header(&USER_AGENT, &user_agent)?);
            headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        }
        Verb::Post { body, content_type } => {
            headers.insert(USER_AGENT, header(&USER_AGENT, &config.user_agent)?);
            if !content_type.is_empty() {
                headers.insert(CONTENT_TYPE, header(&CONTENT_TYPE, content_type)?);
            }
            *request.body_mut() = Some(reqwest::Body::from(body.clone()));
        }
        Verb::Delete => {
            headers.insert(USER_AGENT, header(&USER_AGENT, &config.user_agent)?);
            headers.insert(METHOD_OVERRIDE, HeaderValue::from_static("DELETE"));
            *request.body_mut() = Some(reqwest::Body::from(Bytes::new()));
        }
    }

    Ok(request)
}
