//! Internal trait abstracting the HTTP transport.
//!
//! This module provides the [`HttpOps`] trait which abstracts the underlying
//! HTTP client, enabling mocking in tests. Requests are fully prepared before they
//! reach the transport: the URL carries its query string and the session cookie is
//! already rendered.

use reqwest::{
    Client, Method,
    header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    multipart,
};
use thiserror::Error;
use url::Url;

use crate::payload::{MultipartForm, PartValue};

/// Media type of login and command form bodies.
pub(crate) const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Body of a prepared request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestBody {
    Empty,
    /// Url-encoded form fields, in order.
    Form(Vec<(String, String)>),
    Multipart(MultipartForm),
}

/// A request ready to be put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    /// Value of the `Cookie` header, if any.
    pub(crate) cookie: Option<String>,
    pub(crate) body: RequestBody,
}

/// The parts of a response the client looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub(crate) status: u16,
    /// Every `Set-Cookie` header value.
    pub(crate) set_cookie: Vec<String>,
    pub(crate) body: String,
}

/// Any failure below the HTTP response level, carrying the transport's own message.
#[derive(Debug, Error)]
#[error("{0}")]
pub(crate) struct TransportError(pub(crate) String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// Internal trait that abstracts the HTTP client.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait HttpOps {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

impl HttpOps for Client {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self.request(request.method, request.url);
        if let Some(cookie) = request.cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder
                .header(CONTENT_TYPE, FORM_URLENCODED)
                .body(encode_form(&fields)),
            RequestBody::Multipart(form) => builder.multipart(into_reqwest_form(form)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let set_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            set_cookie,
            body,
        })
    }
}

/// Url-encodes form fields, keeping their order.
fn encode_form(fields: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

fn into_reqwest_form(form: MultipartForm) -> Result<multipart::Form, TransportError> {
    form.into_parts()
        .into_iter()
        .try_fold(multipart::Form::new(), |acc, part| -> Result<_, TransportError> {
            let form = match part.value {
                PartValue::Text(text) => acc.text(part.name, text),
                PartValue::File {
                    bytes,
                    filename,
                    content_type,
                } => {
                    let file = multipart::Part::bytes(bytes)
                        .file_name(filename)
                        .mime_str(&content_type)?;
                    acc.part(part.name, file)
                }
            };
            Ok(form)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields_keep_their_order() {
        let fields = vec![
            ("username".to_string(), "admin".to_string()),
            ("password".to_string(), "p@ss word".to_string()),
        ];
        assert_eq!(encode_form(&fields), "username=admin&password=p%40ss+word");
    }

    #[test]
    fn invalid_part_media_type_is_a_transport_error() {
        let mut form = MultipartForm::default();
        form.file("torrents", b"d4:infoe".to_vec(), "a.torrent", "not a mime type");

        let err = into_reqwest_form(form).unwrap_err();
        assert!(!err.0.is_empty());
    }
}
