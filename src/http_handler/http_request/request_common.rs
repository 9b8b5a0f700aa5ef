use super::response_common::HTTPResponseType;
use crate::http_handler::{HTTPError, http_client::HTTPClient};
use strum_macros::Display;

/// The HTTP verbs the bridge API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HTTPRequestMethod {
    Get,
    Post,
    Put,
}

/// Parsed result type of request `T`.
pub(crate) type ParsedResponse<T> =
    <<T as HTTPRequestType>::Response as HTTPResponseType>::ParsedResponseType;

pub(crate) trait HTTPRequestType {
    /// Type of the expected response.
    type Response: HTTPResponseType;
    /// `str` object representing the specific endpoint.
    fn endpoint(&self) -> &str;
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod;
    fn header_params(&self) -> reqwest::header::HeaderMap { reqwest::header::HeaderMap::default() }

    /// Builder with method, URL and headers set, ready for a body.
    fn get_request_base(&self, client: &HTTPClient) -> reqwest::RequestBuilder {
        let url = format!("{}{}", client.url(), self.endpoint());
        let builder = match self.request_method() {
            HTTPRequestMethod::Get => client.client().get(url),
            HTTPRequestMethod::Post => client.client().post(url),
            HTTPRequestMethod::Put => client.client().put(url),
        };
        builder.headers(self.header_params())
    }
}

/// Requests without a body.
pub(crate) trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(&self, client: &HTTPClient) -> Result<ParsedResponse<Self>, HTTPError> {
        let response = self.get_request_base(client).send().await.map_err(RequestError::from)?;
        Ok(Self::Response::read_response(response).await?)
    }
}

/// Requests carrying a JSON body.
pub(crate) trait JSONBodyHTTPRequestType: HTTPRequestType {
    /// The type of the json body.
    type Body: serde::Serialize;
    /// Returns the serializable object.
    fn body(&self) -> &Self::Body;

    fn build_request(&self, client: &HTTPClient) -> reqwest::RequestBuilder {
        self.get_request_base(client).json(self.body())
    }

    async fn send_request(&self, client: &HTTPClient) -> Result<ParsedResponse<Self>, HTTPError> {
        let response = self.build_request(client).send().await.map_err(RequestError::from)?;
        Ok(Self::Response::read_response(response).await?)
    }
}

#[derive(Debug, Display)]
pub enum RequestError {
    FailedToCreateRequest,
    NoConnection,
    Timeout,
    Unknown,
}

impl std::error::Error for RequestError {}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_builder() || value.is_body() {
            RequestError::FailedToCreateRequest
        } else if value.is_timeout() {
            RequestError::Timeout
        } else if value.is_connect() {
            RequestError::NoConnection
        } else {
            RequestError::Unknown
        }
    }
}
