//! Typed REST binding to the vehicle bridge. Every endpoint is a request type paired with the
//! response type it parses into.

mod common;
pub(crate) mod http_client;
pub(crate) mod http_request;
pub(crate) mod http_response;

pub(crate) use common::HTTPError;
