//! Backend Gateway
//!
//! Authenticated HTTP access to the hospital backend API.
//!
//! ## Architecture
//!
//! - **Gateway**: attaches credentials, dispatches, normalises outcomes
//! - **Transport**: moves a prepared request over HTTP (`reqwest` in production)
//! - **Navigator**: performs the jump to the login view after a 401
//!
//! ## Request Flow
//!
//! 1. Caller invokes `get/post/put/delete`, all of which go through `request`
//! 2. JSON content type and caller headers are merged, bearer token attached
//! 3. Transport sends the request to `<base_url><endpoint>`
//! 4. 401 clears the session and redirects; other failures carry the body's
//!    `message`; success returns the parsed JSON

mod client;
mod error;
mod navigator;
mod request;
mod transport;

pub use client::{method_from_str, Gateway, GOOGLE_AUTH_ENDPOINT, REQUEST_ID_HEADER};
pub use error::{
    extract_error_message, ErrorKind, GatewayError, GatewayResult, TransportError,
    FALLBACK_ERROR_MESSAGE, SESSION_EXPIRED_MESSAGE,
};
pub use navigator::{LogNavigator, Navigator};
pub use request::{endpoint_with_query, PreparedRequest, RawResponse, RequestOptions};
pub use transport::{ReqwestTransport, Transport};

#[cfg(test)]
pub(crate) mod testing;
