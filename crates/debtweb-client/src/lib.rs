//! JSON request executor and typed API for the debt tracking backend
//!
//! - transport: the `Transport` seam and its `reqwest` implementation
//! - executor: the response contract and typed JSON helpers
//! - api: records, summary, entry submission, deletion and login

pub mod api;
pub mod executor;
pub mod transport;

pub use api::LedgerApi;
pub use executor::{decode, interpret, RequestExecutor};
pub use transport::{HttpRequest, HttpResponse, RequestBody, ReqwestTransport, Transport};
