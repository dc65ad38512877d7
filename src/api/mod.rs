//! Client for the Akiba REST API
//!
//! Layered bottom-up: [`request`] holds plain request/response values,
//! [`transport`] moves them over the network, [`cache`] deduplicates and
//! memoizes queries, and [`client`] exposes one typed method per endpoint.

pub mod cache;
pub mod client;
pub mod request;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{QueryCache, QueryKey, QueryStatus};
pub use client::{ApiClient, Page};
pub use request::{ApiRequest, ApiResponse, Method, RequestBody};
pub use transport::{HttpTransport, Transport};
