//! Client for DeepSource's static-analysis GraphQL API.
//!
//! The interesting part lives in [`client`]: pagination normalization,
//! defensive extraction of Relay connections, and classification of upstream
//! failures into "absent" results or normalized errors. Typed records are in
//! [`models`], and the node validators that build them are in [`mapping`].

pub mod client;
pub mod mapping;
pub mod models;
pub mod serde_utils;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{
    Absence, ClientConfig, DeepSourceClient, DeepSourceError, DeepSourceResult, ErrorCategory,
    PageInfo, PaginatedResponse, PaginationParams,
};
