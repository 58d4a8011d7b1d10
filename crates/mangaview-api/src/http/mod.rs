//! HTTP interface module.
//!
//! - Catalog endpoints under `/api`
//! - Image relay at `/api/proxy-image`
//! - Health and liveness probes

pub mod routes;

pub(crate) mod catalog;
pub(crate) mod monitoring;
pub(crate) mod proxy;
