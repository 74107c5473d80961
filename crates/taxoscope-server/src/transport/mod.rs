//! HTTP transport: report endpoints.

pub mod http;
