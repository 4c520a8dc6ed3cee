//! HTTP-facing pieces of the interception layer.

pub mod capture;
pub mod middleware;
