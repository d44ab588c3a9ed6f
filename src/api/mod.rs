//! HTTP transport for packed responses

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
