// Composition root.
//
// Responsibilities
// - Read configuration from the environment.
// - Pick the storage backend and wire it into use case handlers.
// - Serve HTTP and GraphQL, and spawn the notification relay.

pub mod claims;
pub mod config;
pub mod error_response;
pub mod graphql;
pub mod http;
pub mod state;
pub mod workers;

pub use http::app;
