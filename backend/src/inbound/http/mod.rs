//! HTTP inbound adapter exposing REST endpoints.

pub mod caller;
pub mod error;
pub mod greeter;
pub mod health;
pub mod state;
pub mod users;

pub use error::ApiResult;
