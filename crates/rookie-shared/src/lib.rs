//! # Rookie Shared
//!
//! View types handed to front ends. The `rookie` CLI prints them as JSON
//! with `--json`; another front end can consume the same shapes.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, Response};
