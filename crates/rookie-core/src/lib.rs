//! # Rookie Core
//!
//! The domain layer of Rookie Hub.
//! This crate holds the post, session and comment stores together with the
//! ports they persist through. It performs no I/O of its own.

pub mod domain;
pub mod error;
pub mod listing;
pub mod ports;
pub mod store;

pub use error::{DomainError, StorageError};
