//! # Quill Core
//!
//! The domain layer of the Quill blog service.
//! This crate contains the post lifecycle rules, the repository and access
//! ports, and the service that ties them together. It has no infrastructure
//! dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::PostService;
