//! Application services - orchestrate ports on behalf of inbound adapters.

mod posts;

pub use posts::PostService;
