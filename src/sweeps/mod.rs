//! The six independent validation passes.
//!
//! Each sweep reads the shared [`AuditConfig`](crate::config::AuditConfig)
//! and returns its own issue records; none looks at another's output.

pub mod headers;
pub mod links;
pub mod robots;
pub mod seo;
pub mod sitemaps;
pub mod sizes;
