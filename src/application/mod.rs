//! Application layer containing the orchestration over the domain core.
//!
//! This module defines the `RemittanceService`, the primary entry point
//! for creating and managing transfers. It owns the store ports and adds
//! the policies the core leaves to its caller.

pub mod service;

pub use service::RemittanceService;
