//! Infrastructure layer: store implementations behind the domain ports.

pub mod in_memory;
