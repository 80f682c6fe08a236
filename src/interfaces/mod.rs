//! Interface layer: the I/O shells around the remittance service.

pub mod demo;
pub mod http;
