//! Domain layer: the remittance transaction core.
//!
//! Everything in here is pure or near-pure. Records are plain values held
//! in whatever collection the caller owns; the only ambient inputs are
//! the clock and the id source, and the latter sits behind an injectable
//! trait. Store ports are the seam the outer layers implement.

pub mod corridor;
pub mod factory;
pub mod fee;
pub mod ids;
pub mod lifecycle;
pub mod limits;
pub mod money;
pub mod person;
pub mod ports;
pub mod query;
pub mod remittance;
