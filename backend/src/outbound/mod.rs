//! Outbound adapters.
//!
//! Driven-side implementations of the domain ports. Persistence is the only
//! outbound concern; everything else the service needs arrives through the
//! inbound HTTP surface.

pub mod persistence;
