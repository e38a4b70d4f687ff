//! Concrete implementations of outbound ports.

pub mod outbound;
