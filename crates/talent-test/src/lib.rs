#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod fixtures;
pub mod mock;

pub use mock::MockTransport;
