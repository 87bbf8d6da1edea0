#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod transport;

pub mod display;
pub mod filter;
pub mod prelude;
pub mod types;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use transport::{AuthTransport, JSON_CONTENT_TYPE, RequestHeaders};
