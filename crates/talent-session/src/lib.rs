#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod context;
mod guard;
mod headers;
mod service;
mod storage;

pub mod store;

pub use context::{SessionContext, UserState};
pub use guard::{
    DASHBOARD_PATH, Destination, GuardDecision, LOGIN_PATH, Requirement, RouteGuard, landing_path,
};
pub use headers::{HeaderBuilder, RequestKind};
pub use service::{SessionService, TRACING_TARGET};
pub use storage::SessionStorage;
pub use store::{FileStore, MemoryStore, SessionStore};
pub use talent_core::{Error, ErrorKind, Result};
