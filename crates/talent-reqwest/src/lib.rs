#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod api;
mod connect;
mod dashboard;
mod degrade;
mod error;
mod service;

pub use crate::api::TalentApi;
pub use crate::connect::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, ReqwestClient, ReqwestConfig, TRACING_TARGET,
};
pub use crate::dashboard::{Dashboard, NO_DEPARTMENT_MESSAGE};
pub use crate::degrade::ResultExt;
pub use crate::error::{Error, Result};
