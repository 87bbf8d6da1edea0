//! Convenient re-exports for common use.

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::filter::{ApplicationFilter, ApplicationStats};
pub use crate::transport::{AuthTransport, RequestHeaders};
pub use crate::types::{
    ApplicationRecord, ApplicationStatus, Capability, Credentials, InterviewRequest,
    InterviewStatus, JobPosition, Role, User,
};
