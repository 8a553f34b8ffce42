//! Request log domain - Audit trail of resolver calls

mod entity;
mod repository;

pub use entity::{EndpointKind, RequestLog, RequestLogId};
#[cfg(test)]
pub use repository::MockRequestLogRepository;
pub use repository::RequestLogRepository;
