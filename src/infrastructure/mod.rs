//! Infrastructure layer - Storage backends, source adapters and services

pub mod observability;
pub mod request_log;
pub mod services;
pub mod sources;
pub mod storage;
