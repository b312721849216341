//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and the filesystem. Each service
//! focuses on a specific use case.

pub mod export;

pub use export::{read_export, sanitize_segment, ExportFailure, ExportPlanner, ExportReport, WrittenFile};
