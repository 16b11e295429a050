//! qlm Execution Engine Contract
//!
//! This crate defines what the execution backend needs from an engine:
//! a [`Job`] descriptor built around a translated program, the [`Engine`]
//! trait that runs it, and the [`Sample`]s that come back.
//!
//! # Job Types
//!
//! | Type | Request | Samples |
//! |------|---------|---------|
//! | [`JobType::Sample`] | shot count | one measured state per shot |
//! | [`JobType::Obs`] | shot count + [`Observable`] | expectation value |
//!
//! # Implementing an Engine
//!
//! ```ignore
//! use async_trait::async_trait;
//! use qlm_hal::{Engine, ExecutionResult, HalResult, Job};
//!
//! struct MyEngine;
//!
//! #[async_trait]
//! impl Engine for MyEngine {
//!     fn name(&self) -> &str { "my_engine" }
//!     fn max_qubits(&self) -> usize { 20 }
//!
//!     async fn submit(&self, job: &Job) -> HalResult<ExecutionResult> {
//!         // Run job.program on hardware
//!         # todo!()
//!     }
//! }
//! ```

pub mod engine;
pub mod error;
pub mod job;
pub mod result;

pub use engine::{Engine, validate_job};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobType, Observable};
pub use result::{ExecutionResult, Sample};
