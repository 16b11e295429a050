//! qlm Execution Backend
//!
//! Runs qlm circuits on an execution [`Engine`](qlm_hal::Engine) and returns
//! the declared output registers.
//!
//! # Overview
//!
//! An [`ExecutionBackend`] is built from a [`BackendConfig`] and a shared
//! engine. Each call to [`ExecutionBackend::run_circuit`]:
//!
//! 1. validates the circuit and rebuilds its output registers,
//! 2. translates it onto a register of `number_qubits` qubits,
//! 3. submits exactly one SAMPLE or OBS job,
//! 4. folds every returned sample into one register row.
//!
//! Measurement schemes ([`ClassicalRegister`], [`PauliZProduct`]) run several
//! circuits sharing a constant prefix and merge their registers by name.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use qlm_adapter_sim::SimulatorEngine;
//! use qlm_backend::{BackendConfig, ExecutionBackend};
//!
//! let config = BackendConfig { number_qubits: 2, number_measurements: 100, ..Default::default() };
//! let backend = ExecutionBackend::new(config, Arc::new(SimulatorEngine::new()))?;
//! let registers = backend.run_circuit(&circuit).await?;
//! println!("{:?}", registers.bits["ro"]);
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod measurement;
pub mod registers;
pub mod tracing_config;

pub use backend::{BackendWarning, ExecutionBackend};
pub use config::{BackendConfig, ConfigError};
pub use error::{BackendError, BackendResult};
pub use measurement::{ClassicalRegister, Measurement, PauliZProduct, PauliZProductInput};
pub use registers::{OutputRegisters, RegisterValue};
pub use tracing_config::{TracingConfig, TracingFormat, init_default_tracing, init_tracing};
