//! qlm Local Statevector Engine
//!
//! An [`Engine`](qlm_hal::Engine) that runs translated target programs on a
//! dense statevector. It is exact, and therefore limited to small registers.
//!
//! # Job Handling
//!
//! | Job | Shots | Result |
//! |-----|-------|--------|
//! | `SAMPLE` | `n > 0` | `n` sampled basis states |
//! | `SAMPLE` | `0` | every reachable basis state with its probability |
//! | `OBS` | any | one exact expectation value |
//!
//! Resets are modeled as a measurement followed by a conditional flip.
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```ignore
//! use qlm_adapter_sim::SimulatorEngine;
//! use qlm_hal::{Engine, Job};
//! use qlm_translate::call_circuit;
//!
//! let program = call_circuit(&circuit, 2)?;
//! let result = SimulatorEngine::new().submit(&Job::sample(program, 100)).await?;
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorEngine;
