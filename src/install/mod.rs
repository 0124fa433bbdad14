//! Modular operation subsystem.
//!
//! `executor` defines the backend boundary, `batch` the sequential batch
//! progress engine, `single` the one-off operation path, `history` the
//! per-item operation log, and `simulated` the demo backend. Public API is
//! re-exported here.

mod batch;
mod executor;
mod history;
mod simulated;
mod single;

pub use batch::{BatchRejected, BatchRunner};
pub use executor::{OperationExecutor, OperationOutcome};
pub use history::OperationHistory;
pub use simulated::SimulatedBackend;
pub use single::perform_single;
