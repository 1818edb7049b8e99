//! Core module tree for the groverlab numerical routines.

pub mod diffusion;
pub mod error;
pub mod gates;
pub mod grover;
pub mod ops;
pub mod types;

#[macro_use]
pub mod debug; // gated debug logging (GROVERLAB_DEBUG=1) provides debug_log! macro

pub use diffusion::{build_diffusion_operator, factored_diffusion, verify_factored_form};
pub use error::QuantumError;
pub use ops::{apply_operator, build_hadamard_tensor, build_phase_flip, kron, matrices_equal};
pub use types::{QOp, QState};
