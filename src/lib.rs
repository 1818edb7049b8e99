pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;

pub use crate::core::{
    apply_operator, build_diffusion_operator, build_hadamard_tensor, build_phase_flip,
    factored_diffusion, matrices_equal, verify_factored_form, QuantumError,
};
