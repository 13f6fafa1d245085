//! Numerical flux functions.

mod upwind;

pub use upwind::upwind_flux;
