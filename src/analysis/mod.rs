//! Solution diagnostics.

mod stability;

pub use stability::{cfl_report, CflReport};
