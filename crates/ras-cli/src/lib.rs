//! CLI library components for the HEC-RAS project tools.

pub mod logging;
pub mod solver;
