//! Command-line interface: dataset evaluation, AI-vs-AI simulation and
//! single-position analysis

pub mod commands;
pub mod output;
