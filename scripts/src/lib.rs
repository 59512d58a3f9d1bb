//! Scripts for deploying the MultichainControl and MccbToken contracts.

#![deny(clippy::missing_docs_in_private_items)]

pub mod artifact;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;

/// Our compiler & network settings
pub mod build;

/// Our deploy utils
pub mod deploy;

// Our output utils
pub mod output_writer;

pub mod tx;
