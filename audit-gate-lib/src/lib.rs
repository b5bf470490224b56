#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for audit-gate
//!
//! This library holds all functionality for the audit-gate tool, which prepares `npm audit`
//! runs from command-line flags and an exception configuration.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`config`]: Locating and loading exception configurations
//! - [`exceptions`]: Exception data model and resolution
//! - [`resolve`]: Assembling the inputs of an audit run

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod config;
pub mod exceptions;
pub mod resolve;

pub use crate::commands::{Host, run};
