//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with the host:
//! - Confirmation and notification hooks
//! - Editor configuration file
//! - Error types

pub mod collaborators;
pub mod config;
pub mod error;
