//! # Utility Modules
//!
//! This module contains constants and validators used throughout the
//! application.
//!
//! ## Available Utilities
//!
//! - **Constants** (`constant`) - Defaults, column limits and fixed messages
//! - **Validators** (`validator`) - Email syntax pattern and payload validation

pub mod constant;
pub mod validator;
