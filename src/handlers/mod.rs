//! # HTTP Request Handlers
//!
//! This module contains all HTTP request handlers of the application.
//! Each handler is responsible for processing specific HTTP requests and returning
//! appropriate responses.
//!
//! ## Available Handlers
//!
//! - **Health Check** (`health_check`) - Application health monitoring
//! - **Users** (`users`) - User CRUD, bulk population, matches and email validation

mod health_check;
mod users;

pub use health_check::*;
pub use users::*;
