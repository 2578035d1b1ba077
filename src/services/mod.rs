//! # Business Logic Services
//!
//! This module contains the core business logic services of the application.
//! Services encapsulate domain-specific functionality and provide clean interfaces
//! for use by HTTP handlers.
//!
//! ## Available Services
//!
//! - **Email** (`email`) - Email syntax and MX record validation
//! - **Matching** (`matching`) - Interest-overlap matchmaking filter
//! - **User** (`user`) - CRUD orchestration over the user store

pub mod email;
pub mod matching;
pub mod user;
