//! Homestead - property catalogue service
//!
//! This library provides the core functionality for the Homestead API.
//! It exposes all modules for testing purposes.

pub mod entities;
pub mod errors;
pub mod settings;
pub mod storage;
pub mod web;
