//! Shared test fixtures for the flashsync workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`cards`]: local card builders and remote mirrors of them

pub mod cards;
