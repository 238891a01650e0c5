//! Integration test suite for pom-bridge
//!
//! End-to-end tests that lay a repository out in a temporary directory, open a
//! [`Session`](pom_bridge::session::Session) or the individual components over it,
//! and check the references that come out.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! RUST_LOG=debug cargo test --test integration -- --nocapture
//! ```
//!
//! # Test Organization
//!
//! - **errors**: malformed descriptors, missing versions and user-facing formatting
//! - **references**: classification and reference ordering for whole modules
//! - **resolution**: parent chains, property substitution and cache sharing
//! - **session**: config loading and catalog construction from the top descriptor
//! - **targets**: source-layout target discovery

mod errors;
mod references;
mod resolution;
mod session;
mod targets;
