//! # Fireseed
//!
//! Fireseed seeds a Firebase project with test accounts. For every entry in
//! an accounts file it creates a Firebase Auth user and writes a matching
//! profile document to the Firestore `users` collection, keyed by the uid
//! that Auth hands back.
//!
//! The interesting parts:
//!
//! - [`provision`]: the [`Provisioner`] that walks the account list and
//!   aggregates a per-record [`Report`]
//! - [`auth`]: a minimal Firebase Auth admin client (user creation only)
//! - [`firestore`]: a Firestore gRPC client covering the document write path
//!
//! [`Provisioner`]: provision::Provisioner
//! [`Report`]: provision::Report

pub mod auth;
pub mod error;
pub mod firestore;
pub mod provision;
mod service_account;

pub use service_account::ServiceAccount;
