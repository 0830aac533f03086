//! # Desk API Client
//!
//! HTTP implementation of the Patients API for the patient desk.
//!
//! Handles:
//! - URL construction under a configurable base URL
//! - JSON encoding of drafts and decoding of records
//! - Mapping of transport failures, 404s and `{ "error": ... }` bodies onto `ApiError`
//!
//! Uses `desk-core` for the record types and the `PatientsApi` trait.

#![warn(rust_2018_idioms)]

mod client;

pub use client::{ClientError, ClientResult, HttpPatientsApi};
