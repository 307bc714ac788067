//! Turso Platform API surface
//!
//! [`TursoClient`] is the entry point; each resource contributes an
//! `impl TursoClient` block from its own module. Typed models live in
//! [`models`].

mod audit_logs;
mod client;
mod databases;
mod groups;
mod invoices;
mod locations;
pub mod models;
mod organizations;
mod tokens;

pub use client::TursoClient;
