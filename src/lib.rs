//! run-sql - apply a SQL script through a database RPC endpoint.
//!
//! This library exposes the core modules for use in integration tests.

pub mod app;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod rpc;
pub mod runner;
pub mod script;
pub mod secrets;
