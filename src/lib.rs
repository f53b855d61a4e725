//! linkdash - a small URL shortener
//!
//! A web dashboard for creating, listing and deleting short codes, a 302
//! redirect endpoint that counts clicks, and a per-link statistics page.
//!
//! # Architecture
//! - `storage`: `LinkStore` trait and the SeaORM backend
//! - `services`: code allocation and the link facade
//! - `api`: HTTP services, middleware and HTML views
//! - `interfaces`: command-line interface
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
