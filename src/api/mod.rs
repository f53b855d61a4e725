//! HTTP surface: route handlers, middleware and HTML views

pub mod middleware;
pub mod services;
pub mod views;
