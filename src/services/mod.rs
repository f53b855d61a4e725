//! Service layer for business logic
//!
//! Shared by every interface (HTML dashboard, JSON API, CLI).

pub mod allocator;
mod link_service;
pub mod listing;

pub use allocator::{Allocation, CodeAllocator};
pub use link_service::*;
pub use listing::{ListOptions, SortField, SortOrder};
