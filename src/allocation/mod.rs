//! Fleet route allocation.
//!
//! - [`RouteAllocator`] — Distinct route discovery, efficiency-bounded
//!   reuse and shortcut fallback

mod allocator;

pub use allocator::{AllocationError, RouteAllocator};
