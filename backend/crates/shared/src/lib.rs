//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by every backend crate:
//! - Unified error type (`AppError`) and its HTTP classification
//! - Typed entity identifiers
//! - Partial-update field wrapper (`Patch`)
//! - Offset pagination arithmetic
//!
//! Only things with a single meaning across all domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod page;
pub mod patch;
