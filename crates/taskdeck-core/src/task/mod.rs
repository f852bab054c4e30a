//! Task domain module.
//!
//! This module contains the task domain model, the repository interface the
//! views depend on, and the filter state applied to the task snapshot.
//!
//! # Module Structure
//!
//! - `model`: Core task domain models (`Task`, `TaskPriority`, `TaskDraft`,
//!   `TaskPatch`)
//! - `repository`: Task repository trait for backend CRUD
//! - `filter`: Filter state (`TaskFilter`) and the pure filtered-view
//!   computation
//!
//! # Usage
//!
//! ```ignore
//! use taskdeck_core::task::{Task, TaskDraft, TaskPatch, TaskPriority};
//! use taskdeck_core::task::{filter_tasks, PriorityFilter, StatusFilter, TaskFilter};
//! use taskdeck_core::task::TaskRepository;
//! ```

mod filter;
mod model;
pub mod repository;

// Re-export public API
pub use filter::{filter_tasks, PriorityFilter, StatusFilter, TaskFilter};
pub use model::{Task, TaskDraft, TaskPatch, TaskPriority, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
pub use repository::TaskRepository;
