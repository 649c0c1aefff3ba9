//! Application layer for taskdeck.
//!
//! This crate owns the task store state container and everything around it:
//! explicit patches, observers, the persistence bridge, configuration and
//! tracing setup shared by front ends.

pub mod clock;
pub mod config;
pub mod derived_view;
pub mod filter_util;
pub mod notice;
pub mod observability;
pub mod persistence;
pub mod task_patch;
pub mod task_store;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, StorageConfig, ViewConfig};
pub use derived_view::DerivedView;
pub use filter_util::{FilterBuildError, FilterBuildResult, FilterPatchBuilder, parse_sort_option};
pub use notice::{Notice, Observer, Observers, Severity, StoreEvent, SubscriptionId};
pub use observability::install_tracing;
pub use persistence::{
    CodecError, CollectionKey, Persistence, decode_categories, decode_tasks, encode_categories, encode_tasks,
};
pub use task_patch::{CategoryPatch, DueDatePatch, TaskPatch};
pub use task_store::TaskStore;
