//! Document item model
//!
//! The item stream is the sole persisted and mutable representation of a
//! transcript. Items carry no identity beyond their position; derived timing
//! lives in [`crate::timing`].

pub mod item;
pub mod source;
pub mod stream;

pub use item::{Boundary, Item, ItemKind};
pub use source::{Source, SourceTable};
pub use stream::ItemStream;
