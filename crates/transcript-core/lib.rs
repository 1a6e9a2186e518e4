//! # transcript-core
//!
//! Time-indexed model and query algebra for time-coded transcripts. A transcript is
//! an ordered stream of items (words, silences, paragraph boundaries, headings),
//! each duration-bearing item optionally backed by a span of an external media
//! source.
//!
//! ## Features
//!
//! - **Closed item model**: exhaustive matching over every item variant
//! - **Derived timing**: absolute start times and indices recomputed on read
//! - **Lazy sequence algebra**: filter, map, chain and sub-item exact slicing by time
//! - **Structural validation**: a finite automaton over paragraph boundaries
//! - **Render coalescing**: minimal contiguous segments for playback and export
//!
//! ## Quick Start
//!
//! ```rust
//! use transcript_core::{Item, ItemStream, render_segments};
//!
//! let stream = ItemStream::from_items(vec![
//!     Item::paragraph_start("Ada"),
//!     Item::word("hello", "interview.wav", 0.0, 0.5),
//!     Item::word("world", "interview.wav", 0.5, 0.5),
//!     Item::paragraph_end(),
//! ]);
//!
//! stream.validate()?;
//! let segments = render_segments(stream.timed())?;
//! assert_eq!(segments.len(), 1);
//! assert!((segments[0].duration - 1.0).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod analysis;
pub mod model;
pub mod render;
pub mod stream;
pub mod timing;
pub mod utils;

pub use analysis::{validate_structure, StructureError, StructureRule};
pub use model::{Boundary, Item, ItemKind, ItemStream, Source, SourceTable};
pub use render::{render_segments, RenderKind, RenderSegment, RenderSegments};
pub use stream::{ParagraphView, Sequence, TimeSpan};
pub use timing::{index, Indexer, ParagraphRef, TimedItem};
pub use utils::{rough_eq, CoreError, EPSILON};

/// Result type alias for core operations
pub type Result<T> = core::result::Result<T, CoreError>;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
