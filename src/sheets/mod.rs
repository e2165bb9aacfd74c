//! Receipt sheet composition
//!
//! The batch pipeline that turns stored expense records with receipt images
//! into printable PDF sheets: records are partitioned by (month, type), each
//! group's images are laid into a fixed 3x3 grid across as many pages as
//! needed, scaled and centered without distortion, and written out as one
//! PDF per group.

pub mod batch;
pub mod compose;
pub mod fit;
pub mod grid;
pub mod group;

pub use batch::{run_batch, BatchReport, GroupFailure};
pub use compose::{ComposeResult, PlacedItem, Rect, SheetComposer, SkipReason, SkippedItem};
pub use fit::{fit_image, FittedImage};
pub use grid::PageGeometry;
pub use group::{group_receipts, Group, GroupKey};
