//! Handsign Hand Model
//!
//! Defines the data contracts shared by every pipeline stage:
//! - **Landmarks:** the 21-point hand topology in normalized coordinates
//! - **Frames:** timestamped per-frame detector output, possibly empty
//! - **Results:** the class index chosen for a frame
//! - **Labels:** the ordered table of gesture names
//!
//! Landmark coordinates are normalized image coordinates as produced by
//! the external hand tracker; `z` is relative depth.

pub mod frame;
pub mod labels;
pub mod landmark;
pub mod result;

pub use frame::*;
pub use labels::*;
pub use landmark::*;
pub use result::*;
