//! Anima prompt tooling.
//!
//! An LLM returns one JSON object describing prompt parts. [`AnimaRouter`]
//! splits it into fields, lets callers override any field, and can lock
//! fields so they keep their latched value while the JSON keeps changing.
//!
//! [`XyMatrix`] and [`XyCellPrefix`] generate prompt variants and matching
//! file name prefixes for side-by-side comparisons.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod field;
mod latch;
mod matrix;
mod pieces;
mod prefix;
mod router;

pub use field::AnimaField;
pub use latch::{FieldControl, LatchState};
pub use matrix::{PairJoin, SameFieldBehavior, XyGrid, XyMatrix, XyMatrixBuilder};
pub use pieces::{clean_piece, join_pieces, split_list, text_of};
pub use prefix::{MatrixMode, XyCellPrefix, XyCellPrefixBuilder, sanitize_prefix};
pub use router::{AnimaRoute, AnimaRouter, RouteOptions};
