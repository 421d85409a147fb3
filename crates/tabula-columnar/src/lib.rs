//! In-memory columnar frames for tabula.
//!
//! This crate focuses on:
//! - Frame construction from loosely-typed inputs (flat sequences, nested
//!   sequences, sets, key-keyed mappings, foreign tabular/series objects).
//! - Per-column storage-type inference over a closed promotion lattice
//!   (`bool < int < real`; mixing in strings promotes the column to `str`).
//! - Packed, missing-aware column storage (validity bitmaps; dictionary
//!   encoding for strings).
//! - An on-demand consistency check over finished frames.
//!
//! Frames are immutable once built: later operators are expected to produce
//! new frames rather than mutate in place.

#![forbid(unsafe_code)]

mod bitmap;
mod check;
mod column;
mod error;
mod frame;
mod infer;
mod source;
mod stype;
mod value;

pub use crate::bitmap::BitVec;
pub use crate::check::{CheckReport, Violation};
pub use crate::column::Column;
pub use crate::error::FrameError;
pub use crate::frame::Frame;
pub use crate::infer::infer_stype;
pub use crate::source::{SeriesSource, Source, TabularSource};
pub use crate::stype::Stype;
pub use crate::value::Value;
