//! 2048 rules engine (workspace facade crate).
//!
//! Exposes `merge_2048::{core, types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use merge_2048_core as core;
pub use merge_2048_types as types;
