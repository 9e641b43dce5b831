// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Grammar-side tree construction.
//!
//! The grammar engine hands each matched production's raw result to a named
//! builder. Builders flatten it, check its shape, and return a positioned
//! node from `scad-ast`, or forward a lone element untouched.

pub mod builders;
pub mod infer;
pub mod parse_result;
pub mod registry;

pub use builders::Built;
pub use parse_result::{Item, ParseResult};
pub use registry::{build, BuilderFn, BuilderRegistry, BUILDERS};
