//! CodePad API - Shared types for the CodePad playground.
//!
//! Everything that crosses a crate boundary lives here: registry entries,
//! execution results, store snapshots and events, and the persisted
//! snippet/history records.

mod event;
mod execution;
mod font;
mod language;
mod record;
mod theme;

pub use event::*;
pub use execution::*;
pub use font::*;
pub use language::*;
pub use record::*;
pub use theme::*;
