//! Renderer-independent view logic for the CodePad front-end: dropdown
//! placement and lifecycle, selector rows and the output panel.

mod dropdown;
mod output_view;
mod primitives;
mod selector;

pub use dropdown::*;
pub use output_view::*;
pub use primitives::*;
pub use selector::*;
