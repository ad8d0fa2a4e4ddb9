//! Block measurement and SVG path drawing.
//!
//! This crate turns blocks (read through the traits in
//! [`tenon_core::model`]) into SVG path strings, connection offsets and field
//! positions. Rendering is per block and bottom-up: children report their
//! sizes before a parent measures. The pipeline is:
//!
//! - **Constants**: geometric values and precomputed shape paths
//!   ([`constants::ConstantProvider`])
//! - **Measurement**: rows of measured elements ([`info::RenderInfo`]),
//!   with renderer-specific rules behind [`info::LayoutPolicy`]
//! - **Drawing**: outline/inline path assembly and write-back
//!   ([`drawer::Drawer`])
//! - **Export**: optional standalone SVG documents ([`export`])
//!
//! Three renderers ship in-tree: the base look ([`info::BasePolicy`]), the
//! classic bevelled look ([`geras`]) and the flat grid-aligned look
//! ([`zelos`]).
//!
//! ```
//! use tenon_core::model::simple::{Block, Field, Input};
//! use tenon_render::{ConstantProvider, info::BasePolicy, render_block};
//!
//! let mut constants = ConstantProvider::new();
//! constants.init();
//!
//! let block = Block::new()
//!     .with_previous()
//!     .with_input(Input::dummy().with_field(Field::label(40.0, 13.0)));
//! render_block(&block, &constants, &BasePolicy).unwrap();
//! assert!(block.paths().is_some());
//! ```

pub mod constants;
pub mod drawer;
pub mod error;
pub mod export;
pub mod geras;
pub mod info;
pub mod measurables;
pub mod paths;
pub mod types;
pub mod zelos;

pub use constants::ConstantProvider;
pub use drawer::Drawer;
pub use error::RenderError;
pub use info::{BasePolicy, LayoutPolicy, RenderInfo};

use log::debug;
use tenon_core::model::BlockLike;

/// Measures and draws one block, committing paths, connection offsets,
/// field positions and the rendered size to it.
pub fn render_block(
    block: &dyn BlockLike,
    constants: &ConstantProvider,
    policy: &dyn LayoutPolicy,
) -> Result<(), RenderError> {
    let mut info = RenderInfo::new(block, constants, policy)?;
    info.measure()?;
    Drawer::new(info)?.draw()?;
    debug!("block rendered");
    Ok(())
}
