//! Standalone SVG document assembly.
//!
//! Hosts embedding the renderer normally consume the committed
//! [`tenon_core::model::BlockPaths`] directly and place them in their own
//! scene. For everything else, [`render_to_document`] measures and draws a
//! block and wraps the result in a self-contained `svg` document.
//!
//! Connection highlights are relative to the connection offsets recorded on
//! the block and are meant to be overlaid by the host, so the document
//! carries the block body only.

use log::debug;
use svg::Document;
use svg::node::element::{Group, Path};

use tenon_core::model::BlockLike;

use crate::constants::ConstantProvider;
use crate::drawer::Drawer;
use crate::error::RenderError;
use crate::info::{LayoutPolicy, RenderInfo};

/// Measures and draws `block`, returning it as an SVG document filled with
/// the named block style (or the default style when `style_name` is `None`
/// or unknown).
pub fn render_to_document(
    block: &dyn BlockLike,
    constants: &ConstantProvider,
    policy: &dyn LayoutPolicy,
    style_name: Option<&str>,
) -> Result<Document, RenderError> {
    let mut info = RenderInfo::new(block, constants, policy)?;
    info.measure()?;
    let width = info.width_with_children;
    let height = info.height;
    let block_paths = Drawer::new(info)?.draw()?;

    let style = constants.block_style(style_name);
    let mut path = Path::new()
        .set(
            "d",
            format!("{}\n{}", block_paths.outline, block_paths.inline),
        )
        .set("stroke", &style.colour_tertiary);
    if block.is_insertion_marker() {
        path = path
            .set("fill", &constants.insertion_marker_colour)
            .set("fill-opacity", constants.insertion_marker_opacity);
    } else {
        path = path.set("fill", &style.colour_primary);
    }

    let mut group = Group::new();
    if block_paths.flipped_rtl {
        group = group.set("transform", "scale(-1 1)");
    }
    group = group.add(path);

    let min_x = if block_paths.flipped_rtl { -width } else { 0.0 };
    let document = Document::new()
        .set("viewBox", format!("{min_x} 0 {width} {height}"))
        .set("width", width)
        .set("height", height)
        .add(group);
    debug!(width = width, height = height; "document assembled");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use tenon_core::model::simple::{Block, Field, Input};

    use crate::info::BasePolicy;

    use super::*;

    fn constants() -> ConstantProvider {
        let mut constants = ConstantProvider::new();
        constants.init();
        constants
    }

    fn dummy_block() -> Block {
        Block::new().with_input(Input::dummy().with_field(Field::label(40.0, 13.0)))
    }

    #[test]
    fn test_document_dimensions() {
        let constants = constants();
        let block = dummy_block();
        let document =
            render_to_document(&block, &constants, &BasePolicy, None).unwrap();
        let rendered = document.to_string();
        assert!(rendered.contains("<svg"));
        assert!(rendered.contains(r#"viewBox="0 0 50 35""#));
        assert!(rendered.contains("<path"));
    }

    #[test]
    fn test_rtl_document_is_mirrored() {
        let constants = constants();
        let block = dummy_block().with_rtl(true);
        let document =
            render_to_document(&block, &constants, &BasePolicy, None).unwrap();
        let rendered = document.to_string();
        assert!(rendered.contains("scale(-1 1)"));
        assert!(rendered.contains(r#"viewBox="-50 0 50 35""#));
    }

    #[test]
    fn test_insertion_marker_fill() {
        let constants = constants();
        let block = dummy_block().insertion_marker();
        let document =
            render_to_document(&block, &constants, &BasePolicy, None).unwrap();
        let rendered = document.to_string();
        assert!(rendered.contains("fill-opacity"));
    }

    #[test]
    fn test_uninitialized_constants_fail() {
        let constants = ConstantProvider::new();
        let block = dummy_block();
        assert!(matches!(
            render_to_document(&block, &constants, &BasePolicy, None),
            Err(RenderError::ShapesNotInitialized)
        ));
    }
}
