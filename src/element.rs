//! Paint entry point for a path element in the layout tree.
//!
//! The layout engine owns visibility, phases, and the ancestor chain; this
//! module only needs narrow views of them. The nearest SVG root is handed in
//! as a [`ViewportSource`] so this code never walks the tree itself.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::geom::{Point, Rect, Size};
use crate::paint::{PaintContext, PaintStyle};
use crate::path::Path;
use crate::render::{PaintTarget, render};
use crate::surface::PaintSurface;
use crate::viewport::{ViewBox, ViewportTransform, resolve_transform_or_unit_scale};

/// Absolute layout box of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    pub position: Point,
    pub size: Size,
}

impl ElementBox {
    #[must_use]
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// The SVG root an element paints inside.
pub trait ViewportSource {
    /// Declared `viewBox`, if any.
    fn view_box(&self) -> Option<ViewBox>;

    /// Explicit `width` attribute.
    fn render_width(&self) -> Option<f64>;

    /// Explicit `height` attribute.
    fn render_height(&self) -> Option<f64>;

    /// The root's own absolute layout box.
    fn layout(&self) -> ElementBox;
}

/// Layout paint phases. Paths only draw in the foreground phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintPhase {
    Background,
    Border,
    Foreground,
    Outline,
}

/// A path element ready to paint: authored geometry plus its layout state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    pub path: Path,
    #[serde(default)]
    pub style: PaintStyle,
    pub layout: ElementBox,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl PathElement {
    #[must_use]
    pub fn new(path: Path, style: PaintStyle, layout: ElementBox) -> Self {
        Self { path, style, layout, visible: true }
    }

    /// Paint this element onto `surface`.
    ///
    /// `root` is the nearest enclosing SVG root; `None` paints in the
    /// element's own coordinates, clipped to its box.
    pub fn paint<S: PaintSurface + ?Sized>(
        &self,
        surface: &mut S,
        context: &PaintContext,
        phase: PaintPhase,
        root: Option<&dyn ViewportSource>,
        config: &RenderConfig,
    ) {
        if !self.visible {
            return;
        }
        if phase != PaintPhase::Foreground {
            return;
        }

        let (transform, clip) = match root {
            Some(root) => {
                let view_box = root.view_box();
                let transform =
                    resolve_transform_or_unit_scale(view_box.as_ref(), root.render_width(), root.render_height());
                // With a viewBox in effect the content is sized by the root's
                // rendered box, anchored at this element's position.
                let clip = if view_box.is_some() {
                    let root_size = root.layout().size;
                    let rendered = Size::new(
                        root.render_width().unwrap_or(root_size.width),
                        root.render_height().unwrap_or(root_size.height),
                    );
                    Rect::from_origin_size(self.layout.position, rendered)
                } else {
                    self.layout.rect()
                };
                (transform, clip)
            }
            None => (ViewportTransform::IDENTITY, self.layout.rect()),
        };

        let target = PaintTarget { offset: self.layout.position, clip };
        let paint = context.resolve(&self.style);
        render(surface, &self.path, &transform, &target, &paint, config);
    }
}
