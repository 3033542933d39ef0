//! Render adapter for the placement reticle
//!
//! Translates the reticle's current geometry into calls on its [`RenderSurface`].

use super::surface::{Fill, IconState, LabelState, LineStyle, RenderSurface, TextureHandle};
use crate::geometry::template::TemplateGeometry;
use crate::geometry::utilities::round_to_step;
use bevy::prelude::*;

/// Outline thickness in pixels
pub const BORDER_THICKNESS: f32 = 3.0;

/// Outline opacity while the outline is shown
pub const OUTLINE_ALPHA: f32 = 0.75;

/// Gap in pixels between the bottom of the shape and the label
pub const LABEL_GAP: f32 = 5.0;

/// Default outline color
pub const BORDER_COLOR: Color = Color::srgb(1.0, 0.55, 0.1);

/// Control icon size for a grid cell size, in pixels
pub fn control_icon_size(cell_size: f32) -> f32 {
    round_to_step(cell_size * 0.5, 20.0, 40.0)
}

/// Label font size for a grid cell size, in pixels
pub fn label_font_size(cell_size: f32) -> f32 {
    ((cell_size * 0.36 * 12.0).round() / 12.0).max(36.0)
}

/// Everything the adapter needs to draw one frame of a reticle
#[derive(Debug, Clone)]
pub struct ReticleView<'a> {
    pub position: Vec2,
    pub direction: f32,
    pub geometry: &'a TemplateGeometry,
    pub texture: Option<&'a TextureHandle>,
    pub border_color: Color,
    pub draw_outline: bool,
    pub draw_icon: bool,
    pub hovered: bool,
    pub icon: &'a str,
    pub icon_image: Option<&'a TextureHandle>,
    pub label: &'a str,
    pub label_offset: Vec2,
    pub cell_size: f32,
}

/// Redraw the reticle onto `surface`
pub fn render_reticle(surface: &mut dyn RenderSurface, view: &ReticleView) {
    surface.set_position(view.position);
    surface.clear();
    surface.line_style(LineStyle {
        width: BORDER_THICKNESS,
        color: view.border_color,
        alpha: if view.draw_outline { OUTLINE_ALPHA } else { 0.0 },
    });
    surface.begin_fill(match view.texture {
        Some(texture) => Fill::Texture(texture.clone()),
        None => Fill::Transparent,
    });

    let shape_height = match view.geometry.circle() {
        Ok(circle) => {
            surface.draw_circle(circle);
            (circle.radius * 2.0) as f32 + BORDER_THICKNESS
        }
        Err(error) => {
            error!("{error}");
            0.0
        }
    };

    let size = control_icon_size(view.cell_size);
    surface.set_icon(IconState {
        texture: view.icon.to_string(),
        image: view.icon_image.cloned(),
        size,
        visible: view.draw_icon,
        border_visible: view.draw_icon && view.hovered,
        angle: view.direction,
    });

    let font_size = label_font_size(view.cell_size);
    let label_width = surface.measure_text(view.label, font_size);
    surface.set_label(LabelState {
        text: view.label.to_string(),
        font_size,
        offset: Vec2::new(
            -label_width / 2.0 + view.label_offset.x,
            shape_height / 2.0 + LABEL_GAP + view.label_offset.y,
        ),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::grid::SquareGrid;
    use crate::geometry::template::TemplateShape;
    use crate::rendering::surface::testing::{DrawCall, RecordingSurface};

    fn geometry(shape: TemplateShape) -> TemplateGeometry {
        let grid = SquareGrid::new(100.0, 5.0);
        TemplateGeometry::compute(shape, Vec2::new(150.0, 50.0), 45.0, 5.0, &grid)
    }

    fn view<'a>(geometry: &'a TemplateGeometry, texture: Option<&'a TextureHandle>) -> ReticleView<'a> {
        ReticleView {
            position: Vec2::new(150.0, 50.0),
            direction: 45.0,
            geometry,
            texture,
            border_color: BORDER_COLOR,
            draw_outline: true,
            draw_icon: true,
            hovered: false,
            icon: "icons/svg/dice-target.svg",
            icon_image: None,
            label: "Fireball",
            label_offset: Vec2::new(4.0, 2.0),
            cell_size: 100.0,
        }
    }

    #[test]
    fn test_sizes_follow_cell_size() {
        assert_eq!(control_icon_size(100.0), 60.0);
        assert_eq!(control_icon_size(50.0), 40.0);
        assert_eq!(label_font_size(50.0), 36.0);
        assert_eq!(label_font_size(200.0), 72.0);
    }

    #[test]
    fn test_render_draws_outline_and_label() {
        let geometry = geometry(TemplateShape::Circle);
        let mut surface = RecordingSurface::default();
        render_reticle(&mut surface, &view(&geometry, None));

        let calls = surface.calls();
        assert_eq!(calls[0], DrawCall::Position(Vec2::new(150.0, 50.0)));
        assert_eq!(calls[1], DrawCall::Clear);
        assert!(matches!(calls[2], DrawCall::Line(style) if style.alpha == OUTLINE_ALPHA));
        assert_eq!(calls[3], DrawCall::Fill(Fill::Transparent));
        assert!(matches!(calls[4], DrawCall::Circle(circle) if circle.radius == 100.0));

        // "Fireball" measures 80px; circle height is 200 + border
        let label = surface.last_label().expect("label drawn");
        assert_eq!(label.offset, Vec2::new(-40.0 + 4.0, 203.0 / 2.0 + LABEL_GAP + 2.0));

        let icon = surface.last_icon().expect("icon drawn");
        assert!(icon.visible);
        assert!(!icon.border_visible);
        assert_eq!(icon.angle, 45.0);
        assert_eq!(icon.image, None);
    }

    #[test]
    fn test_hidden_outline_and_texture_fill() {
        let geometry = geometry(TemplateShape::Circle);
        let texture = TextureHandle::new("tiles/fire.png");
        let icon_image = TextureHandle::new("icons/svg/dice-target.svg");
        let mut hidden = view(&geometry, Some(&texture));
        hidden.icon_image = Some(&icon_image);
        hidden.draw_outline = false;
        hidden.draw_icon = false;
        hidden.hovered = true;

        let mut surface = RecordingSurface::default();
        render_reticle(&mut surface, &hidden);

        let calls = surface.calls();
        assert!(matches!(calls[2], DrawCall::Line(style) if style.alpha == 0.0));
        assert_eq!(calls[3], DrawCall::Fill(Fill::Texture(texture.clone())));
        let icon = surface.last_icon().expect("icon state pushed");
        assert!(!icon.visible);
        assert!(!icon.border_visible);
        assert_eq!(icon.image, Some(icon_image));
    }

    #[test]
    fn test_unsupported_shape_skips_outline() {
        let geometry = geometry(TemplateShape::Rect);
        let mut surface = RecordingSurface::default();
        render_reticle(&mut surface, &view(&geometry, None));

        let calls = surface.calls();
        assert!(!calls.iter().any(|call| matches!(call, DrawCall::Circle(_))));
        // The label still renders, directly under the reticle center
        let label = surface.last_label().expect("label drawn");
        assert_eq!(label.offset.y, LABEL_GAP + 2.0);
    }
}
