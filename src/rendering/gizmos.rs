//! Bevy implementation of the reticle drawing primitives
//!
//! A [`GizmoSurface`] records the latest frame a reticle pushed to it. Systems
//! then draw the outline of those frames every update with gizmos, and keep the
//! label, texture fill and icon of each frame in sync as entities.

use super::surface::{Fill, IconState, LabelState, LineStyle, RenderSurface, TextureHandle, TextureLoader};
use crate::core::errors::ReticleError;
use bevy::color::Alpha;
use bevy::math::primitives::Circle as Disk;
use bevy::math::{Isometry2d, Rot2};
use bevy::prelude::*;
use bevy::render::mesh::Mesh2d;
use bevy::sprite::{Anchor, ColorMaterial, MeshMaterial2d};
use kurbo::Circle;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Average glyph advance as a fraction of the font size
const GLYPH_ADVANCE: f32 = 0.55;

// Z layers of the reticle parts
const FILL_Z: f32 = 5.0;
const ICON_Z: f32 = 15.0;
const LABEL_Z: f32 = 20.0;

const HOVER_BORDER_COLOR: Color = Color::srgb(1.0, 0.5, 0.0);

/// The most recent drawing state of one reticle
#[derive(Debug, Clone, Default)]
pub struct SurfaceFrame {
    pub position: Vec2,
    pub line: Option<LineStyle>,
    pub fill: Fill,
    pub circles: Vec<Circle>,
    pub label: Option<LabelState>,
    pub icon: Option<IconState>,
    pub detached: bool,
}

/// [`RenderSurface`] writing into a frame shared with [`GizmoFrames`]
#[derive(Debug, Clone, Default)]
pub struct GizmoSurface {
    frame: Arc<Mutex<SurfaceFrame>>,
}

impl GizmoSurface {
    fn frame(&self) -> MutexGuard<'_, SurfaceFrame> {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RenderSurface for GizmoSurface {
    fn set_position(&mut self, position: Vec2) {
        self.frame().position = position;
    }

    fn clear(&mut self) {
        let mut frame = self.frame();
        frame.circles.clear();
        frame.line = None;
        frame.fill = Fill::Transparent;
    }

    fn line_style(&mut self, style: LineStyle) {
        self.frame().line = Some(style);
    }

    fn begin_fill(&mut self, fill: Fill) {
        self.frame().fill = fill;
    }

    fn draw_circle(&mut self, circle: Circle) {
        self.frame().circles.push(circle);
    }

    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * GLYPH_ADVANCE
    }

    fn set_label(&mut self, label: LabelState) {
        self.frame().label = Some(label);
    }

    fn set_icon(&mut self, icon: IconState) {
        self.frame().icon = Some(icon);
    }

    fn detach(&mut self) {
        self.frame().detached = true;
    }
}

/// An entity showing a texture, respawned when the texture changes
#[derive(Debug, Clone)]
struct TexturedEntity {
    entity: Entity,
    texture: TextureHandle,
}

struct FrameSlot {
    frame: Arc<Mutex<SurfaceFrame>>,
    label_entity: Option<Entity>,
    fill: Option<TexturedEntity>,
    icon: Option<TexturedEntity>,
}

impl FrameSlot {
    fn despawn_all(&mut self, commands: &mut Commands) {
        let textured = [self.fill.take(), self.icon.take()];
        let entities = textured
            .into_iter()
            .flatten()
            .map(|textured| textured.entity)
            .chain(self.label_entity.take());
        for entity in entities {
            commands.entity(entity).despawn();
        }
    }
}

/// Frames of every reticle surface created for the Bevy host
#[derive(Resource, Default)]
pub struct GizmoFrames {
    slots: Vec<FrameSlot>,
    unit_disk: Option<Handle<Mesh>>,
}

impl GizmoFrames {
    /// Create a surface whose frames are drawn by [`draw_reticle_frames`]
    pub fn create_surface(&mut self) -> GizmoSurface {
        let surface = GizmoSurface::default();
        self.slots.push(FrameSlot {
            frame: Arc::clone(&surface.frame),
            label_entity: None,
            fill: None,
            icon: None,
        });
        surface
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Loads textures through the Bevy [`AssetServer`]
///
/// `root` is the directory the server's `AssetPlugin` reads from. Paths missing
/// under it are reported as load failures so the caller can fall back.
#[derive(Clone)]
pub struct AssetTextureLoader {
    server: AssetServer,
    root: PathBuf,
}

impl AssetTextureLoader {
    pub fn new(server: AssetServer, root: impl Into<PathBuf>) -> Self {
        Self {
            server,
            root: root.into(),
        }
    }
}

impl TextureLoader for AssetTextureLoader {
    fn load(&self, path: &str) -> Result<TextureHandle, ReticleError> {
        let full_path = self.root.join(path);
        if !full_path.is_file() {
            return Err(ReticleError::TextureLoadFailure {
                path: path.to_string(),
                reason: format!("{} is not a file", full_path.display()),
            });
        }

        debug!("Loading texture {}", full_path.display());
        let image: Handle<Image> = self.server.load(path.to_string());
        Ok(TextureHandle::with_image(path, image))
    }
}

/// Flip a local offset (y down) into Bevy world space (y up)
fn to_world_offset(offset: Vec2) -> Vec2 {
    Vec2::new(offset.x, -offset.y)
}

/// World position of a circle drawn relative to the frame origin
fn circle_center(frame: &SurfaceFrame, circle: &Circle) -> Vec2 {
    frame.position + to_world_offset(Vec2::new(circle.center.x as f32, circle.center.y as f32))
}

/// Screen rotation is clockwise with y down; world rotation is counter-clockwise
fn icon_rotation(icon: &IconState) -> Rot2 {
    Rot2::degrees(-icon.angle)
}

/// Draw the outline and icon marker of every attached frame
///
/// Icons whose image is missing or not decoded yet are drawn as a cross rotated
/// to the reticle direction. Hovered icons get a square border.
pub fn draw_reticle_frames(
    frames: Res<GizmoFrames>,
    images: Option<Res<Assets<Image>>>,
    mut gizmos: Gizmos,
) {
    for slot in &frames.slots {
        let frame = slot.frame.lock().unwrap_or_else(PoisonError::into_inner);
        if frame.detached {
            continue;
        }

        if let Some(line) = frame.line.filter(|line| line.alpha > 0.0) {
            let color = line.color.with_alpha(line.alpha);
            for circle in &frame.circles {
                let center = circle_center(&frame, circle);
                gizmos.circle_2d(Isometry2d::from_translation(center), circle.radius as f32, color);
            }
        }

        let Some(icon) = frame.icon.as_ref().filter(|icon| icon.visible) else {
            continue;
        };
        let rotation = icon_rotation(icon);
        let image_ready = match (icon.image.as_ref(), images.as_ref()) {
            (Some(texture), Some(images)) => images.contains(texture.image.id()),
            _ => false,
        };
        if !image_ready {
            let half = icon.size / 2.0;
            gizmos.line_2d(
                frame.position + rotation * Vec2::new(-half, 0.0),
                frame.position + rotation * Vec2::new(half, 0.0),
                Color::WHITE,
            );
            gizmos.line_2d(
                frame.position + rotation * Vec2::new(0.0, -half),
                frame.position + rotation * Vec2::new(0.0, half),
                Color::WHITE,
            );
        }
        if icon.border_visible {
            gizmos.rect_2d(
                Isometry2d::new(frame.position, rotation),
                Vec2::splat(icon.size),
                HOVER_BORDER_COLOR,
            );
        }
    }
}

/// Despawn `current` unless it already shows `wanted`; returns the entity kept
fn retire_stale(
    commands: &mut Commands,
    current: &mut Option<TexturedEntity>,
    wanted: Option<&TextureHandle>,
) -> Option<Entity> {
    match current {
        Some(textured) if Some(&textured.texture) == wanted => Some(textured.entity),
        _ => {
            if let Some(stale) = current.take() {
                commands.entity(stale.entity).despawn();
            }
            None
        }
    }
}

/// Keep label, fill and icon entities in sync with frames, despawning detached ones
pub fn sync_reticle_entities(
    mut commands: Commands,
    mut frames: ResMut<GizmoFrames>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut labels: Query<(&mut Text2d, &mut TextFont)>,
    mut icons: Query<(&mut Sprite, &mut Visibility)>,
    mut transforms: Query<&mut Transform>,
) {
    let GizmoFrames { slots, unit_disk } = &mut *frames;
    let unit_disk = unit_disk
        .get_or_insert_with(|| meshes.add(Disk::new(0.5)))
        .clone();

    slots.retain_mut(|slot| {
        let frame = slot
            .frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if frame.detached {
            slot.despawn_all(&mut commands);
            return false;
        }

        // Label
        if let Some(label) = frame.label.as_ref() {
            let translation = (frame.position + to_world_offset(label.offset)).extend(LABEL_Z);
            let existing = slot
                .label_entity
                .filter(|entity| labels.contains(*entity));
            match existing {
                Some(entity) => {
                    if let Ok((mut text, mut font)) = labels.get_mut(entity) {
                        if text.0 != label.text {
                            text.0 = label.text.clone();
                        }
                        font.font_size = label.font_size;
                    }
                    if let Ok(mut transform) = transforms.get_mut(entity) {
                        transform.translation = translation;
                    }
                }
                None => {
                    let entity = commands
                        .spawn((
                            Text2d::new(label.text.clone()),
                            TextFont {
                                font_size: label.font_size,
                                ..default()
                            },
                            Anchor::TopLeft,
                            Transform::from_translation(translation),
                        ))
                        .id();
                    slot.label_entity = Some(entity);
                }
            }
        }

        // Texture fill clipped to the outline circle
        let fill = match (&frame.fill, frame.circles.first()) {
            (Fill::Texture(texture), Some(circle)) => Some((texture, circle)),
            _ => None,
        };
        match fill {
            Some((texture, circle)) => {
                let diameter = circle.radius as f32 * 2.0;
                let transform =
                    Transform::from_translation(circle_center(&frame, circle).extend(FILL_Z))
                        .with_scale(Vec3::new(diameter, diameter, 1.0));
                match retire_stale(&mut commands, &mut slot.fill, Some(texture)) {
                    Some(entity) => {
                        if let Ok(mut current) = transforms.get_mut(entity) {
                            *current = transform;
                        }
                    }
                    None => {
                        let material = materials.add(ColorMaterial {
                            texture: Some(texture.image.clone()),
                            ..default()
                        });
                        let entity = commands
                            .spawn((Mesh2d(unit_disk.clone()), MeshMaterial2d(material), transform))
                            .id();
                        slot.fill = Some(TexturedEntity {
                            entity,
                            texture: texture.clone(),
                        });
                    }
                }
            }
            None => {
                retire_stale(&mut commands, &mut slot.fill, None);
            }
        }

        // Icon
        let icon = frame
            .icon
            .as_ref()
            .and_then(|icon| icon.image.as_ref().map(|image| (icon, image)));
        match icon {
            Some((icon, image)) => {
                let transform = Transform::from_translation(frame.position.extend(ICON_Z))
                    .with_rotation(Quat::from_rotation_z(icon_rotation(icon).as_radians()));
                let visibility = if icon.visible {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
                let size = Vec2::splat(icon.size);
                match retire_stale(&mut commands, &mut slot.icon, Some(image)) {
                    Some(entity) => {
                        if let Ok((mut sprite, mut current)) = icons.get_mut(entity) {
                            sprite.custom_size = Some(size);
                            *current = visibility;
                        }
                        if let Ok(mut current) = transforms.get_mut(entity) {
                            *current = transform;
                        }
                    }
                    None => {
                        let entity = commands
                            .spawn((
                                Sprite {
                                    image: image.image.clone(),
                                    custom_size: Some(size),
                                    ..default()
                                },
                                transform,
                                visibility,
                            ))
                            .id();
                        slot.icon = Some(TexturedEntity {
                            entity,
                            texture: image.clone(),
                        });
                    }
                }
            }
            None => {
                retire_stale(&mut commands, &mut slot.icon, None);
            }
        }

        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::AssetPlugin;

    fn host_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Image>()
            .init_asset::<Mesh>()
            .init_asset::<ColorMaterial>()
            .init_resource::<GizmoFrames>()
            .add_systems(Update, sync_reticle_entities);
        app
    }

    fn icon(image: Option<TextureHandle>, visible: bool) -> IconState {
        IconState {
            texture: "icons/target.png".to_string(),
            image,
            size: 60.0,
            visible,
            border_visible: false,
            angle: 90.0,
        }
    }

    fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
        let mut query = app.world_mut().query_filtered::<Entity, F>();
        query.iter(app.world()).count()
    }

    #[test]
    fn test_surface_records_latest_frame() {
        let mut frames = GizmoFrames::default();
        let mut surface = frames.create_surface();

        surface.set_position(Vec2::new(150.0, 50.0));
        surface.draw_circle(Circle::new((0.0, 0.0), 100.0));
        surface.draw_circle(Circle::new((0.0, 0.0), 50.0));
        surface.clear();
        surface.draw_circle(Circle::new((0.0, 0.0), 75.0));

        let frame = frames.slots[0].frame.lock().unwrap();
        assert_eq!(frame.position, Vec2::new(150.0, 50.0));
        assert_eq!(frame.circles, vec![Circle::new((0.0, 0.0), 75.0)]);
        assert!(!frame.detached);
    }

    #[test]
    fn test_detach_marks_frame() {
        let mut frames = GizmoFrames::default();
        let mut surface = frames.create_surface();
        surface.detach();
        assert!(frames.slots[0].frame.lock().unwrap().detached);
    }

    #[test]
    fn test_asset_loader_loads_through_server() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("tiles")).expect("create tiles");
        std::fs::write(dir.path().join("tiles/fire.png"), b"png").expect("write texture");

        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin {
                file_path: dir.path().to_string_lossy().into_owned(),
                ..default()
            },
        ))
        .init_asset::<Image>();
        let server = app.world().resource::<AssetServer>().clone();

        let loader = AssetTextureLoader::new(server.clone(), dir.path());
        let texture = loader.load("tiles/fire.png").expect("texture on disk");
        assert_eq!(texture.path, "tiles/fire.png");
        assert!(texture.image.is_strong());
        assert_eq!(
            server
                .get_path(texture.image.id())
                .map(|path| path.path().to_path_buf()),
            Some(PathBuf::from("tiles/fire.png"))
        );

        assert!(matches!(
            loader.load("tiles/ice.png"),
            Err(ReticleError::TextureLoadFailure { .. })
        ));
    }

    #[test]
    fn test_sync_spawns_fill_and_icon_entities() {
        let mut app = host_app();
        let mut surface = app
            .world_mut()
            .resource_mut::<GizmoFrames>()
            .create_surface();

        surface.set_position(Vec2::new(150.0, 50.0));
        surface.begin_fill(Fill::Texture(TextureHandle::new("tiles/fire.png")));
        surface.draw_circle(Circle::new((10.0, 20.0), 100.0));
        surface.set_label(LabelState {
            text: "Fireball".to_string(),
            font_size: 18.0,
            offset: Vec2::new(-40.0, 105.0),
        });
        surface.set_icon(icon(Some(TextureHandle::new("icons/target.png")), true));
        app.update();

        let mut fills = app
            .world_mut()
            .query_filtered::<&Transform, With<Mesh2d>>();
        let fills: Vec<Transform> = fills.iter(app.world()).copied().collect();
        assert_eq!(fills.len(), 1);
        // The fill follows the circle center, flipped into world space
        assert_eq!(fills[0].translation, Vec3::new(160.0, 30.0, FILL_Z));
        assert_eq!(fills[0].scale, Vec3::new(200.0, 200.0, 1.0));

        let mut icons = app.world_mut().query::<(&Sprite, &Visibility)>();
        let icons: Vec<(Option<Vec2>, Visibility)> = icons
            .iter(app.world())
            .map(|(sprite, visibility)| (sprite.custom_size, *visibility))
            .collect();
        assert_eq!(icons, vec![(Some(Vec2::splat(60.0)), Visibility::Inherited)]);
        assert_eq!(count::<With<Text2d>>(&mut app), 1);

        // Hiding the icon keeps its entity
        surface.set_icon(icon(Some(TextureHandle::new("icons/target.png")), false));
        app.update();
        let mut visibility = app.world_mut().query_filtered::<&Visibility, With<Sprite>>();
        assert_eq!(
            visibility.iter(app.world()).copied().collect::<Vec<_>>(),
            vec![Visibility::Hidden]
        );

        surface.detach();
        app.update();
        assert_eq!(count::<With<Mesh2d>>(&mut app), 0);
        assert_eq!(count::<With<Sprite>>(&mut app), 0);
        assert_eq!(count::<With<Text2d>>(&mut app), 0);
        assert!(app.world().resource::<GizmoFrames>().is_empty());
    }

    #[test]
    fn test_sync_without_images_spawns_no_sprites() {
        let mut app = host_app();
        let mut surface = app
            .world_mut()
            .resource_mut::<GizmoFrames>()
            .create_surface();

        surface.begin_fill(Fill::Transparent);
        surface.draw_circle(Circle::new((0.0, 0.0), 100.0));
        surface.set_icon(icon(None, true));
        app.update();

        assert_eq!(count::<With<Mesh2d>>(&mut app), 0);
        assert_eq!(count::<With<Sprite>>(&mut app), 0);
        assert_eq!(app.world().resource::<GizmoFrames>().len(), 1);
    }
}
