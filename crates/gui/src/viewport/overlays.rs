//! Viewport painting: floor grid, scripted world, surface overlays, instances

use egui::{Color32, Painter, Pos2, Rect, Stroke};
use glam::{Mat4, Vec3};
use shared::Primitive;

use crate::anchor::SimulatedFeed;
use crate::state::settings::ViewportSettings;
use crate::state::AppState;

use super::camera::DeviceCamera;

const RING_SEGMENTS: usize = 24;

fn to_screen(camera: &DeviceCamera, rect: Rect, point: Vec3) -> Option<Pos2> {
    let local = camera.project(point, glam::Vec2::new(rect.width(), rect.height()))?;
    Some(Pos2::new(rect.min.x + local.x, rect.min.y + local.y))
}

/// Segment clipped to what is in front of the camera
fn line(painter: &Painter, rect: Rect, camera: &DeviceCamera, a: Vec3, b: Vec3, stroke: Stroke) {
    if let (Some(pa), Some(pb)) = (to_screen(camera, rect, a), to_screen(camera, rect, b)) {
        painter.line_segment([pa, pb], stroke);
    }
}

fn polyline(painter: &Painter, rect: Rect, camera: &DeviceCamera, points: &[Vec3], stroke: Stroke) {
    for pair in points.windows(2) {
        line(painter, rect, camera, pair[0], pair[1], stroke);
    }
}

/// Floor grid on y = 0
pub fn draw_grid(painter: &Painter, rect: Rect, camera: &DeviceCamera, settings: &ViewportSettings) {
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(90, 90, 100, 90));
    let size = settings.grid_size;
    let extent = size * settings.grid_range as f32;
    for i in -settings.grid_range..=settings.grid_range {
        let offset = i as f32 * size;
        line(painter, rect, camera, Vec3::new(offset, 0.0, -extent), Vec3::new(offset, 0.0, extent), stroke);
        line(painter, rect, camera, Vec3::new(-extent, 0.0, offset), Vec3::new(extent, 0.0, offset), stroke);
    }
}

/// The scripted world: plane outlines and image targets, detected or not
pub fn draw_world(painter: &Painter, rect: Rect, camera: &DeviceCamera, feed: &SimulatedFeed) {
    let plane_stroke = Stroke::new(1.0, Color32::from_gray(120));
    for plane in feed.planes() {
        let hx = plane.extent.x / 2.0;
        let hz = plane.extent.y / 2.0;
        let corners: Vec<Vec3> = [(-hx, -hz), (hx, -hz), (hx, hz), (-hx, hz), (-hx, -hz)]
            .iter()
            .map(|&(x, z)| plane.node.transform_point3(plane.center + Vec3::new(x, 0.0, z)))
            .collect();
        polyline(painter, rect, camera, &corners, plane_stroke);
    }

    for image in feed.images() {
        let color = if image.detected {
            Color32::from_rgb(80, 200, 120)
        } else {
            Color32::from_rgb(200, 200, 200)
        };
        let h = image.size / 2.0;
        let corners: Vec<Vec3> = [(-h, -h), (h, -h), (h, h), (-h, h), (-h, -h)]
            .iter()
            .map(|&(x, z)| image.node.transform_point3(Vec3::new(x, 0.0, z)))
            .collect();
        polyline(painter, rect, camera, &corners, Stroke::new(2.0, color));
        if let Some(label) = to_screen(camera, rect, image.node.transform_point3(Vec3::ZERO)) {
            painter.text(
                label,
                egui::Align2::CENTER_CENTER,
                &image.name,
                egui::FontId::proportional(11.0),
                color,
            );
        }
    }
}

/// Detected surfaces, filled while the overlay is shown
pub fn draw_surfaces(painter: &Painter, rect: Rect, camera: &DeviceCamera, state: &AppState) {
    let [r, g, b] = state.settings.overlay.color;
    let alpha = (state.settings.overlay.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    let fill = Color32::from_rgba_unmultiplied(r, g, b, alpha);

    for surface in state.session.surfaces().iter().filter(|s| !s.hidden) {
        let points: Option<Vec<Pos2>> = surface
            .corners()
            .iter()
            .map(|c| to_screen(camera, rect, *c))
            .collect();
        if let Some(points) = points {
            painter.add(egui::Shape::convex_polygon(points, fill, Stroke::new(1.0, fill.to_opaque())));
        }
    }
}

/// Wireframes of every visible instance
pub fn draw_instances(painter: &Painter, rect: Rect, camera: &DeviceCamera, state: &AppState) {
    let scale = state.session.placement_config().unit_scale;
    let latest = state.session.history().visible().last().map(|i| i.id.clone());

    for instance in state.session.history().visible() {
        let color = if Some(&instance.id) == latest.as_ref() {
            Color32::from_rgb(255, 210, 80)
        } else {
            Color32::from_rgb(120, 190, 255)
        };
        let stroke = Stroke::new(1.5, color);
        draw_primitive(painter, rect, camera, &instance.template.primitive, scale, &instance.transform, stroke);
    }
}

fn draw_primitive(
    painter: &Painter,
    rect: Rect,
    camera: &DeviceCamera,
    primitive: &Primitive,
    scale: f32,
    transform: &Mat4,
    stroke: Stroke,
) {
    let world = |p: Vec3| transform.transform_point3(p * scale);
    match primitive {
        Primitive::Cube { width, height, depth } => {
            let h = Vec3::new(*width as f32, *height as f32, *depth as f32) / 2.0;
            let corner = |i: usize| {
                world(Vec3::new(
                    if i & 1 == 0 { -h.x } else { h.x },
                    if i & 2 == 0 { -h.y } else { h.y },
                    if i & 4 == 0 { -h.z } else { h.z },
                ))
            };
            for i in 0..8 {
                for bit in [1, 2, 4] {
                    if i & bit == 0 {
                        line(painter, rect, camera, corner(i), corner(i | bit), stroke);
                    }
                }
            }
        }
        Primitive::Cylinder { radius, height } | Primitive::Cone { radius, height } => {
            let r = *radius as f32;
            let hh = *height as f32 / 2.0;
            let bottom = ring(r, -hh, Vec3::X, Vec3::Z);
            polyline(painter, rect, camera, &bottom.iter().map(|p| world(*p)).collect::<Vec<_>>(), stroke);
            if matches!(primitive, Primitive::Cone { .. }) {
                let apex = world(Vec3::new(0.0, hh, 0.0));
                for p in bottom.iter().step_by(RING_SEGMENTS / 4) {
                    line(painter, rect, camera, world(*p), apex, stroke);
                }
            } else {
                let top = ring(r, hh, Vec3::X, Vec3::Z);
                polyline(painter, rect, camera, &top.iter().map(|p| world(*p)).collect::<Vec<_>>(), stroke);
                for (b, t) in bottom.iter().zip(&top).step_by(RING_SEGMENTS / 4) {
                    line(painter, rect, camera, world(*b), world(*t), stroke);
                }
            }
        }
        Primitive::Sphere { radius } => {
            let r = *radius as f32;
            for (u, v) in [(Vec3::X, Vec3::Z), (Vec3::X, Vec3::Y), (Vec3::Y, Vec3::Z)] {
                let circle: Vec<Vec3> = ring(r, 0.0, u, v).into_iter().map(&world).collect();
                polyline(painter, rect, camera, &circle, stroke);
            }
        }
    }
}

/// Closed circle in the plane spanned by `u` and `v`, shifted by `y` along world Y
fn ring(radius: f32, y: f32, u: Vec3, v: Vec3) -> Vec<Vec3> {
    (0..=RING_SEGMENTS)
        .map(|i| {
            let a = i as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
            (u * a.cos() + v * a.sin()) * radius + Vec3::Y * y
        })
        .collect()
}

/// Screen center marker, where freeform placements appear
pub fn draw_crosshair(painter: &Painter, rect: Rect) {
    let c = rect.center();
    let stroke = Stroke::new(1.0, Color32::from_white_alpha(160));
    painter.line_segment([c - egui::vec2(8.0, 0.0), c + egui::vec2(8.0, 0.0)], stroke);
    painter.line_segment([c - egui::vec2(0.0, 8.0), c + egui::vec2(0.0, 8.0)], stroke);
}
