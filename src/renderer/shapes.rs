//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in viewport pixels (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segments used for circles and ellipses
pub const ROUND_SEGMENTS: u32 = 32;

/// Generate vertices for a filled axis-aligned ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Generate vertices for a filled rectangle with a vertical color gradient
pub fn gradient_rect(min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Generate vertices for a filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(min, max, color, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_stays_within_radii() {
        let center = Vec2::new(100.0, 50.0);
        let verts = ellipse(center, Vec2::new(28.0, 16.0), [1.0; 4], ROUND_SEGMENTS);
        assert_eq!(verts.len(), (ROUND_SEGMENTS * 3) as usize);
        for v in &verts {
            assert!((v.position[0] - center.x).abs() <= 28.0 + 1e-3);
            assert!((v.position[1] - center.y).abs() <= 16.0 + 1e-3);
        }
    }

    #[test]
    fn test_gradient_rect_colors() {
        let top = [1.0, 0.0, 0.0, 1.0];
        let bottom = [0.0, 0.0, 1.0, 1.0];
        let verts = gradient_rect(Vec2::ZERO, Vec2::new(10.0, 20.0), top, bottom);
        assert_eq!(verts.len(), 6);
        for v in &verts {
            let expected = if v.position[1] == 0.0 { top } else { bottom };
            assert_eq!(v.color, expected);
        }
    }
}
