use serde::Serialize;

use crate::domain::Rgb;
use crate::math::Vec2;

/// Shape tags in the flat render buffer
pub const SHAPE_POLYGON: f32 = 0.0;
pub const SHAPE_CIRCLE: f32 = 1.0;

/// One faded copy of a particle along its trail
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrailDot {
    pub center: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Polygon { points: Vec<Vec2> },
    Circle { center: Vec2, radius: f32, trail: Vec<TrailDot> },
}

/// Pure draw data for one live entity; the renderer owns every API call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderShape {
    pub shape: Shape,
    pub color: Rgb,
    pub alpha: f32,
}

impl RenderShape {
    /// Append to a flat `f32` buffer for zero-copy hand-off to JS.
    ///
    /// Polygon: `0, r, g, b, a, n, x0, y0, ..`
    /// Circle:  `1, r, g, b, a, cx, cy, radius, m, (x, y, radius, alpha) * m`
    pub fn encode_flat(&self, out: &mut Vec<f32>) {
        let tag = match self.shape {
            Shape::Polygon { .. } => SHAPE_POLYGON,
            Shape::Circle { .. } => SHAPE_CIRCLE,
        };
        out.push(tag);
        out.extend_from_slice(&self.color);
        out.push(self.alpha);

        match &self.shape {
            Shape::Polygon { points } => {
                out.push(points.len() as f32);
                for p in points {
                    out.push(p.x);
                    out.push(p.y);
                }
            }
            Shape::Circle { center, radius, trail } => {
                out.push(center.x);
                out.push(center.y);
                out.push(*radius);
                out.push(trail.len() as f32);
                for dot in trail {
                    out.push(dot.center.x);
                    out.push(dot.center.y);
                    out.push(dot.radius);
                    out.push(dot.alpha);
                }
            }
        }
    }
}
