use crate::math::Vec2;

/// Closed Catmull-Rom outline through `points`.
///
/// Emits `segments + 1` samples per span. Fewer than four control points
/// cannot form a spline and are returned as-is.
pub fn catmull_rom_closed(points: &[Vec2], segments: usize) -> Vec<Vec2> {
    let n = points.len();
    if n < 4 || segments == 0 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(n * (segments + 1));
    for i in 0..n {
        let p0 = points[i % n];
        let p1 = points[(i + 1) % n];
        let p2 = points[(i + 2) % n];
        let p3 = points[(i + 3) % n];

        for j in 0..=segments {
            let t = j as f32 / segments as f32;
            let t2 = t * t;
            let t3 = t2 * t;
            let point = (p1 * 2.0
                + (p2 - p0) * t
                + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
                + (-p0 + p1 * 3.0 - p2 * 3.0 + p3) * t3)
                * 0.5;
            out.push(point);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spline_passes_through_control_points() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let out = catmull_rom_closed(&square, 4);
        assert_eq!(out.len(), 4 * 5);
        // Span 0 runs p1 -> p2
        assert_eq!(out[0], square[1]);
        assert_eq!(out[4], square[2]);
    }

    #[test]
    fn short_rings_are_returned_raw() {
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        assert_eq!(catmull_rom_closed(&tri, 20), tri.to_vec());
    }
}
