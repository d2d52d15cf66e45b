use crate::render::{catmull_rom_closed, RenderShape, Shape, TrailDot};
use crate::systems::Particle;

use super::WorldCore;

const POINTER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

pub(super) fn collect_shapes(world: &WorldCore) -> Vec<RenderShape> {
    let config = &world.config;
    let mut shapes = Vec::with_capacity(world.blobs.len() + world.particles.len() + 1);

    for blob in &world.blobs {
        let ring: Vec<_> = blob.points().iter().map(|p| p.pos).collect();
        shapes.push(RenderShape {
            shape: Shape::Polygon {
                points: catmull_rom_closed(&ring, config.outline_segments),
            },
            color: blob.color,
            alpha: 1.0,
        });
    }

    for particle in &world.particles {
        shapes.push(particle_shape(particle, world.now, config.max_age, config.max_trail_age));
    }

    shapes.push(RenderShape {
        shape: Shape::Circle {
            center: world.pointer.pos,
            radius: world.pointer.radius,
            trail: Vec::new(),
        },
        color: POINTER_COLOR,
        alpha: config.pointer_alpha,
    });

    shapes
}

/// Circle fading out over its lifetime, trail dots shrinking with sample age.
fn particle_shape(particle: &Particle, now: f64, max_age: f64, max_trail_age: f64) -> RenderShape {
    let life = fraction(particle.age(now), max_age);
    let alpha = (1.0 - life).clamp(0.0, 1.0);
    let radius = particle.body.radius;

    let trail = particle
        .trail
        .iter()
        .filter_map(|sample| {
            let t = 1.0 - fraction(now - sample.time, max_trail_age);
            (t > 0.0).then(|| TrailDot {
                center: sample.pos,
                radius: radius * t,
                alpha: t * alpha,
            })
        })
        .collect();

    RenderShape {
        shape: Shape::Circle {
            center: particle.body.pos,
            radius,
            trail,
        },
        color: particle.color,
        alpha,
    }
}

fn fraction(age: f64, span: f64) -> f32 {
    if span <= 0.0 {
        return 1.0;
    }
    (age / span).clamp(0.0, 1.0) as f32
}

pub(super) fn extract_render_buffer(world: &mut WorldCore) -> usize {
    let shapes = collect_shapes(world);
    world.render_buffer.clear();
    for shape in &shapes {
        shape.encode_flat(&mut world.render_buffer);
    }
    world.render_buffer.len()
}
