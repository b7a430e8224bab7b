use glam::Vec2;

/// Linear falloff weight: 1 at the source, 0 at `radius` and beyond.
#[inline]
pub fn influence(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance >= radius {
        0.0
    } else {
        1.0 - distance / radius
    }
}

/// Displacement of `point` along the `source -> point` direction, scaled by
/// `(1 - d / radius) * strength`. Negative strength pulls toward the source.
///
/// Zero when the point sits exactly on the source or outside the radius.
#[inline]
pub fn radial_push(point: Vec2, source: Vec2, radius: f32, strength: f32) -> Vec2 {
    let delta = point - source;
    let distance = delta.length();
    if !(distance > 0.0) || distance >= radius {
        return Vec2::ZERO;
    }
    delta / distance * (influence(distance, radius) * strength)
}
