//! Plane geometry helpers for movement and clustering.

use rand::Rng;
use snowglobe_types::Position;

/// Move from `from` toward `to` by at most `max_step` pixels.
///
/// Arrives exactly on `to` when it is within reach.
pub fn step_toward(from: Position, to: Position, max_step: f32) -> Position {
    let distance = from.distance_to(to);
    if distance <= max_step || distance <= f32::EPSILON {
        return to;
    }
    let scale = max_step / distance;
    Position::new(
        (to.x - from.x).mul_add(scale, from.x),
        (to.y - from.y).mul_add(scale, from.y),
    )
}

/// A random wander step of at most `max_step` pixels on each axis.
pub fn random_step<R: Rng + ?Sized>(from: Position, max_step: f32, rng: &mut R) -> Position {
    if max_step <= 0.0 {
        return from;
    }
    let dx = rng.random_range(-max_step..=max_step);
    let dy = rng.random_range(-max_step..=max_step);
    Position::new(from.x + dx, from.y + dy)
}

/// Arithmetic mean of a set of positions. `None` when empty.
pub fn centroid(points: &[Position]) -> Option<Position> {
    if points.is_empty() {
        return None;
    }
    let (sx, sy) = points
        .iter()
        .fold((0.0_f32, 0.0_f32), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = f32::from(u16::try_from(points.len()).ok()?);
    Some(Position::new(sx / n, sy / n))
}

/// Offset a position by a fixed delta.
pub const fn offset(from: Position, dx: f32, dy: f32) -> Position {
    Position::new(from.x + dx, from.y + dy)
}
