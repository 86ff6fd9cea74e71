//! Rollercoaster track geometry.
//!
//! The track is a closed Catmull-Rom curve (tension 0.5) through six
//! control points. Cart progress is measured in arc length, so `0.5` is
//! always half-way round regardless of how the control points are spaced.

use glam::Vec3;
use serde::Serialize;

/// Control points relative to the coaster origin. The fourth point is the
/// top of the loop.
const CONTROL_POINTS: [Vec3; 6] = [
    Vec3::new(30.0, 0.0, 30.0),
    Vec3::new(0.0, 0.0, 30.0),
    Vec3::new(-30.0, 15.0, 0.0),
    Vec3::new(0.0, 45.0, -30.0),
    Vec3::new(30.0, 15.0, 0.0),
    Vec3::new(0.0, 0.0, 15.0),
];

const TENSION: f32 = 0.5;

/// Samples in the arc-length lookup table.
const ARC_DIVISIONS: usize = 200;

/// Seat offsets along the cart's forward axis, front seat last.
pub const SEAT_OFFSETS: [f32; 4] = [-1.5, -0.5, 0.5, 1.5];

/// Height of a seated rider above the track.
const SEAT_HEIGHT: f32 = 1.0;

/// Where the cart is and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartTransform {
    /// Cart centre on the track.
    pub position: Vec3,
    /// Unit tangent of the track.
    pub forward: Vec3,
    /// Heading around the vertical axis.
    pub yaw: f32,
}

impl CartTransform {
    /// World position of a rider in `seat`. Seats past the last wrap to it.
    pub fn seat(&self, seat: usize) -> Vec3 {
        let offset = SEAT_OFFSETS
            .get(seat)
            .or_else(|| SEAT_OFFSETS.last())
            .copied()
            .unwrap_or(0.0);
        self.position + self.forward * offset + Vec3::Y * SEAT_HEIGHT
    }
}

/// The closed coaster loop with its arc-length table.
#[derive(Debug, Clone)]
pub struct CoasterTrack {
    points: Vec<Vec3>,
    lengths: Vec<f32>,
}

impl CoasterTrack {
    /// Lay the track out around `origin`.
    pub fn new(origin: Vec3) -> Self {
        let points: Vec<Vec3> = CONTROL_POINTS.iter().map(|p| origin + *p).collect();
        let mut track = Self {
            points,
            lengths: Vec::with_capacity(ARC_DIVISIONS.saturating_add(1)),
        };
        track.lengths = track.arc_lengths();
        track
    }

    /// Total length of one lap.
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at arc-length fraction `u` in `[0, 1]`.
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at arc-length fraction `u`.
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        let t = self.u_to_t(u);
        let delta = 0.0001;
        let before = self.point((t - delta).max(0.0));
        let after = self.point((t + delta).min(1.0));
        (after - before).normalize_or(Vec3::Z)
    }

    /// Cart transform at arc-length fraction `u`.
    pub fn transform_at(&self, u: f32) -> CartTransform {
        let forward = self.tangent_at(u);
        CartTransform {
            position: self.point_at(u),
            forward,
            yaw: forward.x.atan2(forward.z),
        }
    }

    /// Point on the curve at raw parameter `t` in `[0, 1]`.
    fn point(&self, t: f32) -> Vec3 {
        let count = self.points.len();
        if count == 0 {
            return Vec3::ZERO;
        }
        let scaled = usize_f32(count) * t.clamp(0.0, 1.0);
        let segment = scaled.floor();
        let weight = scaled - segment;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let base = segment as usize;

        let at = |offset: usize| {
            let index = base.wrapping_add(offset).wrapping_add(count).wrapping_sub(1) % count;
            self.points.get(index).copied().unwrap_or(Vec3::ZERO)
        };
        catmull_rom(at(0), at(1), at(2), at(3), weight)
    }

    fn arc_lengths(&self) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(ARC_DIVISIONS.saturating_add(1));
        let mut total = 0.0;
        let mut last = self.point(0.0);
        lengths.push(0.0);
        for step in 1..=ARC_DIVISIONS {
            let current = self.point(usize_f32(step) / usize_f32(ARC_DIVISIONS));
            total += current.distance(last);
            lengths.push(total);
            last = current;
        }
        lengths
    }

    /// Map an arc-length fraction onto the curve parameter.
    fn u_to_t(&self, u: f32) -> f32 {
        let total = self.length();
        if total <= 0.0 {
            return u;
        }
        let target = u.clamp(0.0, 1.0) * total;
        let above = self.lengths.partition_point(|len| *len < target);
        let Some(index) = above.checked_sub(1) else {
            return 0.0;
        };
        let (Some(lo), Some(hi)) = (self.lengths.get(index), self.lengths.get(above)) else {
            return 1.0;
        };
        let span = hi - lo;
        let fraction = if span > 0.0 { (target - lo) / span } else { 0.0 };
        (usize_f32(index) + fraction) / usize_f32(ARC_DIVISIONS)
    }
}

/// Cardinal spline segment between `p1` and `p2`.
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t0 = (p2 - p0) * TENSION;
    let t1 = (p3 - p1) * TENSION;
    let c2 = p1 * -3.0 + p2 * 3.0 - t0 * 2.0 - t1;
    let c3 = p1 * 2.0 - p2 * 2.0 + t0 + t1;
    p1 + t0 * t + c2 * (t * t) + c3 * (t * t * t)
}

#[allow(clippy::cast_precision_loss)]
const fn usize_f32(value: usize) -> f32 {
    value as f32
}
