//! Arcball controller: maps 2D pointer drags to an accumulated 3D rotation.
//!
//! Pointer coordinates are in the same space as `center`/`radius`
//! (pixels, origin top-left, Y down).

use crate::{Mat4, Quat, Vec2, Vec3, vec3};

/// Project a screen point onto the virtual sphere, returning a unit vector.
///
/// Inside the projected disk the height is `r2/sqrt(r2) + sqrt(r2 - d2)`;
/// outside it falls off hyperbolically as `r2/sqrt(d2)`.
pub fn point_to_sphere(point: Vec2, radius: f32, center: Vec2) -> Vec3 {
    let x = point.x - center.x;
    let y = center.y - point.y;

    let rad2 = radius * radius;
    let screen_rad2 = x * x + y * y;

    let z = if screen_rad2 < rad2 {
        rad2 / rad2.sqrt() + (rad2 - screen_rad2).sqrt()
    } else {
        rad2 / screen_rad2.sqrt()
    };

    // radius == 0 at the center gives 0/0; keep the state finite.
    vec3(x, y, z).normalize_or(Vec3::Z)
}

/// Stateful arcball. One per view; driven by press/move/release.
#[derive(Clone, Copy, Debug)]
pub struct Trackball {
    speed: f32,
    radius: f32,
    center: Vec2,
    tracking: bool,
    previous_point: Vec3,
    orientation: Quat,
}

impl Default for Trackball {
    fn default() -> Self {
        Self::new()
    }
}

impl Trackball {
    pub const DEFAULT_SPEED: f32 = 2.0;

    pub const fn new() -> Self {
        Self {
            speed: Self::DEFAULT_SPEED,
            radius: 1.0,
            center: Vec2::ZERO,
            tracking: false,
            previous_point: Vec3::Z,
            orientation: Quat::IDENTITY,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Non-positive radii are accepted; rotation direction is then unspecified.
    #[inline]
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    #[inline]
    pub fn tracking(&self) -> bool {
        self.tracking
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Size the virtual sphere to a viewport: radius = max(w, h) / 2, centered.
    pub fn fit_viewport(&mut self, width: f32, height: f32) {
        self.radius = width.max(height) / 2.0;
        self.center = Vec2::new(width / 2.0, height / 2.0);
    }

    pub fn start_tracking(&mut self, point: Vec2) {
        self.previous_point = point_to_sphere(point, self.radius, self.center);
        self.tracking = true;
    }

    /// Rotate by the arc between the previous and current sphere points.
    /// No-op unless tracking.
    pub fn move_to(&mut self, point: Vec2) {
        if !self.tracking {
            return;
        }

        let current_point = point_to_sphere(point, self.radius, self.center);
        let axis = self.previous_point.cross(current_point);
        let sin_angle = axis.length();

        // Zero axis: no motion or parallel projections.
        if sin_angle > 0.0 && sin_angle.is_finite() {
            let angle = self.speed * sin_angle.clamp(-1.0, 1.0).asin();
            let q = Quat::from_axis_angle(axis / sin_angle, angle).normalize();
            // New rotation on the left.
            self.orientation = (q * self.orientation).normalize();
        }

        self.previous_point = current_point;
    }

    pub fn stop_tracking(&mut self) {
        self.tracking = false;
    }

    /// Back to identity orientation, not tracking.
    pub fn reset(&mut self) {
        self.orientation = Quat::IDENTITY;
        self.tracking = false;
    }

    /// Rotation matrix for the current orientation.
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }
}
