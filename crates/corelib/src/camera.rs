use crate::trackball::Trackball;
use crate::{Mat4, Vec2, Vec3, vec3};

/// Pan speed in world units per pixel of cursor motion.
const PAN_SPEED: f32 = 0.002;

/// Pointer buttons the camera reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Drag to orbit through the trackball.
    Rotate,
    /// Drag to slide the camera in the view plane.
    Pan,
}

/// Viewer camera: a trackball rotation behind a translated eye (right-handed).
#[derive(Clone, Copy, Debug)]
pub struct OrbitCamera {
    pub trackball: Trackball,
    pub position: Vec3,
    width: u32,
    height: u32,
    panning: bool,
    mouse_pos: Vec2,
}

impl OrbitCamera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            trackball: Trackball::new(),
            position: vec3(0.0, 0.0, 4.0),
            width: 1,
            height: 1,
            panning: false,
            mouse_pos: Vec2::ZERO,
        };
        camera.resize(width, height);
        camera
    }

    /// Viewport changed: refit the trackball sphere.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.trackball
            .fit_viewport(self.width as f32, self.height as f32);
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    #[inline]
    pub fn panning(&self) -> bool {
        self.panning
    }

    #[inline]
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    pub fn button(&mut self, button: PointerButton, pressed: bool) {
        match button {
            PointerButton::Rotate => {
                if pressed {
                    self.trackball.start_tracking(self.mouse_pos);
                } else {
                    self.trackball.stop_tracking();
                }
            }
            PointerButton::Pan => self.panning = pressed,
        }
    }

    pub fn cursor_moved(&mut self, pos: Vec2) {
        if self.trackball.tracking() {
            self.trackball.move_to(pos);
        }
        if self.panning {
            let delta = pos - self.mouse_pos;
            let up = Vec3::Y;
            let right = vec3(-1.0, 0.0, 0.0);
            self.position += PAN_SPEED * (up * delta.y + right * delta.x);
        }
        self.mouse_pos = pos;
    }

    /// Translation from the eye position, rotation from the trackball.
    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(-self.position) * self.trackball.matrix()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
