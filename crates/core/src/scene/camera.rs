use glam::{Mat4, Vec3, Vec4};
use warpfolio_protocol::{Point, Viewport};

pub const FOV_Y_DEGREES: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;

/// A world point mapped onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Point,
    /// Distance in front of the camera along its view axis.
    pub depth: f64,
    /// Screen pixels covered by one world unit at this depth.
    pub pixels_per_unit: f64,
}

impl Projected {
    /// Screen radius of a sphere of `radius` world units at this depth.
    pub fn radius(&self, radius: f32) -> f64 {
        f64::from(radius) * self.pixels_per_unit
    }
}

/// Perspective camera on the Z axis, looking down −Z.
#[derive(Debug, Clone, Copy)]
pub struct SceneCamera {
    pub position: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl SceneCamera {
    pub fn at_depth(z: f64) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, z as f32),
            fov_y: FOV_Y_DEGREES.to_radians(),
            near: NEAR,
            far: FAR,
        }
    }

    pub fn view_projection(&self, viewport: &Viewport) -> Mat4 {
        let view = Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh_gl(
            self.fov_y,
            viewport.aspect() as f32,
            self.near,
            self.far,
        );
        proj * view
    }

    /// Project a world-space point, or `None` if it is behind the near
    /// plane or beyond the far plane.
    pub fn project(&self, world: Vec3, viewport: &Viewport) -> Option<Projected> {
        self.project_with(&self.view_projection(viewport), world, viewport)
    }

    /// Same as [`project`](Self::project) with a precomputed matrix, for
    /// hot loops over many points.
    pub fn project_with(&self, view_proj: &Mat4, world: Vec3, viewport: &Viewport) -> Option<Projected> {
        if viewport.is_empty() {
            return None;
        }
        let clip: Vec4 = *view_proj * world.extend(1.0);
        if clip.w < self.near || clip.w > self.far {
            return None;
        }
        let ndc = Vec3::new(clip.x, clip.y, clip.z) / clip.w;
        if !ndc.is_finite() {
            return None;
        }

        let x = (f64::from(ndc.x) * 0.5 + 0.5) * viewport.width;
        let y = (0.5 - f64::from(ndc.y) * 0.5) * viewport.height;
        let depth = f64::from(clip.w);
        let visible_height = 2.0 * f64::from((self.fov_y * 0.5).tan()) * depth;

        Some(Projected {
            screen: Point::new(x, y),
            depth,
            pixels_per_unit: viewport.height / visible_height,
        })
    }
}
