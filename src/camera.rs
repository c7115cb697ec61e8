use maths_rs::prelude::*;
use serde::{Deserialize, Serialize};

/// Serialisable camera info, constant for a session
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct CameraInfo {
    pub eye: (f32, f32, f32),
    pub at: (f32, f32, f32),
    pub up: (f32, f32, f32),
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width / height, `None` takes the aspect of the client rect
    pub aspect: Option<f32>,
    pub near: f32,
    pub far: f32
}

/// Camera above the orrery looking down towards the sun
impl Default for CameraInfo {
    fn default() -> CameraInfo {
        CameraInfo {
            eye: (2.0, 8.0, 2.0),
            at: (0.0, 1.0, 0.0),
            up: (0.0, 1.0, 0.0),
            fov: 90.0,
            aspect: None,
            near: 0.01,
            far: 100.0
        }
    }
}

/// View and projection matrices baked from a `CameraInfo`
#[derive(Clone, Copy, Debug)]
pub struct CameraConstants {
    pub view_matrix: Mat4f,
    pub projection_matrix: Mat4f,
    pub view_projection_matrix: Mat4f,
    pub view_position: Vec3f
}

impl CameraInfo {
    /// Bake view and projection, `default_aspect` is used when `aspect` is `None`
    pub fn constants(&self, default_aspect: f32) -> CameraConstants {
        let eye = Vec3f::from(self.eye);
        let view = create_look_at_lh(eye, Vec3f::from(self.at), Vec3f::from(self.up));
        let aspect = self.aspect.unwrap_or(default_aspect);
        let proj = create_perspective_fov_lh(f32::deg_to_rad(self.fov), aspect, self.near, self.far);
        CameraConstants {
            view_matrix: view,
            projection_matrix: proj,
            view_projection_matrix: proj * view,
            view_position: eye
        }
    }
}

/// Left handed view matrix looking from `eye` towards `at`, +z points into the screen
pub fn create_look_at_lh(eye: Vec3f, at: Vec3f, up: Vec3f) -> Mat4f {
    let z = normalize(at - eye);
    let x = normalize(cross(up, z));
    let y = cross(z, x);
    Mat4f::from((
        Vec4f::new(x.x, x.y, x.z, -dot(x, eye)),
        Vec4f::new(y.x, y.y, y.z, -dot(y, eye)),
        Vec4f::new(z.x, z.y, z.z, -dot(z, eye)),
        Vec4f::new(0.0, 0.0, 0.0, 1.0)
    ))
}

/// Left handed perspective projection mapping view space z in [near, far] to depth [0, 1]
pub fn create_perspective_fov_lh(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4f {
    let y_scale = 1.0 / f32::tan(fov * 0.5);
    let x_scale = y_scale / aspect;
    let range = far / (far - near);
    Mat4f::from((
        Vec4f::new(x_scale, 0.0, 0.0, 0.0),
        Vec4f::new(0.0, y_scale, 0.0, 0.0),
        Vec4f::new(0.0, 0.0, range, -range * near),
        Vec4f::new(0.0, 0.0, 1.0, 0.0)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_matches_session_constants() {
        let info = CameraInfo::default();
        assert_eq!(info.eye, (2.0, 8.0, 2.0));
        assert_eq!(info.fov, 90.0);
        assert_eq!(info.near, 0.01);
        assert_eq!(info.far, 100.0);
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        let eye = vec3f(2.0, 8.0, 2.0);
        let view = create_look_at_lh(eye, vec3f(0.0, 1.0, 0.0), vec3f(0.0, 1.0, 0.0));
        let p = view * Vec4f::from((eye, 1.0));
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5 && p.z.abs() < 1e-5);
        assert!((p.w - 1.0).abs() < 1e-5);
    }
}
