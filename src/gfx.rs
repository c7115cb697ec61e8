/// Null device which records adapter calls instead of talking to a gpu.
pub mod null;

use maths_rs::prelude::*;

use crate::Error;
use crate::Rect;
use crate::camera::CameraConstants;
use crate::primitives::MeshData;

/// Handle to a vertex / index buffer pair and its input layout, issued by `Device::create_mesh`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Colour to clear the back buffer to
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClearColour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl From<(f32, f32, f32, f32)> for ClearColour {
    fn from(rgba: (f32, f32, f32, f32)) -> ClearColour {
        ClearColour {
            r: rgba.0,
            g: rgba.1,
            b: rgba.2,
            a: rgba.3
        }
    }
}

bitflags! {
    /// Targets cleared at the start of a frame
    pub struct ClearFlags: u8 {
        const COLOUR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Polygon fill mode of the rasterizer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FillMode {
    Solid,
    Wireframe
}

/// Face culling mode of the rasterizer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CullMode {
    None,
    Front,
    Back
}

/// Rasterizer state set by `Device::begin_frame`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RasterInfo {
    pub fill_mode: FillMode,
    pub cull_mode: CullMode
}

pub struct Viewport {
    pub x : f32,
    pub y : f32,
    pub width : f32,
    pub height : f32,
    pub min_depth : f32,
    pub max_depth : f32
}

impl From<Rect<i32>> for Viewport {
    fn from(rect: Rect<i32>) -> Viewport {
        Viewport {
            x: rect.x as f32,
            y: rect.y as f32,
            width: rect.width as f32,
            height: rect.height as f32,
            min_depth: 0.0,
            max_depth: 1.0
        }
    }
}

/// Everything a device needs to start a frame
pub struct FrameInfo {
    pub clear_flags: ClearFlags,
    pub clear_colour: ClearColour,
    pub clear_depth: f32,
    pub clear_stencil: u8,
    pub raster: RasterInfo,
    /// Elapsed seconds, exposed to shaders as a constant
    pub time: f32
}

/// Material and light colours with a single directional light, shared by every draw in a frame
#[derive(Copy, Clone, Debug)]
pub struct LightInfo {
    pub diffuse_material: Vec4f,
    pub diffuse_light: Vec4f,
    /// Direction towards the light in world space
    pub light_dir: Vec3f,
    pub ambient_material: Vec4f,
    pub ambient_light: Vec4f,
    pub specular_material: Vec4f,
    pub specular_light: Vec4f,
    pub specular_power: f32
}

impl Default for LightInfo {
    fn default() -> Self {
        LightInfo {
            diffuse_material: vec4f(0.8, 0.5, 0.5, 1.0),
            diffuse_light: vec4f(1.0, 1.0, 1.0, 1.0),
            light_dir: vec3f(0.25, 0.5, -1.0),
            ambient_material: vec4f(0.2, 0.2, 0.2, 1.0),
            ambient_light: vec4f(0.2, 0.2, 0.2, 1.0),
            specular_material: vec4f(0.8, 0.8, 0.8, 1.0),
            specular_light: vec4f(0.5, 0.5, 0.5, 1.0),
            specular_power: 10.0
        }
    }
}

/// Per draw constant buffer layout matching the shaders, matrices are transposed for hlsl
#[repr(C)]
#[derive(Copy, Clone)]
pub struct DrawConstants {
    pub world: Mat4f,
    pub view: Mat4f,
    pub projection: Mat4f,
    pub diffuse_material: Vec4f,
    pub diffuse_light: Vec4f,
    pub light_dir: Vec3f,
    pub time: f32,
    pub ambient_material: Vec4f,
    pub ambient_light: Vec4f,
    pub specular_material: Vec4f,
    pub specular_light: Vec4f,
    pub specular_power: f32,
    pub eye_pos: Vec3f
}

impl DrawConstants {
    /// Pack the current camera, lights and world matrix into shader layout
    pub fn new(world: &Mat4f, camera: &CameraConstants, lights: &LightInfo, time: f32) -> Self {
        DrawConstants {
            world: world.transpose(),
            view: camera.view_matrix.transpose(),
            projection: camera.projection_matrix.transpose(),
            diffuse_material: lights.diffuse_material,
            diffuse_light: lights.diffuse_light,
            light_dir: lights.light_dir,
            time,
            ambient_material: lights.ambient_material,
            ambient_light: lights.ambient_light,
            specular_material: lights.specular_material,
            specular_light: lights.specular_light,
            specular_power: lights.specular_power,
            eye_pos: camera.view_position
        }
    }
}

/// Adapter to a graphics backend. Device bring-up, shaders, buffers and presentation live behind
/// this trait, the core only hands over ids, matrices and plain data.
pub trait Device: 'static + Sized {
    /// Create a vertex and index buffer pair for `mesh`, failure aborts startup
    fn create_mesh(&mut self, name: &str, mesh: &MeshData) -> Result<MeshId, Error>;
    /// Set the viewport covering the client area
    fn set_viewport(&mut self, viewport: &Viewport);
    /// Clear targets and set the rasterizer state for the frame
    fn begin_frame(&mut self, info: &FrameInfo) -> Result<(), Error>;
    /// Set view and projection, calling this every frame is valid
    fn set_camera(&mut self, camera: &CameraConstants);
    /// Set the lighting constants shared by all draws in the frame
    fn set_lights(&mut self, lights: &LightInfo);
    /// Bind the vertex buffer, index buffer and input layout of `mesh`
    fn bind_mesh(&mut self, mesh: MeshId);
    /// Upload the world matrix for the next draw
    fn set_world_transform(&mut self, world: &Mat4f);
    /// Draw `index_count` indices from the bound mesh
    fn draw_indexed(&mut self, index_count: u32);
    /// Present the back buffer
    fn end_frame(&mut self) -> Result<(), Error>;
}

/// Reinterpret `p` as bytes, used to upload `#[repr(C)]` data into buffers
pub fn as_u8_slice<T: Sized>(p: &T) -> &[u8] {
    unsafe {
        ::std::slice::from_raw_parts(
            (p as *const T) as *const u8,
            ::std::mem::size_of::<T>(),
        )
    }
}

/// Reinterpret a slice of `#[repr(C)]` elements as bytes
pub fn slice_as_u8_slice<T: Sized>(p: &[T]) -> &[u8] {
    unsafe {
        ::std::slice::from_raw_parts(
            p.as_ptr() as *const u8,
            ::std::mem::size_of_val(p),
        )
    }
}
