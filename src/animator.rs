use maths_rs::prelude::*;

use crate::Error;
use crate::gfx;
use crate::camera::CameraConstants;
use crate::scene::Scene;

/// Rasterizer fill state toggled by user input
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RasterMode {
    Solid,
    Wireframe
}

impl RasterMode {
    pub fn toggled(self) -> Self {
        match self {
            RasterMode::Solid => RasterMode::Wireframe,
            RasterMode::Wireframe => RasterMode::Solid
        }
    }

    /// Rasterizer state for this mode, culling is always off so open meshes stay visible
    pub fn raster_info(self) -> gfx::RasterInfo {
        gfx::RasterInfo {
            fill_mode: match self {
                RasterMode::Solid => gfx::FillMode::Solid,
                RasterMode::Wireframe => gfx::FillMode::Wireframe
            },
            cull_mode: gfx::CullMode::None
        }
    }
}

/// Mutable per session state advanced once per tick
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameState {
    /// Elapsed seconds, never decreases
    pub time: f32,
    pub raster_mode: RasterMode
}

impl Default for FrameState {
    fn default() -> Self {
        FrameState {
            time: 0.0,
            raster_mode: RasterMode::Solid
        }
    }
}

/// One entry of a draw list: which mesh to bind, where to put it and how many indices to draw
#[derive(Copy, Clone, Debug)]
pub struct DrawCall {
    pub mesh: gfx::MeshId,
    pub world_matrix: Mat4f,
    pub index_count: u32
}

/// Ordered per frame draw calls, one per scene node in declaration order
pub type DrawList = Vec<DrawCall>;

/// Owns the scene and frame state, evaluates world matrices each tick and submits them to a `gfx::Device`
pub struct SceneAnimator {
    scene: Scene,
    camera: CameraConstants,
    frame: FrameState,
    world_matrices: Vec<Mat4f>
}

impl SceneAnimator {
    pub fn create(scene: Scene, camera: CameraConstants) -> Self {
        let world_matrices = vec![Mat4f::identity(); scene.len()];
        SceneAnimator {
            scene,
            camera,
            frame: FrameState::default(),
            world_matrices
        }
    }

    /// Advance to elapsed `time`, flip the raster mode if `toggle` is asserted and return the draw list.
    /// The toggle is level triggered, holding it flips the mode every tick.
    pub fn tick(&mut self, time: f32, toggle: bool) -> DrawList {
        if time >= self.frame.time {
            self.frame.time = time;
        }
        else {
            log::warn!("ignoring time {} which is earlier than the current time {}", time, self.frame.time);
        }

        if toggle {
            self.frame.raster_mode = self.frame.raster_mode.toggled();
            log::debug!("raster mode: {:?}", self.frame.raster_mode);
        }

        let t = self.frame.time;
        let mut draw_list = Vec::with_capacity(self.scene.len());
        for (i, node) in self.scene.nodes().iter().enumerate() {
            let local = node.local_transform.evaluate(t);
            // parents precede children so world_matrices[parent] is already this tick's value
            let world = match node.parent {
                Some(parent) => self.world_matrices[parent] * local,
                None => local
            };
            self.world_matrices[i] = world;
            draw_list.push(DrawCall {
                mesh: node.mesh,
                world_matrix: world,
                index_count: node.index_count
            });
        }

        log::trace!("tick t={} draws={}", t, draw_list.len());
        draw_list
    }

    /// Drive `device` through one frame: begin, camera, lights, then bind / transform / draw per entry and present
    pub fn submit<D: gfx::Device>(
        &self,
        draw_list: &[DrawCall],
        device: &mut D,
        clear_colour: gfx::ClearColour,
        lights: &gfx::LightInfo) -> Result<(), Error> {
        device.begin_frame(&gfx::FrameInfo {
            clear_flags: gfx::ClearFlags::COLOUR | gfx::ClearFlags::DEPTH | gfx::ClearFlags::STENCIL,
            clear_colour,
            clear_depth: 1.0,
            clear_stencil: 0,
            raster: self.frame.raster_mode.raster_info(),
            time: self.frame.time
        })?;

        device.set_camera(&self.camera);
        device.set_lights(lights);

        for draw in draw_list {
            device.bind_mesh(draw.mesh);
            device.set_world_transform(&draw.world_matrix);
            device.draw_indexed(draw.index_count);
        }

        device.end_frame()
    }

    pub fn frame_state(&self) -> &FrameState {
        &self.frame
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &CameraConstants {
        &self.camera
    }
}
