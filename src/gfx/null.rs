use maths_rs::prelude::*;

use super::ClearColour;
use super::ClearFlags;
use super::DrawConstants;
use super::FrameInfo;
use super::LightInfo;
use super::MeshId;
use super::RasterInfo;
use super::Viewport;

use crate::Error;
use crate::camera::CameraConstants;
use crate::primitives::MeshData;

/// A single adapter call captured by the null `Device`
#[derive(Clone, Debug)]
pub enum Command {
    CreateMesh {
        name: String,
        id: MeshId,
        vertex_buffer_size: usize,
        index_count: u32
    },
    SetViewport {
        width: f32,
        height: f32
    },
    BeginFrame {
        clear_flags: ClearFlags,
        clear_colour: ClearColour,
        raster: RasterInfo,
        time: f32
    },
    SetCamera(CameraConstants),
    SetLights(LightInfo),
    BindMesh(MeshId),
    SetWorldTransform(Mat4f),
    DrawIndexed {
        mesh: MeshId,
        index_count: u32,
        constant_buffer_size: usize
    },
    EndFrame
}

struct NullMesh {
    name: String,
    index_count: u32
}

/// Device which keeps every call in `commands` rather than rendering. Used by tests and the headless client.
pub struct Device {
    pub commands: Vec<Command>,
    /// Keep only commands from the most recent frame, plus startup commands
    pub record_last_frame_only: bool,
    /// Fail `create_mesh` for a mesh with this name
    pub fail_create_mesh: Option<String>,
    /// Fail `begin_frame` for these zero based frame indices
    pub fail_frames: Vec<usize>,
    meshes: Vec<NullMesh>,
    startup_commands: usize,
    frame_index: usize,
    frames_presented: usize,
    bound_mesh: Option<MeshId>,
    camera: Option<CameraConstants>,
    lights: LightInfo,
    world: Mat4f,
    time: f32
}

impl Device {
    pub fn create() -> Self {
        Device {
            commands: Vec::new(),
            record_last_frame_only: false,
            fail_create_mesh: None,
            fail_frames: Vec::new(),
            meshes: Vec::new(),
            startup_commands: 0,
            frame_index: 0,
            frames_presented: 0,
            bound_mesh: None,
            camera: None,
            lights: LightInfo::default(),
            world: Mat4f::identity(),
            time: 0.0
        }
    }

    /// Number of frames which reached `end_frame`
    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    /// Name passed to `create_mesh` for `id`
    pub fn mesh_name(&self, id: MeshId) -> Option<&str> {
        self.meshes.get(id.0).map(|m| m.name.as_str())
    }

    /// Commands recorded since the last `begin_frame`
    pub fn last_frame(&self) -> &[Command] {
        let start = self.commands.iter()
            .rposition(|c| matches!(c, Command::BeginFrame { .. }))
            .unwrap_or(self.commands.len());
        &self.commands[start..]
    }
}

impl super::Device for Device {
    fn create_mesh(&mut self, name: &str, mesh: &MeshData) -> Result<MeshId, Error> {
        if self.fail_create_mesh.as_deref() == Some(name) {
            return Err(crate::err!("null device refused to create buffers for mesh `{}`", name));
        }
        if mesh.indices.is_empty() || mesh.vertices.is_empty() {
            return Err(crate::err!("mesh `{}` has no geometry", name));
        }
        let id = MeshId(self.meshes.len());
        self.meshes.push(NullMesh {
            name: name.to_string(),
            index_count: mesh.num_indices()
        });
        self.commands.push(Command::CreateMesh {
            name: name.to_string(),
            id,
            vertex_buffer_size: super::slice_as_u8_slice(&mesh.vertices).len(),
            index_count: mesh.num_indices()
        });
        self.startup_commands = self.commands.len();
        Ok(id)
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        self.commands.push(Command::SetViewport {
            width: viewport.width,
            height: viewport.height
        });
        self.startup_commands = self.commands.len();
    }

    fn begin_frame(&mut self, info: &FrameInfo) -> Result<(), Error> {
        let frame = self.frame_index;
        self.frame_index += 1;
        if self.fail_frames.contains(&frame) {
            return Err(crate::err!("null device lost on frame {}", frame));
        }
        if self.record_last_frame_only {
            self.commands.truncate(self.startup_commands);
        }
        self.bound_mesh = None;
        self.time = info.time;
        self.commands.push(Command::BeginFrame {
            clear_flags: info.clear_flags,
            clear_colour: info.clear_colour,
            raster: info.raster,
            time: info.time
        });
        Ok(())
    }

    fn set_camera(&mut self, camera: &CameraConstants) {
        self.camera = Some(*camera);
        self.commands.push(Command::SetCamera(*camera));
    }

    fn set_lights(&mut self, lights: &LightInfo) {
        self.lights = *lights;
        self.commands.push(Command::SetLights(*lights));
    }

    fn bind_mesh(&mut self, mesh: MeshId) {
        if mesh.0 >= self.meshes.len() {
            log::error!("bind_mesh: unknown mesh id {}", mesh.0);
        }
        self.bound_mesh = Some(mesh);
        self.commands.push(Command::BindMesh(mesh));
    }

    fn set_world_transform(&mut self, world: &Mat4f) {
        self.world = *world;
        self.commands.push(Command::SetWorldTransform(*world));
    }

    fn draw_indexed(&mut self, index_count: u32) {
        let mesh = match self.bound_mesh {
            Some(mesh) => mesh,
            None => {
                log::error!("draw_indexed: no mesh bound");
                return;
            }
        };
        if let Some(m) = self.meshes.get(mesh.0) {
            if index_count > m.index_count {
                log::error!("draw_indexed: {} indices requested from `{}` which has {}", index_count, m.name, m.index_count);
            }
        }
        let camera = match &self.camera {
            Some(camera) => camera,
            None => {
                log::error!("draw_indexed: no camera set");
                return;
            }
        };
        let constants = DrawConstants::new(&self.world, camera, &self.lights, self.time);
        self.commands.push(Command::DrawIndexed {
            mesh,
            index_count,
            constant_buffer_size: super::as_u8_slice(&constants).len()
        });
    }

    fn end_frame(&mut self) -> Result<(), Error> {
        self.frames_presented += 1;
        self.commands.push(Command::EndFrame);
        Ok(())
    }
}
