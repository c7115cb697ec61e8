use crate::Error;
use crate::OrreryInfo;
use crate::gfx;
use crate::camera::CameraInfo;
use crate::scene::{Scene, SceneInfo};
use crate::animator::SceneAnimator;
use crate::primitives;
use crate::time::TimeSource;

use serde::{Deserialize, Serialize};

use std::collections::HashMap;

/// Serialisable user overrides for the session, every field is optional
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub clear_colour: Option<(f32, f32, f32, f32)>,
    #[serde(default)]
    pub camera: Option<CameraInfo>,
    #[serde(default)]
    pub scene: Option<SceneInfo>,
    #[serde(default)]
    pub fixed_time_step: Option<f32>
}

impl UserConfig {
    /// Read a user config from json at `path`, a missing file gives the defaults
    pub fn load(path: &str) -> Result<UserConfig, Error> {
        if std::path::Path::new(path).exists() {
            let user_data = std::fs::read(path)?;
            let config = serde_json::from_slice(&user_data).map_err(|e| {
                crate::err!("failed to parse user config `{}`: {}", path, e)
            })?;
            log::info!("loaded user config: {}", path);
            Ok(config)
        }
        else {
            log::info!("no user config at `{}`, using defaults", path);
            Ok(UserConfig::default())
        }
    }
}

/// Client data members, owns the device and drives the animator once per frame
pub struct Client<D: gfx::Device> {
    pub device: D,
    pub animator: SceneAnimator,
    time: TimeSource,
    clear_colour: gfx::ClearColour,
    lights: gfx::LightInfo,
    frame_count: usize,
    skipped_frames: usize
}

impl<D> Client<D> where D: gfx::Device {
    /// Create meshes, resolve the scene and bake the camera. Any failure aborts before a frame is drawn.
    pub fn create(info: OrreryInfo, mut device: D) -> Result<Self, Error> {
        log::info!("creating {} ({}x{})", info.name, info.window_rect.width, info.window_rect.height);

        if info.window_rect.width <= 0 || info.window_rect.height <= 0 {
            return Err(crate::err!(
                "invalid client rect {}x{}", info.window_rect.width, info.window_rect.height
            ));
        }
        device.set_viewport(&gfx::Viewport::from(info.window_rect));

        // meshes
        let mut meshes = HashMap::new();
        let mesh_data = [
            ("cube", primitives::create_cube_mesh()),
            ("pyramid", primitives::create_pyramid_mesh())
        ];
        for (name, data) in &mesh_data {
            let id = device.create_mesh(name, data).map_err(|e| {
                crate::err!("failed to create mesh `{}`: {}", name, e.msg)
            })?;
            log::info!("created mesh `{}` with {} indices", name, data.num_indices());
            meshes.insert(name.to_string(), (id, data.num_indices()));
        }

        // scene
        let scene = Scene::create(&info.scene, &meshes).map_err(|e| {
            crate::err!("failed to build scene: {}", e.msg)
        })?;
        log::info!("scene has {} nodes", scene.len());

        // camera
        let camera = info.camera.constants(info.aspect());

        let time = match info.fixed_time_step {
            Some(step) => TimeSource::fixed_step(step),
            None => TimeSource::wall_clock()
        };

        Ok(Client {
            device,
            animator: SceneAnimator::create(scene, camera),
            time,
            clear_colour: info.clear_colour,
            lights: info.lights,
            frame_count: 0,
            skipped_frames: 0
        })
    }

    /// Sample time, tick the animator with `toggle` and submit the draw list
    pub fn run_frame(&mut self, toggle: bool) -> Result<(), Error> {
        let t = self.time.sample();
        let draw_list = self.animator.tick(t, toggle);
        self.frame_count += 1;
        self.animator.submit(&draw_list, &mut self.device, self.clear_colour, &self.lights)
    }

    /// Run `frames` frames asking `toggle` for the input state of each. A frame that fails is logged and skipped.
    pub fn run<F: FnMut(usize) -> bool>(&mut self, frames: usize, mut toggle: F) {
        for i in 0..frames {
            if let Err(err) = self.run_frame(toggle(i)) {
                log::error!("skipping frame {}: {}", i, err);
                self.skipped_frames += 1;
            }
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn skipped_frames(&self) -> usize {
        self.skipped_frames
    }
}
