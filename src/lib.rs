/// Graphics backend adapter and plain data passed through it.
pub mod gfx;

/// Camera description and view / projection matrix construction.
pub mod camera;

/// Scene nodes, time parameterised local transforms and the node arena.
pub mod scene;

/// Per tick world matrix evaluation and draw list submission.
pub mod animator;

/// Geometry primitives
pub mod primitives;

/// Elapsed time sources for driving the animator.
pub mod time;

/// Startup and frame loop tying a device, scene and animator together.
pub mod client;

/// Use bitmask for flags
#[macro_use]
extern crate bitflags;

/// Generic errors for modules to define their own
pub struct Error {
    pub msg: String,
}

/// Generic debug for errors
impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::error::Error for Error {}

// std errors
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error {
            msg: err.to_string()
        }
    }
}

// config parsing errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error {
            msg: err.to_string()
        }
    }
}

/// Build an `Error` from a format string, `err!("missing mesh: {}", name)`
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error {
            msg: format!($($arg)*)
        }
    }
}

/// Window rectangle starting at the top left corner specified by x,y with the size of width and height.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

/// Information to create an orrery session which will create meshes, a scene, a camera and an animator
pub struct OrreryInfo {
    /// Name for the app and window title
    pub name: String,
    /// Client rect {pos_x pos_y, width, height}
    pub window_rect: Rect<i32>,
    /// Clear colour of the back buffer
    pub clear_colour: gfx::ClearColour,
    /// Camera description, the aspect is overridden by the `window_rect` when `None`
    pub camera: camera::CameraInfo,
    /// Scene description resolved against the meshes created at startup
    pub scene: scene::SceneInfo,
    /// Lighting constants uploaded alongside each draw
    pub lights: gfx::LightInfo,
    /// Use a fixed time step instead of the wall clock, value is seconds per frame
    pub fixed_time_step: Option<f32>
}

/// Session constants for the solar system demo
impl Default for OrreryInfo {
    fn default() -> Self {
        let window_rect = Rect {
            x: 0,
            y: 0,
            width: 640,
            height: 480
        };
        OrreryInfo {
            name: "DX11 Framework".to_string(),
            window_rect,
            clear_colour: gfx::ClearColour {
                r: 0.15,
                g: 0.0,
                b: 0.3,
                a: 1.0,
            },
            camera: camera::CameraInfo {
                aspect: Some(window_rect.width as f32 / window_rect.height as f32),
                ..Default::default()
            },
            scene: scene::SceneInfo::default(),
            lights: gfx::LightInfo::default(),
            fixed_time_step: None
        }
    }
}

impl OrreryInfo {
    /// Apply the overrides present in `config` on top of `self`
    pub fn with_user_config(mut self, config: client::UserConfig) -> Self {
        if let Some(colour) = config.clear_colour {
            self.clear_colour = gfx::ClearColour::from(colour);
        }
        if let Some(camera) = config.camera {
            self.camera = camera;
        }
        if let Some(scene) = config.scene {
            self.scene = scene;
        }
        if config.fixed_time_step.is_some() {
            self.fixed_time_step = config.fixed_time_step;
        }
        self
    }

    /// Aspect ratio of the client rect
    pub fn aspect(&self) -> f32 {
        self.window_rect.width as f32 / self.window_rect.height as f32
    }
}

/// Returns an asset path located next to the running executable, or `asset` itself if the executable path is unavailable
pub fn get_data_path(asset: &str) -> String {
    let exe_path = std::env::current_exe().ok();
    if let Some(dir) = exe_path.as_ref().and_then(|p| p.parent()) {
        dir.join(asset).to_string_lossy().to_string()
    }
    else {
        asset.to_string()
    }
}

/// Most commonly used re-exported types.
pub mod prelude {
    #[doc(hidden)]
    pub use crate::{
        Error,
        Rect,
        OrreryInfo,
        gfx,
        gfx::Device,
        camera::{CameraInfo, CameraConstants},
        scene::{Axis, TransformOp, LocalTransform, Node, Scene, NodeInfo, SceneInfo},
        animator::{SceneAnimator, RasterMode, FrameState, DrawCall, DrawList},
        primitives,
        time::TimeSource,
        client::{Client, UserConfig},
    };
}
