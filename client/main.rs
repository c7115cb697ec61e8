use orrery_rs::*;
use orrery_rs::client::*;

use clap::Parser;

/// Headless orrery runner, animates the scene and submits draw lists to the null device
#[derive(Parser, Debug)]
#[clap(name = "client", version)]
struct Args {
    /// Number of frames to run
    #[clap(long, default_value_t = 600)]
    frames: usize,
    /// Path to a json user config, defaults to `user_config.json` next to the executable
    #[clap(long)]
    config: Option<String>,
    /// Advance time by a fixed step per frame instead of the wall clock
    #[clap(long)]
    fixed_step: bool,
    /// Assert the wireframe toggle every n frames
    #[clap(long)]
    toggle_every: Option<usize>
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(|| get_data_path("user_config.json"));
    let user_config = match UserConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut info = OrreryInfo::default().with_user_config(user_config);
    if args.fixed_step && info.fixed_time_step.is_none() {
        info.fixed_time_step = Some(time::REFERENCE_TIME_STEP);
    }

    // create client, startup failures exit before any frame is drawn
    let mut client = match Client::create(info, gfx::null::Device::create()) {
        Ok(client) => client,
        Err(e) => {
            log::error!("startup failed: {}", e);
            std::process::exit(1);
        }
    };
    client.device.record_last_frame_only = true;

    // run
    let toggle_every = args.toggle_every.unwrap_or(0);
    client.run(args.frames, |frame| toggle_every > 0 && frame > 0 && frame % toggle_every == 0);

    let state = client.animator.frame_state();
    log::info!(
        "ran {} frames, presented {}, skipped {}, t={:.3}, raster mode {:?}",
        client.frame_count(),
        client.device.frames_presented(),
        client.skipped_frames(),
        state.time,
        state.raster_mode
    );
}
