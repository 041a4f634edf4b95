use anyhow::Context;
use clap::Parser;
use glide::clock::FrameClock;
use glide::config::DemoConfig;
use glide::demo::{DemoScene, RunOptions, SceneSettings};
use glide::glide_core::{global, EaseType};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Curve for the eased items (e.g. EaseOutBack, ease_in_sine)
    #[arg(long)]
    ease: Option<EaseType>,

    /// Tween duration in seconds
    #[arg(long)]
    duration: Option<f32>,

    /// Frames per second of the simulated clock
    #[arg(long)]
    fps: Option<u32>,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u32>,

    /// Cancel every tween at this frame
    #[arg(long)]
    kill_at: Option<u32>,

    /// Pace frames with the wall clock instead of a fixed step
    #[arg(long)]
    realtime: bool,

    /// Log transforms every N frames (0 = only the final state)
    #[arg(long)]
    report_every: Option<u32>,

    /// List available easing curves
    #[arg(long)]
    list_eases: bool,
}

fn main() -> anyhow::Result<()> {
    let config = DemoConfig::load().context("Failed to load glide configuration")?;

    let default_level = if config.debug.verbose_logging {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    // Handle --list-eases flag
    if args.list_eases {
        for ease in EaseType::ALL {
            println!("{:>2}  {}", ease.index(), ease);
        }
        return Ok(());
    }

    let settings = SceneSettings {
        duration: args.duration.unwrap_or(config.animation.duration),
        ease: args.ease.unwrap_or(config.animation.ease),
        move_from_x: config.animation.move_from_x,
        move_to_x: config.animation.move_to_x,
        scale_from: config.animation.scale_from,
        scale_to: config.animation.scale_to,
    };
    let fps = args.fps.unwrap_or(config.clock.fps);
    let options = RunOptions {
        max_frames: args.max_frames.unwrap_or(config.clock.max_frames),
        kill_at_frame: args.kill_at,
        report_every: args.report_every.unwrap_or(config.debug.report_every),
    };
    let mut clock = if args.realtime || config.clock.realtime {
        FrameClock::realtime(fps)
    } else {
        FrameClock::fixed(fps)
    };

    let registry = global::init();
    let summary = {
        let mut scene = DemoScene::new(registry);
        scene.start(&settings);
        scene.run(&mut clock, &options)
    };

    log::info!(
        "Finished after {} frames ({:.3}s simulated){}",
        summary.frames,
        summary.simulated_seconds,
        if summary.killed { ", killed" } else { "" }
    );
    for (i, t) in summary.transforms.iter().enumerate() {
        println!(
            "item{}: position=({:.3}, {:.3}, {:.3}) scale=({:.3}, {:.3}, {:.3})",
            i + 1,
            t.position.x,
            t.position.y,
            t.position.z,
            t.scale.x,
            t.scale.y,
            t.scale.z
        );
    }

    global::shutdown();
    Ok(())
}
