//! Headless demo scene
//!
//! Four items, driven the same way an interactive test scene would:
//! - item 1 moves with `Linear`, item 2 moves with the selected curve
//! - item 3 scales with `Linear`, item 4 scales with the selected curve
//!
//! Each [`DemoScene::start`] first kills the tweens of the previous run and
//! resets the transforms, so the four animations always start together.

use glam::Vec3;
use glide_core::{EaseType, TweenHandle, TweenRegistry};

use crate::clock::FrameClock;
use crate::host::{SharedTransform, Transform, TransformTweenExt};

/// Parameters of one demo run.
#[derive(Debug, Clone)]
pub struct SceneSettings {
    pub duration: f32,
    pub ease: EaseType,
    pub move_from_x: f32,
    pub move_to_x: f32,
    pub scale_from: f32,
    pub scale_to: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            duration: 1.0,
            ease: EaseType::EaseInOutBack,
            move_from_x: -5.0,
            move_to_x: 5.0,
            scale_from: 1.0,
            scale_to: 2.0,
        }
    }
}

/// How the frame loop runs.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop after this many frames even if tweens remain (0 = no limit)
    pub max_frames: u32,
    /// Kill every tween at this frame, like pressing the "Kill" button
    pub kill_at_frame: Option<u32>,
    /// Log transforms every N frames (0 = never)
    pub report_every: u32,
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: u32,
    pub simulated_seconds: f32,
    pub killed: bool,
    pub transforms: Vec<Transform>,
}

/// Upper bound for open-ended runs so a misconfigured clock cannot spin forever.
const FRAME_SAFETY_LIMIT: u32 = 1_000_000;

pub struct DemoScene {
    registry: TweenRegistry,
    items: [SharedTransform; 4],
    handles: Vec<TweenHandle>,
}

impl DemoScene {
    pub fn new(registry: TweenRegistry) -> Self {
        Self {
            registry,
            items: std::array::from_fn(|_| Transform::default().shared()),
            handles: Vec::with_capacity(4),
        }
    }

    pub fn registry(&self) -> &TweenRegistry {
        &self.registry
    }

    pub fn transforms(&self) -> Vec<Transform> {
        self.items.iter().map(|item| *item.borrow()).collect()
    }

    /// Reset the items and start the four tweens.
    pub fn start(&mut self, settings: &SceneSettings) {
        self.kill();

        let [mover_linear, mover_eased, scaler_linear, scaler_eased] = &self.items;

        mover_linear.borrow_mut().position = Vec3::new(settings.move_from_x, 2.0, 0.0);
        mover_eased.borrow_mut().position = Vec3::new(settings.move_from_x, 0.0, 0.0);
        scaler_linear.borrow_mut().scale = Vec3::splat(settings.scale_from);
        scaler_eased.borrow_mut().scale = Vec3::splat(settings.scale_from);

        let registry = &self.registry;
        let duration = settings.duration;
        self.handles = vec![
            mover_linear
                .do_move(registry, Vec3::new(settings.move_to_x, 2.0, 0.0), duration)
                .with_ease(EaseType::Linear),
            mover_eased
                .do_move(registry, Vec3::new(settings.move_to_x, 0.0, 0.0), duration)
                .with_ease(settings.ease),
            scaler_linear
                .do_scale(registry, Vec3::splat(settings.scale_to), duration)
                .with_ease(EaseType::Linear),
            scaler_eased
                .do_scale(registry, Vec3::splat(settings.scale_to), duration)
                .with_ease(settings.ease),
        ];

        log::info!(
            "Started demo: {} tweens over {:.2}s, selected curve {}",
            self.handles.len(),
            duration,
            settings.ease
        );
    }

    /// Cancel every tween started by this scene.
    pub fn kill(&mut self) {
        for handle in self.handles.drain(..) {
            handle.cancel();
        }
    }

    /// True while any of the scene's tweens is still running.
    pub fn is_animating(&self) -> bool {
        self.handles.iter().any(|handle| handle.is_active())
    }

    /// Tick the registry until every tween finished or a limit is hit.
    pub fn run(&mut self, clock: &mut FrameClock, options: &RunOptions) -> RunSummary {
        let limit = if options.max_frames == 0 {
            FRAME_SAFETY_LIMIT
        } else {
            options.max_frames
        };

        let mut frames = 0;
        let mut simulated_seconds = 0.0;
        let mut killed = false;

        while frames < limit && self.is_animating() {
            if options.kill_at_frame == Some(frames) {
                log::info!("Killing all demo tweens at frame {}", frames);
                self.kill();
                killed = true;
                break;
            }

            let dt = clock.next_delta();
            self.registry.tick(dt);
            simulated_seconds += dt;
            frames += 1;

            if options.report_every > 0 && frames % options.report_every == 0 {
                self.report(frames);
            }
        }

        RunSummary {
            frames,
            simulated_seconds,
            killed,
            transforms: self.transforms(),
        }
    }

    fn report(&self, frame: u32) {
        for (i, t) in self.transforms().iter().enumerate() {
            log::info!(
                "frame {:>4} item{} pos=({:6.3}, {:6.3}, {:6.3}) scale={:5.3}",
                frame,
                i + 1,
                t.position.x,
                t.position.y,
                t.position.z,
                t.scale.x
            );
        }
    }
}

impl Drop for DemoScene {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_to_completion() {
        let mut scene = DemoScene::new(TweenRegistry::new());
        scene.start(&SceneSettings::default());

        let summary = scene.run(&mut FrameClock::fixed(60), &RunOptions::default());

        assert!(!summary.killed);
        assert!((60..=61).contains(&summary.frames));
        let t = &summary.transforms;
        assert_eq!(t[0].position, Vec3::new(5.0, 2.0, 0.0));
        assert_eq!(t[1].position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(t[2].scale, Vec3::splat(2.0));
        assert_eq!(t[3].scale, Vec3::splat(2.0));
        assert!(scene.registry().is_empty());
    }

    #[test]
    fn test_kill_stops_midway() {
        let mut scene = DemoScene::new(TweenRegistry::new());
        scene.start(&SceneSettings::default());

        let options = RunOptions {
            kill_at_frame: Some(30),
            ..RunOptions::default()
        };
        let summary = scene.run(&mut FrameClock::fixed(60), &options);

        assert!(summary.killed);
        assert_eq!(summary.frames, 30);
        assert!(scene.registry().is_empty());
        // Linear mover is halfway
        assert!(summary.transforms[0].position.x.abs() < 1e-3);
    }

    #[test]
    fn test_restart_cancels_previous_run() {
        let mut scene = DemoScene::new(TweenRegistry::new());
        let settings = SceneSettings::default();
        scene.start(&settings);
        scene.registry().tick(0.5);
        scene.start(&settings);

        assert_eq!(scene.registry().active_count(), 4);
        assert_eq!(scene.transforms()[0].position.x, -5.0);
    }

    #[test]
    fn test_max_frames_limit() {
        let mut scene = DemoScene::new(TweenRegistry::new());
        scene.start(&SceneSettings::default());

        let options = RunOptions {
            max_frames: 10,
            ..RunOptions::default()
        };
        let summary = scene.run(&mut FrameClock::fixed(60), &options);

        assert_eq!(summary.frames, 10);
        assert!(scene.is_animating());
    }
}
