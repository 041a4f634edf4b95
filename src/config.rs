//! Demo configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `glide.ron` file (if exists)
//! 3. Environment variables prefixed with `GLIDE_`
//!
//! Example environment variable: `GLIDE_ANIMATION__DURATION=2.5`
//!
//! Curve names are strings and accept the same spellings as the CLI
//! (`"EaseOutBack"`, `"ease_out_back"`, `"easeoutback"`).

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat, Source};
use glide_core::EaseType;
use serde::{Deserialize, Serialize};

/// Main demo configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DemoConfig {
    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub clock: ClockConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Tween settings for the demo scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Tween duration in seconds
    pub duration: f32,
    /// Curve for the second item of each pair (the first always runs Linear)
    pub ease: EaseType,
    /// X coordinate the moving items start from
    pub move_from_x: f32,
    /// X coordinate the moving items end at
    pub move_to_x: f32,
    /// Uniform scale the scaling items start from
    pub scale_from: f32,
    /// Uniform scale the scaling items end at
    pub scale_to: f32,
}

impl Default for AnimationConfig {
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

/// Frame clock settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Frames per second
    pub fps: u32,
    /// Hard frame limit (0 = run until every tween finished)
    pub max_frames: u32,
    /// Use wall-clock deltas instead of a fixed step
    pub realtime: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            max_frames: 0,
            realtime: false,
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
    /// Log item transforms every N frames (0 = only at the end)
    pub report_every: u32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            verbose_logging: false,
            report_every: 15,
        }
    }
}

impl DemoConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `glide.ron` file (if exists)
    /// 3. Environment variables prefixed with `GLIDE_` (highest priority)
    pub fn load() -> Result<Self> {
        Self::load_layered(
            File::with_name("glide")
                .format(FileFormat::Ron)
                .required(false),
            Self::environment(),
        )
    }

    /// `GLIDE_` prefix, `__` between nested keys.
    fn environment() -> Environment {
        Environment::with_prefix("GLIDE")
            .prefix_separator("_")
            .separator("__")
    }

    fn load_layered(file: impl Source + Send + Sync + 'static, env: Environment) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("animation.duration", 1.0)?
            .set_default("animation.ease", EaseType::EaseInOutBack.name())?
            .set_default("animation.move_from_x", -5.0)?
            .set_default("animation.move_to_x", 5.0)?
            .set_default("animation.scale_from", 1.0)?
            .set_default("animation.scale_to", 2.0)?
            .set_default("clock.fps", 60_i64)?
            .set_default("clock.max_frames", 0_i64)?
            .set_default("clock.realtime", false)?
            .set_default("debug.verbose_logging", false)?
            .set_default("debug.report_every", 15_i64)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(file)
            // Layer 3: Environment variables (GLIDE_ANIMATION__DURATION, etc.)
            .add_source(env);

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Parse a RON document, falling back to defaults for missing sections.
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).context("Failed to parse RON configuration")
    }
}
