use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use lavadesk_engine::device::GpuInit;
use lavadesk_engine::logging::LoggingConfig;
use lavadesk_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

use crate::camera::Projection;

pub const WINDOW_TITLE: &str = "Lava Lamp Desk";

#[derive(Parser, Debug, Clone)]
#[command(name = "lavadesk")]
#[command(about = "Lava-lamp desk scene viewer", long_about = None)]
pub struct Cli {
    /// Directory holding the scene's texture files
    #[arg(long, default_value = "textures")]
    pub textures: PathBuf,

    /// Log filter (env_logger syntax); overrides RUST_LOG
    #[arg(long)]
    pub log: Option<String>,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Idle time between frames, in milliseconds
    #[arg(long = "frame-delay", default_value_t = 40)]
    pub frame_delay_ms: u64,

    /// Start in orthographic projection
    #[arg(long)]
    pub ortho: bool,

    /// Leave the cursor free instead of capturing it
    #[arg(long = "no-capture")]
    pub no_capture: bool,
}

/// Viewer settings resolved from the command line.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub texture_dir: PathBuf,
    pub log_filter: Option<String>,
    pub window_size: (u32, u32),
    pub frame_delay: Duration,
    pub projection: Projection,
    pub capture_cursor: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
            log_filter: None,
            window_size: (800, 600),
            frame_delay: Duration::from_millis(40),
            projection: Projection::Perspective,
            capture_cursor: true,
        }
    }
}

impl From<Cli> for ViewerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            texture_dir: cli.textures,
            log_filter: cli.log,
            window_size: (cli.width.max(1), cli.height.max(1)),
            frame_delay: Duration::from_millis(cli.frame_delay_ms),
            projection: if cli.ortho {
                Projection::Orthographic
            } else {
                Projection::Perspective
            },
            capture_cursor: !cli.no_capture,
        }
    }
}

impl ViewerConfig {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_filter.clone(),
            ..LoggingConfig::default()
        }
    }

    pub fn runtime(&self) -> RuntimeConfig {
        let (w, h) = self.window_size;
        RuntimeConfig {
            title: WINDOW_TITLE.to_string(),
            initial_size: LogicalSize::new(f64::from(w), f64::from(h)),
            resizable: true,
            frame_delay: self.frame_delay,
        }
    }

    /// Line rasterization is requested but not required.
    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            optional_features: wgpu::Features::POLYGON_MODE_LINE,
            ..GpuInit::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_desk_setup() {
        let cli = Cli::parse_from(["lavadesk"]);
        let cfg = ViewerConfig::from(cli);
        assert_eq!(cfg.texture_dir, PathBuf::from("textures"));
        assert_eq!(cfg.window_size, (800, 600));
        assert_eq!(cfg.frame_delay, Duration::from_millis(40));
        assert_eq!(cfg.projection, Projection::Perspective);
        assert!(cfg.capture_cursor);

        let rt = cfg.runtime();
        assert_eq!(rt.title, WINDOW_TITLE);
        assert_eq!(rt.initial_size, LogicalSize::new(800.0, 600.0));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "lavadesk",
            "--textures",
            "assets/tex",
            "--log",
            "debug",
            "--width",
            "1024",
            "--frame-delay",
            "0",
            "--ortho",
            "--no-capture",
        ]);
        let cfg = ViewerConfig::from(cli);
        assert_eq!(cfg.texture_dir, PathBuf::from("assets/tex"));
        assert_eq!(cfg.logging().env_filter.as_deref(), Some("debug"));
        assert_eq!(cfg.window_size, (1024, 600));
        assert_eq!(cfg.frame_delay, Duration::ZERO);
        assert_eq!(cfg.projection, Projection::Orthographic);
        assert!(!cfg.capture_cursor);
    }

    #[test]
    fn wireframe_is_optional() {
        let init = ViewerConfig::default().gpu_init();
        assert!(init.optional_features.contains(wgpu::Features::POLYGON_MODE_LINE));
        assert!(init.required_features.is_empty());
    }
}
