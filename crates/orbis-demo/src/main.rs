//! Orbis demo: procedural meshes under switchable shaders.
//!
//! Keys: Tab/Shift+Tab geometry, F1-F3 or S shader, Up/Down or 0-8
//! subdivision level, R/G/B color (Shift lowers), L reload, Esc quit.
//! Left-drag orbits the camera, the wheel zooms.

mod app;
mod bindings;
mod geometry;
mod panel;
mod params;
mod plan;

use orbis_engine::device::GpuInit;
use orbis_engine::logging::{LoggingConfig, init_logging};
use orbis_engine::render::CameraConfig;
use orbis_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::app::DemoApp;
use crate::params::Params;

fn main() {
    init_logging(LoggingConfig::default());

    let params = Params::default();

    let config = RuntimeConfig {
        title: app::window_title(&params),
        initial_size: LogicalSize::new(1280.0, 720.0),
    };

    // Shader colors are authored in display space, like the clear color.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    let app = DemoApp::new(params, CameraConfig::default());

    if let Err(e) = Runtime::run(config, gpu_init, app) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
