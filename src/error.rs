//! Error types

use thiserror::Error;

/// Errors raised while loading or validating [`Settings`](crate::Settings)
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("window scale {0} is outside 1..={max}", max = crate::settings::MAX_WINDOW_SCALE)]
    WindowScale(u32),
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while bringing up the GPU renderer
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("missing page element `{0}`")]
    MissingElement(&'static str),
}
