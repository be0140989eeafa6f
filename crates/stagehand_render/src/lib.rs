//! Windowed rendering backend for Stagehand
//!
//! Provides [`RenderContext`], a wgpu-backed implementation of the
//! [`Engine`](stagehand_core::Engine) seam: surface and device management,
//! per-frame clear pass, the debug overlay, and the frame-delta clock.

pub mod context;
pub mod overlay;

pub use context::RenderContext;
