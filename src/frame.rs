//! Frame presentation tap.

use crate::host::{HostLayout, SurfaceHandle, WindowHandle};

/// Caches the native surface handle read from the host window object.
///
/// Resolution is retried each frame until the host has stored a non-null
/// handle, then never read again.
#[derive(Debug, Default)]
pub struct FramePresentationTap {
    surface: Option<SurfaceHandle>,
}

impl FramePresentationTap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.surface
    }

    /// Surface handle for this frame, resolving it on first sight.
    pub fn resolve(
        &mut self,
        window: Option<WindowHandle<'_>>,
        layout: &HostLayout,
    ) -> Option<SurfaceHandle> {
        if self.surface.is_none() {
            self.surface = window.and_then(|window| layout.window_surface(window));
            if let Some(surface) = self.surface {
                tracing::debug!("resolved native surface {:#x}", surface.raw());
            }
        }
        self.surface
    }
}
