//! Host layout contract.
//!
//! The host binary exposes two values the bridge needs only as fields at fixed
//! byte offsets inside its own objects: the elapsed level time inside the live
//! gameplay session and the native device-context handle inside the window
//! object. Each supported host build gets one [`HostLayout`] constant. Offsets
//! are validated against a host build out-of-band; nothing here can detect a
//! mismatched binary at runtime.
//!
//! This is the only module allowed to use `unsafe`.

#![allow(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::ptr::NonNull;

use crate::types::{Error, Result};

/// Byte offsets of the fields read from host objects for one host build.
///
/// Fields are private: a layout can only come from [`HostLayout::KNOWN`], which
/// keeps [`HostImage`] large enough for every read a layout can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostLayout {
    /// Version label matched by configuration.
    pub version: &'static str,
    session_time_offset: usize,
    window_surface_offset: usize,
}

impl HostLayout {
    /// 2.2 host, 64-bit Windows build.
    pub const V2_2_WIN64: HostLayout = HostLayout {
        version: "2.2-win64",
        session_time_offset: 968,
        window_surface_offset: 632,
    };

    pub const DEFAULT: HostLayout = Self::V2_2_WIN64;

    /// Every layout contract this crate ships.
    pub const KNOWN: &'static [HostLayout] = &[Self::V2_2_WIN64];

    /// Look up a layout by version label.
    pub fn for_version(version: &str) -> Result<Self> {
        Self::KNOWN
            .iter()
            .copied()
            .find(|layout| layout.version == version)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::KNOWN.iter().map(|l| l.version).collect();
                Error::unsupported_host(format!(
                    "no layout for host version {version:?} (known: {})",
                    known.join(", ")
                ))
            })
    }

    pub fn session_time_offset(&self) -> usize {
        self.session_time_offset
    }

    pub fn window_surface_offset(&self) -> usize {
        self.window_surface_offset
    }

    /// Bytes an object must span for every read this layout performs.
    fn extent(&self) -> usize {
        let time_end = self.session_time_offset + std::mem::size_of::<f64>();
        let surface_end = self.window_surface_offset + std::mem::size_of::<usize>();
        time_end.max(surface_end)
    }

    fn max_extent() -> usize {
        Self::KNOWN.iter().map(HostLayout::extent).max().unwrap_or(0)
    }

    /// Elapsed level time stored in the gameplay session.
    pub fn session_time(&self, session: SessionHandle<'_>) -> f64 {
        // SAFETY: `SessionHandle` guarantees `base` is readable for the extent
        // of every known layout, and `self` is one of them.
        unsafe {
            session
                .base
                .as_ptr()
                .add(self.session_time_offset)
                .cast::<f64>()
                .read_unaligned()
        }
    }

    /// Native drawing-surface handle stored in the window object, `None` while
    /// the host has not created it yet.
    pub fn window_surface(&self, window: WindowHandle<'_>) -> Option<SurfaceHandle> {
        // SAFETY: see `session_time`; `WindowHandle` carries the same guarantee.
        let raw = unsafe {
            window
                .base
                .as_ptr()
                .add(self.window_surface_offset)
                .cast::<usize>()
                .read_unaligned()
        };
        NonZeroUsize::new(raw).map(SurfaceHandle)
    }
}

impl Default for HostLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Borrowed handle to the host's live gameplay session object.
#[derive(Clone, Copy)]
pub struct SessionHandle<'a> {
    base: NonNull<u8>,
    _object: PhantomData<&'a [u8]>,
}

impl<'a> SessionHandle<'a> {
    /// Wrap a host session pointer. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a live gameplay session object of a host
    /// build matching one of [`HostLayout::KNOWN`], readable for `'a`.
    pub unsafe fn from_raw(ptr: *const u8) -> Option<Self> {
        NonNull::new(ptr.cast_mut()).map(|base| Self {
            base,
            _object: PhantomData,
        })
    }

    pub fn addr(&self) -> usize {
        self.base.as_ptr() as usize
    }
}

impl fmt::Debug for SessionHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionHandle({:#x})", self.addr())
    }
}

/// Borrowed handle to the host's window object.
#[derive(Clone, Copy)]
pub struct WindowHandle<'a> {
    base: NonNull<u8>,
    _object: PhantomData<&'a [u8]>,
}

impl<'a> WindowHandle<'a> {
    /// Wrap a host window pointer. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a live window object of a host build
    /// matching one of [`HostLayout::KNOWN`], readable for `'a`.
    pub unsafe fn from_raw(ptr: *const u8) -> Option<Self> {
        NonNull::new(ptr.cast_mut()).map(|base| Self {
            base,
            _object: PhantomData,
        })
    }

    pub fn addr(&self) -> usize {
        self.base.as_ptr() as usize
    }
}

impl fmt::Debug for WindowHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowHandle({:#x})", self.addr())
    }
}

/// Opaque native drawing-surface handle. Never dereferenced by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceHandle(NonZeroUsize);

impl SurfaceHandle {
    pub fn new(raw: usize) -> Option<Self> {
        NonZeroUsize::new(raw).map(Self)
    }

    pub fn raw(self) -> usize {
        self.0.get()
    }
}

/// Owned byte image standing in for a host object, sized to cover every
/// known layout. Used by the scripted host and tests.
#[derive(Debug, Clone)]
pub struct HostImage {
    bytes: Box<[u8]>,
}

impl HostImage {
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; HostLayout::max_extent()].into_boxed_slice(),
        }
    }

    fn write(&mut self, offset: usize, value: &[u8]) -> Result<()> {
        let len = self.bytes.len();
        let slot = offset
            .checked_add(value.len())
            .and_then(|end| self.bytes.get_mut(offset..end))
            .ok_or_else(|| {
                Error::validation(format!(
                    "write of {} bytes at offset {offset} exceeds image of {len} bytes",
                    value.len()
                ))
            })?;
        slot.copy_from_slice(value);
        Ok(())
    }

    pub fn write_f64(&mut self, offset: usize, value: f64) -> Result<()> {
        self.write(offset, &value.to_ne_bytes())
    }

    pub fn write_usize(&mut self, offset: usize, value: usize) -> Result<()> {
        self.write(offset, &value.to_ne_bytes())
    }

    pub fn session(&self) -> SessionHandle<'_> {
        SessionHandle {
            base: NonNull::from(&self.bytes[..]).cast(),
            _object: PhantomData,
        }
    }

    pub fn window(&self) -> WindowHandle<'_> {
        WindowHandle {
            base: NonNull::from(&self.bytes[..]).cast(),
            _object: PhantomData,
        }
    }
}

impl Default for HostImage {
    fn default() -> Self {
        Self::new()
    }
}
