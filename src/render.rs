//! The renderer adapter boundary.
//!
//! The core never touches shaders, attribute layouts, or device buffer
//! objects. It supplies a monotonically growing flat point list and
//! per-iteration `(first, count, transform)` triples; the host implements
//! [`RenderBackend`] over whatever graphics device it drives.
//!
//! Device resources (the compiled line pipeline, buffer objects) live in
//! the backend's [`Context`](RenderBackend::Context), a resource the host
//! application creates once and destroys after every drawing `LSystem` is
//! gone. The core only ever borrows it.

use crate::error::Result;
use glam::{Mat4, Vec3};

/// Device-side storage and line drawing, implemented by the host.
pub trait RenderBackend {
    /// Host-owned device resource handle passed by reference into every
    /// call.
    type Context;

    /// Stores `points` into device-side vertex storage starting at point
    /// `offset`.
    ///
    /// Offsets are contiguous across calls: the core uploads each point
    /// exactly once, in order. Implementations grow their device buffer as
    /// needed and may fail when device capacity is insufficient
    /// ([`LsysError::Device`](crate::LsysError::Device)).
    fn upload_vertices(&mut self, ctx: &Self::Context, offset: usize, points: &[Vec3])
    -> Result<()>;

    /// Draws `count` uploaded points starting at `first` as line segments
    /// (two consecutive points each), transformed by `transform`.
    fn draw_range(
        &mut self,
        ctx: &Self::Context,
        first: usize,
        count: usize,
        transform: Mat4,
    ) -> Result<()>;
}
