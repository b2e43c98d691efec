//! Bounded instance batch with auto-flush.
//!
//! [`InstanceBatch`] is the one fixed-size transform buffer the overlay
//! owns. It is allocated when the context is created and never grows.
//! [`BatchWriter`] borrows it for the duration of one draw call, encodes
//! segments into it and submits whenever it fills up, plus once more for the
//! remainder when the writer is dropped.

use glam::Vec3;
use xr_overlay_core::Color;

use crate::backend::RenderBackend;
use crate::segment::{InstanceTransform, LinePrimitive};
use crate::stats::FrameStats;
use crate::MAX_INSTANCES;

/// Fixed-capacity ordered buffer of instance transforms.
pub struct InstanceBatch {
    transforms: Box<[InstanceTransform]>,
    len: usize,
}

impl InstanceBatch {
    /// Allocate a batch of [`MAX_INSTANCES`] transforms.
    pub fn new() -> Self {
        Self {
            transforms: vec![bytemuck::Zeroable::zeroed(); MAX_INSTANCES].into_boxed_slice(),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.transforms.len()
    }

    /// Free slots before the batch must be flushed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len
    }

    /// Append a transform. Hands it back if the batch is full.
    pub fn push(&mut self, transform: InstanceTransform) -> Result<(), InstanceTransform> {
        if self.len == self.capacity() {
            return Err(transform);
        }
        self.transforms[self.len] = transform;
        self.len += 1;
        Ok(())
    }

    /// Transforms appended since the last reset.
    #[inline]
    pub fn as_slice(&self) -> &[InstanceTransform] {
        &self.transforms[..self.len]
    }

    /// Drop all transforms. Keeps the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
    }
}

impl Default for InstanceBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InstanceBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceBatch")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Streams line segments for one draw call into an [`InstanceBatch`].
///
/// Writes the call's color once on creation. Submits on overflow, on
/// [`flush`](Self::flush) and on [`Drop`].
pub struct BatchWriter<'a, B: RenderBackend> {
    batch: &'a mut InstanceBatch,
    backend: &'a mut B,
    material: &'a B::Material,
    mesh: &'a B::Mesh,
    stats: &'a mut FrameStats,
    thickness: f32,
}

impl<'a, B: RenderBackend> BatchWriter<'a, B> {
    pub(crate) fn new(
        batch: &'a mut InstanceBatch,
        backend: &'a mut B,
        material: &'a B::Material,
        mesh: &'a B::Mesh,
        stats: &'a mut FrameStats,
        color: Color,
        thickness: f32,
    ) -> Self {
        debug_assert!(batch.is_empty(), "batch left dirty by a previous call");
        backend.set_color(material, color);
        Self {
            batch,
            backend,
            material,
            mesh,
            stats,
            thickness,
        }
    }

    /// Make room for `count` more segments, flushing first if they would not
    /// fit. Keeps one primitive's edges inside a single submission.
    pub fn reserve(&mut self, count: usize) {
        if self.batch.remaining() < count {
            self.flush();
        }
    }

    /// Encode and append the segment `from -> to`.
    ///
    /// Returns `false` if the segment was degenerate and skipped.
    pub fn line(&mut self, from: Vec3, to: Vec3) -> bool {
        let Some(line) = LinePrimitive::encode(from, to, self.thickness) else {
            self.stats.degenerate_segments += 1;
            return false;
        };

        if let Err(transform) = self.batch.push(line.to_instance()) {
            self.flush();
            // an empty batch always has room
            let _ = self.batch.push(transform);
        }
        true
    }

    /// Append every `(a, b)` index pair of `points` as a segment.
    pub fn edges(&mut self, points: &[Vec3], edges: impl IntoIterator<Item = (usize, usize)>) {
        for (a, b) in edges {
            self.line(points[a], points[b]);
        }
    }

    /// Segments appended and not yet submitted.
    #[inline]
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    /// Submit pending segments, if any, and reset the batch.
    pub fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }

        let transforms = self.batch.as_slice();
        log::trace!("flushing {} line instances", transforms.len());
        self.backend
            .submit_instanced(self.material, self.mesh, 0, transforms);
        self.stats.record_instanced(transforms.len());
        self.batch.reset();
    }
}

impl<B: RenderBackend> Drop for BatchWriter<'_, B> {
    fn drop(&mut self) {
        self.flush();
    }
}
