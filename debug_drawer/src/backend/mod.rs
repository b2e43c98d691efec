//! Render backend abstraction.
//!
//! The overlay never issues GPU work itself. It hands finished transforms to
//! a [`RenderBackend`], which owns shaders, materials and the actual draw
//! calls. Two kinds of submission exist:
//!
//! - [`submit_one`](RenderBackend::submit_one) for solids (one transform)
//! - [`submit_instanced`](RenderBackend::submit_instanced) for line batches
//!   (at most [`MAX_INSTANCES`](crate::MAX_INSTANCES) transforms)
//!
//! Both draw with the color most recently passed to
//! [`set_color`](RenderBackend::set_color).
//!
//! [`RecordingBackend`] captures submissions in memory for tests and
//! headless tools.

pub mod recording;

pub use recording::{RecordingBackend, Submission};

use glam::Mat4;
use xr_overlay_core::Color;

use crate::segment::InstanceTransform;

/// Destination for overlay draw submissions.
pub trait RenderBackend {
    /// Backend handle for a mesh.
    type Mesh;
    /// Backend handle for the instancing-capable overlay material.
    type Material;

    /// Whether `material` can be used with
    /// [`submit_instanced`](Self::submit_instanced).
    fn supports_instancing(&self, _material: &Self::Material) -> bool {
        true
    }

    /// Write the tint used by subsequent submissions.
    fn set_color(&mut self, material: &Self::Material, color: Color);

    /// Draw `mesh` once with `transform`.
    fn submit_one(
        &mut self,
        material: &Self::Material,
        mesh: &Self::Mesh,
        sub_mesh: u32,
        transform: &Mat4,
    );

    /// Draw `mesh` once per entry in `transforms`.
    ///
    /// `transforms` is never empty and never longer than
    /// [`MAX_INSTANCES`](crate::MAX_INSTANCES).
    fn submit_instanced(
        &mut self,
        material: &Self::Material,
        mesh: &Self::Mesh,
        sub_mesh: u32,
        transforms: &[InstanceTransform],
    );

    /// Called exactly once when the overlay shuts down.
    fn release_instance_buffer(&mut self) {}
}

/// Meshes and material the overlay draws with. Supplied once at startup.
///
/// `cube` must be a unit cube centered on the origin, `sphere` a sphere of
/// diameter 1 and `quad` a unit quad in the XY plane.
pub struct OverlayResources<B: RenderBackend> {
    pub cube: B::Mesh,
    pub sphere: B::Mesh,
    pub quad: B::Mesh,
    pub material: B::Material,
}

/// Tags for the three overlay meshes, for backends that do not need real
/// mesh handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Sphere,
    Quad,
}

impl<B> OverlayResources<B>
where
    B: RenderBackend<Mesh = MeshKind>,
{
    /// Resources that identify meshes by [`MeshKind`].
    pub fn tagged(material: B::Material) -> Self {
        Self {
            cube: MeshKind::Cube,
            sphere: MeshKind::Sphere,
            quad: MeshKind::Quad,
            material,
        }
    }
}

impl<B: RenderBackend> OverlayResources<B> {
    /// Handle for the mesh tagged `kind`.
    pub fn mesh(&self, kind: MeshKind) -> &B::Mesh {
        match kind {
            MeshKind::Cube => &self.cube,
            MeshKind::Sphere => &self.sphere,
            MeshKind::Quad => &self.quad,
        }
    }
}
