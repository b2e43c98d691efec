//! In-memory backend for testing and headless use.
//!
//! Doesn't draw anything; every submission is stored together with the color
//! that was active when it was made.

use glam::{Mat4, Vec3};
use xr_overlay_core::Color;

use super::{MeshKind, RenderBackend};
use crate::segment::InstanceTransform;

/// A captured submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Single {
        mesh: MeshKind,
        sub_mesh: u32,
        color: Color,
        transform: Mat4,
    },
    Instanced {
        mesh: MeshKind,
        sub_mesh: u32,
        color: Color,
        transforms: Vec<InstanceTransform>,
    },
}

impl Submission {
    /// Number of mesh copies this submission draws.
    pub fn instance_count(&self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Instanced { transforms, .. } => transforms.len(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Single { color, .. } | Self::Instanced { color, .. } => *color,
        }
    }

    pub fn mesh(&self) -> MeshKind {
        match self {
            Self::Single { mesh, .. } | Self::Instanced { mesh, .. } => *mesh,
        }
    }
}

/// Recording backend.
#[derive(Debug)]
pub struct RecordingBackend {
    instancing: bool,
    color: Color,
    color_writes: usize,
    releases: usize,
    submissions: Vec<Submission>,
}

impl RecordingBackend {
    /// Create a new recording backend.
    pub fn new() -> Self {
        Self {
            instancing: true,
            color: Color::WHITE,
            color_writes: 0,
            releases: 0,
            submissions: Vec::new(),
        }
    }

    /// A backend whose material reports no instancing support.
    pub fn without_instancing() -> Self {
        Self {
            instancing: false,
            ..Self::new()
        }
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Instance counts of the instanced submissions, in order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.submissions
            .iter()
            .filter_map(|s| match s {
                Submission::Instanced { transforms, .. } => Some(transforms.len()),
                Submission::Single { .. } => None,
            })
            .collect()
    }

    /// Endpoints of every instanced line, in submission order.
    pub fn lines(&self) -> Vec<(Vec3, Vec3)> {
        self.submissions
            .iter()
            .filter_map(|s| match s {
                Submission::Instanced { transforms, .. } => Some(transforms),
                Submission::Single { .. } => None,
            })
            .flatten()
            .map(InstanceTransform::line_endpoints)
            .collect()
    }

    pub fn total_instances(&self) -> usize {
        self.submissions.iter().map(Submission::instance_count).sum()
    }

    pub fn color_writes(&self) -> usize {
        self.color_writes
    }

    /// How many times the instance buffer was released.
    pub fn releases(&self) -> usize {
        self.releases
    }

    /// Forget captured submissions and color writes.
    pub fn clear(&mut self) {
        self.submissions.clear();
        self.color_writes = 0;
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for RecordingBackend {
    type Mesh = MeshKind;
    type Material = ();

    fn supports_instancing(&self, _material: &()) -> bool {
        self.instancing
    }

    fn set_color(&mut self, _material: &(), color: Color) {
        self.color = color;
        self.color_writes += 1;
    }

    fn submit_one(&mut self, _material: &(), mesh: &MeshKind, sub_mesh: u32, transform: &Mat4) {
        log::trace!("RecordingBackend: single {:?}", mesh);
        self.submissions.push(Submission::Single {
            mesh: *mesh,
            sub_mesh,
            color: self.color,
            transform: *transform,
        });
    }

    fn submit_instanced(
        &mut self,
        _material: &(),
        mesh: &MeshKind,
        sub_mesh: u32,
        transforms: &[InstanceTransform],
    ) {
        log::trace!(
            "RecordingBackend: instanced {:?} x{}",
            mesh,
            transforms.len()
        );
        self.submissions.push(Submission::Instanced {
            mesh: *mesh,
            sub_mesh,
            color: self.color,
            transforms: transforms.to_vec(),
        });
    }

    fn release_instance_buffer(&mut self) {
        self.releases += 1;
    }
}
