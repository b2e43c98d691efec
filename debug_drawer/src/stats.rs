/// Per-frame submission counters.
///
/// Reset by [`DrawContext::begin_frame`](crate::DrawContext::begin_frame).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Backend submissions, instanced and single.
    pub draw_calls: usize,
    /// Mesh copies drawn across all submissions.
    pub instances: usize,
    /// Zero-length segments that were skipped.
    pub degenerate_segments: usize,
}

impl FrameStats {
    pub(crate) fn record_instanced(&mut self, count: usize) {
        self.draw_calls += 1;
        self.instances += count;
    }

    pub(crate) fn record_single(&mut self) {
        self.draw_calls += 1;
        self.instances += 1;
    }
}
