/// Vertical offsets of the page's heading elements.
///
/// Each offset is a percentage of the element's own height, so `-100.0`
/// moves a heading up by exactly one heading. The host decides how many
/// headings exist; an empty track makes every heading animation a no-op.
#[derive(Debug, Clone, Default)]
pub struct HeadingTrack {
    offsets: Vec<f32>,
    capacity: usize,
}

impl HeadingTrack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            offsets: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Declare how many headings the page has. New headings start at 0.
    /// Counts beyond the track capacity are clamped.
    pub fn set_count(&mut self, count: usize) {
        let count = count.min(self.capacity);
        if count < self.offsets.len() {
            log::warn!("heading count shrunk from {} to {}", self.offsets.len(), count);
        }
        self.offsets.resize(count, 0.0);
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.offsets.get(index).copied()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut f32> {
        self.offsets.get_mut(index)
    }

    /// Raw pointer to the offsets for host reads.
    pub fn offsets_ptr(&self) -> *const f32 {
        self.offsets.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
