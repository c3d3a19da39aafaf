/// Shared buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 24 floats]
/// [Camera: 32 floats (view, projection)]
/// [Headings: max_headings × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::EngineConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_ADDITIVE_SPLIT: usize = 4;
pub const HEADER_MAX_HEADINGS: usize = 5;
pub const HEADER_HEADING_COUNT: usize = 6;
pub const HEADER_MAX_EVENTS: usize = 7;
pub const HEADER_EVENT_COUNT: usize = 8;
pub const HEADER_PIXEL_RATIO: usize = 9;
pub const HEADER_ENVIRONMENT: usize = 10;
pub const HEADER_PROTOCOL_VERSION: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per mesh instance (fixed wire format).
pub const INSTANCE_FLOATS: usize = 24;

/// Floats in the camera section: view + projection matrices.
pub const CAMERA_FLOATS: usize = 32;

/// Floats per scene event: kind, a, b, c (fixed wire format).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_headings: usize,
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub heading_data_floats: usize,
    pub event_data_floats: usize,

    pub instance_data_offset: usize,
    pub camera_data_offset: usize,
    pub heading_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_headings: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let heading_data_floats = max_headings;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let camera_data_offset = instance_data_offset + instance_data_floats;
        let heading_data_offset = camera_data_offset + CAMERA_FLOATS;
        let event_data_offset = heading_data_offset + heading_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_headings,
            max_events,
            instance_data_floats,
            heading_data_floats,
            event_data_floats,
            instance_data_offset,
            camera_data_offset,
            heading_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from an EngineConfig.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_instances, config.max_headings, config.max_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraUniform;
    use crate::renderer::instance::MeshInstance;
    use crate::api::types::SceneEvent;

    #[test]
    fn wire_sizes_match_rust_structs() {
        assert_eq!(INSTANCE_FLOATS, MeshInstance::FLOATS);
        assert_eq!(CAMERA_FLOATS, CameraUniform::FLOATS);
        assert_eq!(std::mem::size_of::<CameraUniform>(), CAMERA_FLOATS * 4);
        assert_eq!(EVENT_FLOATS, SceneEvent::FLOATS);
    }

    #[test]
    fn from_default_config() {
        let config = EngineConfig::default();
        let layout = ProtocolLayout::from_config(&config);
        assert_eq!(layout.max_instances, config.max_instances);
        assert_eq!(layout.instance_data_floats, config.max_instances * 24);
        assert_eq!(layout.heading_data_floats, config.max_headings);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 6, 8);

        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.camera_data_offset, HEADER_FLOATS + 10 * 24);
        assert_eq!(layout.heading_data_offset, layout.camera_data_offset + CAMERA_FLOATS);
        assert_eq!(layout.event_data_offset, layout.heading_data_offset + 6);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 8 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }
}
