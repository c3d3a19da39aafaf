use crate::components::material::{BlendMode, MaterialKind, Side};
use crate::components::node::Node;
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;
use crate::renderer::instance::{MeshInstance, RenderBuffer};

fn mesh_instance(node: &Node) -> Option<MeshInstance> {
    let mesh = node.mesh.as_ref()?;
    let material = &mesh.material;
    let (width_segments, _) = mesh.geometry.segments();

    Some(MeshInstance {
        model: node.world.to_cols_array(),
        radius: mesh.geometry.radius(),
        segments: width_segments as f32,
        texture: material
            .map
            .map_or(MeshInstance::NO_TEXTURE, |t| t.0 as f32),
        opacity: material.effective_opacity(),
        blend: match material.blend {
            BlendMode::Normal => 0.0,
            BlendMode::Additive => 1.0,
        },
        side: match material.side {
            Side::Front => 0.0,
            Side::Back => 1.0,
            Side::Double => 2.0,
        },
        material: match material.kind {
            MaterialKind::Basic => 0.0,
            MaterialKind::Standard => 1.0,
        },
        layer: mesh.layer.as_u8() as f32,
    })
}

/// Build the render buffer from the scene's visible meshes.
///
/// Instances are ordered by render layer (back to front), with every
/// normal-blended instance before the additive ones; `additive_split` marks
/// the boundary. World matrices must already be propagated.
pub fn build_render_buffer(scene: &Scene, graph: &TransformGraph, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut normal: Vec<(u8, MeshInstance)> = Vec::new();
    let mut additive: Vec<(u8, MeshInstance)> = Vec::new();

    for node in scene.iter() {
        if !graph.is_visible(node.id, scene) {
            continue;
        }
        let Some(instance) = mesh_instance(node) else { continue };
        let layer = instance.layer as u8;
        if instance.blend > 0.0 {
            additive.push((layer, instance));
        } else {
            normal.push((layer, instance));
        }
    }

    // Stable sorts keep insertion order within a layer
    normal.sort_by_key(|(layer, _)| *layer);
    additive.sort_by_key(|(layer, _)| *layer);

    let split = normal.len() as u32;
    for (_, inst) in normal {
        buffer.push(inst);
    }
    buffer.additive_split = split;
    for (_, inst) in additive {
        buffer.push(inst);
    }
}
