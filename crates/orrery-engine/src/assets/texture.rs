use serde::{Deserialize, Serialize};

use crate::api::types::{NodeId, TextureId};
use crate::core::scene::Scene;
use crate::error::{EngineError, EngineResult};

/// How the host should interpret the texel colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Raw data (HDR radiance, normal maps).
    #[default]
    Linear,
    /// Display-referred colour images.
    Srgb,
}

/// Texture addressing outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wrapping {
    #[default]
    ClampToEdge,
    Repeat,
}

/// How texture coordinates are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mapping {
    /// Regular mesh UVs.
    #[default]
    Uv,
    /// Equirectangular panorama used as a reflection environment.
    EquirectangularReflection,
}

/// Host-side sampling options sent along with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextureOptions {
    pub color_space: ColorSpace,
    pub wrap_s: Wrapping,
    pub wrap_t: Wrapping,
    pub mapping: Mapping,
}

impl TextureOptions {
    /// Colour image on regular UVs.
    pub fn srgb() -> Self {
        Self {
            color_space: ColorSpace::Srgb,
            ..Self::default()
        }
    }

    /// Tile in both directions.
    pub fn repeating(mut self) -> Self {
        self.wrap_s = Wrapping::Repeat;
        self.wrap_t = Wrapping::Repeat;
        self
    }

    pub fn equirect_environment() -> Self {
        Self {
            mapping: Mapping::EquirectangularReflection,
            ..Self::default()
        }
    }
}

/// Load state of a requested texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStatus {
    Pending,
    Ready,
    Failed,
}

/// Where a texture goes once it has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindTarget {
    /// The `map` of the node's mesh material.
    MaterialMap(NodeId),
    /// The scene's reflection environment.
    Environment,
}

/// A load request for the host, serialized to JSON at the WASM boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureRequest {
    pub id: u32,
    pub path: String,
    #[serde(flatten)]
    pub options: TextureOptions,
}

#[derive(Debug)]
struct TextureEntry {
    path: String,
    status: TextureStatus,
    bindings: Vec<BindTarget>,
}

/// Tracks every texture the scene asked for.
///
/// Requesting never blocks: the request is queued for the host, which loads
/// it asynchronously and reports back with `resolve` or `fail`. Bindings are
/// applied to the scene only on `resolve`, so dependent materials render
/// blank until then.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    outbox: Vec<TextureRequest>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a texture load and return its handle.
    pub fn request(&mut self, path: impl Into<String>, options: TextureOptions) -> TextureId {
        let id = TextureId(self.entries.len() as u32);
        let path = path.into();
        self.outbox.push(TextureRequest {
            id: id.0,
            path: path.clone(),
            options,
        });
        self.entries.push(TextureEntry {
            path,
            status: TextureStatus::Pending,
            bindings: Vec::new(),
        });
        id
    }

    /// Attach a binding that will be applied once the texture is ready.
    /// Binding an already loaded texture applies it immediately.
    pub fn bind(&mut self, id: TextureId, target: BindTarget, scene: &mut Scene) -> EngineResult<()> {
        let entry = self
            .entries
            .get_mut(id.0 as usize)
            .ok_or(EngineError::UnknownTexture(id))?;
        if entry.status == TextureStatus::Ready {
            apply_binding(id, target, scene);
        } else {
            entry.bindings.push(target);
        }
        Ok(())
    }

    /// Request a texture and bind it in one go.
    pub fn request_for(
        &mut self,
        path: impl Into<String>,
        options: TextureOptions,
        target: BindTarget,
        scene: &mut Scene,
    ) -> EngineResult<TextureId> {
        let id = self.request(path, options);
        self.bind(id, target, scene)?;
        Ok(id)
    }

    /// Requests not yet handed to the host.
    pub fn take_requests(&mut self) -> Vec<TextureRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// The host finished loading `id`: apply its bindings.
    /// Returns how many bindings were applied; repeated completions apply none.
    pub fn resolve(&mut self, id: TextureId, scene: &mut Scene) -> EngineResult<usize> {
        let entry = self
            .entries
            .get_mut(id.0 as usize)
            .ok_or(EngineError::UnknownTexture(id))?;
        if entry.status == TextureStatus::Ready {
            return Ok(0);
        }
        entry.status = TextureStatus::Ready;
        let bindings = std::mem::take(&mut entry.bindings);
        for &target in &bindings {
            apply_binding(id, target, scene);
        }
        log::debug!("texture {} ready ({} bindings)", entry.path, bindings.len());
        Ok(bindings.len())
    }

    /// The host could not load `id`. Dependent materials stay blank for good.
    pub fn fail(&mut self, id: TextureId) -> EngineResult<()> {
        let entry = self
            .entries
            .get_mut(id.0 as usize)
            .ok_or(EngineError::UnknownTexture(id))?;
        if entry.status == TextureStatus::Pending {
            log::warn!("texture {} failed to load, leaving it blank", entry.path);
            entry.status = TextureStatus::Failed;
            entry.bindings.clear();
        }
        Ok(())
    }

    pub fn status(&self, id: TextureId) -> Option<TextureStatus> {
        self.entries.get(id.0 as usize).map(|e| e.status)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn apply_binding(id: TextureId, target: BindTarget, scene: &mut Scene) {
    match target {
        BindTarget::MaterialMap(node_id) => {
            match scene.get_mut(node_id).and_then(|n| n.mesh.as_mut()) {
                Some(mesh) => mesh.material.map = Some(id),
                None => log::warn!("texture {:?} bound to {:?}, which has no mesh", id, node_id),
            }
        }
        BindTarget::Environment => scene.environment = Some(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::material::Material;
    use crate::components::mesh::{Geometry, MeshComponent};
    use crate::components::node::Node;

    fn scene_with_mesh(id: NodeId) -> Scene {
        let mut scene = Scene::new();
        scene.spawn(Node::new(id).with_mesh(MeshComponent::new(
            Geometry::sphere(1.0, 8),
            Material::standard(),
        )));
        scene
    }

    fn map_of(scene: &Scene, id: NodeId) -> Option<TextureId> {
        scene.get(id).unwrap().mesh.as_ref().unwrap().material.map
    }

    #[test]
    fn material_stays_blank_until_resolved() {
        let node = NodeId(1);
        let mut scene = scene_with_mesh(node);
        let mut textures = TextureRegistry::new();

        let tex = textures
            .request_for("./earth/map.jpg", TextureOptions::srgb(), BindTarget::MaterialMap(node), &mut scene)
            .unwrap();
        assert_eq!(textures.status(tex), Some(TextureStatus::Pending));
        assert_eq!(map_of(&scene, node), None);

        assert_eq!(textures.resolve(tex, &mut scene).unwrap(), 1);
        assert_eq!(map_of(&scene, node), Some(tex));
        assert_eq!(textures.status(tex), Some(TextureStatus::Ready));
    }

    #[test]
    fn second_completion_is_a_no_op() {
        let node = NodeId(1);
        let mut scene = scene_with_mesh(node);
        let mut textures = TextureRegistry::new();
        let tex = textures
            .request_for("a.jpg", TextureOptions::srgb(), BindTarget::MaterialMap(node), &mut scene)
            .unwrap();
        textures.resolve(tex, &mut scene).unwrap();
        assert_eq!(textures.resolve(tex, &mut scene).unwrap(), 0);
    }

    #[test]
    fn failed_texture_never_binds() {
        let node = NodeId(1);
        let mut scene = scene_with_mesh(node);
        let mut textures = TextureRegistry::new();
        let tex = textures
            .request_for("missing.jpg", TextureOptions::srgb(), BindTarget::MaterialMap(node), &mut scene)
            .unwrap();
        textures.fail(tex).unwrap();
        assert_eq!(textures.status(tex), Some(TextureStatus::Failed));
        assert_eq!(map_of(&scene, node), None);
    }

    #[test]
    fn environment_binding_sets_scene_environment() {
        let mut scene = Scene::new();
        let mut textures = TextureRegistry::new();
        let tex = textures
            .request_for("sky.hdr", TextureOptions::equirect_environment(), BindTarget::Environment, &mut scene)
            .unwrap();
        assert!(scene.environment.is_none());
        textures.resolve(tex, &mut scene).unwrap();
        assert_eq!(scene.environment, Some(tex));
    }

    #[test]
    fn unknown_texture_is_an_error() {
        let mut scene = Scene::new();
        let mut textures = TextureRegistry::new();
        assert!(matches!(
            textures.resolve(TextureId(7), &mut scene),
            Err(EngineError::UnknownTexture(TextureId(7)))
        ));
    }

    #[test]
    fn requests_are_drained_once() {
        let mut textures = TextureRegistry::new();
        textures.request("bg.jpg", TextureOptions::srgb().repeating());
        let requests = textures.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].options.wrap_s, Wrapping::Repeat);
        assert!(textures.take_requests().is_empty());
    }

    #[test]
    fn request_serializes_flat() {
        let request = TextureRequest {
            id: 3,
            path: "bg.jpg".into(),
            options: TextureOptions::srgb().repeating(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["color_space"], "srgb");
        assert_eq!(json["wrap_t"], "repeat");
        assert_eq!(json["mapping"], "uv");
    }
}
