use std::f32::consts::TAU;

use glam::Vec3;
use orrery_engine::*;

use crate::bodies::{self, CarouselConfig};

/// Node handles produced by [`build_scene`].
#[derive(Debug, Clone)]
pub struct CarouselNodes {
    pub group: NodeId,
    /// Body nodes in orbit order.
    pub bodies: Vec<NodeId>,
    /// Cloud shell per body, if it has one.
    pub clouds: Vec<Option<NodeId>>,
    pub backdrop: NodeId,
    pub environment: Option<TextureId>,
}

/// Local position of body `index` out of `count` on the orbit ring.
pub fn orbit_position(index: usize, count: usize, orbit_radius: f32) -> Vec3 {
    let angle = TAU * index as f32 / count as f32;
    Vec3::new(orbit_radius * angle.cos(), 0.0, orbit_radius * angle.sin())
}

/// Pick the host manifest when it fits the carousel layout, otherwise the
/// built-in one.
pub fn resolve_manifest(host: Option<SceneManifest>) -> SceneManifest {
    match host.map(check_manifest) {
        Some(Ok(manifest)) => manifest,
        Some(Err(e)) => {
            log::warn!("{}; using built-in manifest", e);
            bodies::default_manifest()
        }
        None => bodies::default_manifest(),
    }
}

/// The manifest only supplies paths. Body count, cloud placement and the
/// backdrop are fixed by the carousel, so a manifest must line up with them.
pub fn check_manifest(manifest: SceneManifest) -> EngineResult<SceneManifest> {
    let manifest = manifest.expect_bodies(bodies::BODY_COUNT)?;
    if manifest.backdrop.is_none() {
        return Err(EngineError::InvalidManifest("backdrop path missing".into()));
    }
    for (i, desc) in manifest.bodies.iter().enumerate() {
        match (bodies::has_clouds(i), desc.clouds.is_some()) {
            (true, false) => {
                return Err(EngineError::InvalidManifest(format!(
                    "body {} ({}) needs a cloud path",
                    i, desc.name
                )))
            }
            (false, true) => {
                return Err(EngineError::InvalidManifest(format!(
                    "body {} ({}) has no cloud shell",
                    i, desc.name
                )))
            }
            _ => {}
        }
    }
    Ok(manifest)
}

/// Build backdrop, OrbitGroup and bodies, and queue every texture they need.
///
/// Never waits on a load: materials start blank and pick up their maps when
/// the host reports completion.
pub fn build_scene(
    ctx: &mut EngineContext,
    manifest: &SceneManifest,
    config: &CarouselConfig,
) -> EngineResult<CarouselNodes> {
    let manifest = check_manifest(manifest.clone())?;
    let backdrop = match &manifest.backdrop {
        Some(path) => build_backdrop(ctx, path, config)?,
        None => return Err(EngineError::InvalidManifest("backdrop path missing".into())),
    };

    let environment = match &manifest.environment {
        Some(url) => Some(ctx.textures.request_for(
            url.as_str(),
            TextureOptions::equirect_environment(),
            BindTarget::Environment,
            &mut ctx.scene,
        )?),
        None => None,
    };

    let group = ctx.next_id();
    ctx.attach(
        Node::new(group)
            .with_tag("orbit-group")
            .with_position(Vec3::new(0.0, config.group_offset_y, 0.0))
            .with_rotation(Vec3::new(config.group_tilt, 0.0, 0.0)),
        None,
    );

    let count = manifest.bodies.len();
    let mut body_ids = Vec::with_capacity(count);
    let mut cloud_ids = Vec::with_capacity(count);

    for (i, desc) in manifest.bodies.iter().enumerate() {
        let id = ctx.next_id();
        let mesh = MeshComponent::new(
            Geometry::sphere(config.body_radius, config.segments),
            Material::standard(),
        );
        ctx.attach(
            Node::new(id)
                .with_tag(desc.name.as_str())
                .with_position(orbit_position(i, count, config.orbit_radius))
                .with_mesh(mesh),
            Some(group),
        );
        ctx.textures.request_for(
            desc.map.as_str(),
            TextureOptions::srgb(),
            BindTarget::MaterialMap(id),
            &mut ctx.scene,
        )?;
        body_ids.push(id);

        let cloud = match (bodies::has_clouds(i), &desc.clouds) {
            (true, Some(path)) => Some(build_clouds(ctx, id, &desc.name, path, config)?),
            (true, None) => {
                return Err(EngineError::InvalidManifest(format!(
                    "body {} ({}) needs a cloud path",
                    i, desc.name
                )))
            }
            (false, _) => None,
        };
        cloud_ids.push(cloud);
    }

    log::info!(
        "carousel built: {} bodies, {} cloud shells, {} textures requested",
        body_ids.len(),
        cloud_ids.iter().flatten().count(),
        ctx.textures.len()
    );

    Ok(CarouselNodes {
        group,
        bodies: body_ids,
        clouds: cloud_ids,
        backdrop,
        environment,
    })
}

fn build_clouds(
    ctx: &mut EngineContext,
    body: NodeId,
    body_name: &str,
    path: &str,
    config: &CarouselConfig,
) -> EngineResult<NodeId> {
    let id = ctx.next_id();
    let material = Material::standard()
        .with_opacity(config.cloud_opacity)
        .with_blend(BlendMode::Additive);
    let mesh = MeshComponent::new(
        Geometry::sphere(config.body_radius * config.cloud_scale, config.segments),
        material,
    )
    .with_layer(RenderLayer::Atmosphere);
    ctx.attach(
        Node::new(id).with_tag(format!("{}-clouds", body_name)).with_mesh(mesh),
        Some(body),
    );
    ctx.textures.request_for(
        path,
        TextureOptions::srgb(),
        BindTarget::MaterialMap(id),
        &mut ctx.scene,
    )?;
    Ok(id)
}

fn build_backdrop(ctx: &mut EngineContext, path: &str, config: &CarouselConfig) -> EngineResult<NodeId> {
    let id = ctx.next_id();
    let material = Material::basic()
        .with_opacity(config.backdrop_opacity)
        .with_side(Side::Back);
    let mesh = MeshComponent::new(Geometry::sphere(config.backdrop_radius, config.segments), material)
        .with_layer(RenderLayer::Backdrop);
    ctx.attach(Node::new(id).with_tag("backdrop").with_mesh(mesh), None);
    ctx.textures.request_for(
        path,
        TextureOptions::srgb().repeating(),
        BindTarget::MaterialMap(id),
        &mut ctx.scene,
    )?;
    Ok(id)
}
