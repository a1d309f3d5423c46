use glam::{Mat3, Mat4, Vec3};
use warpfolio_protocol::{RenderCommand, ThemeToken, Viewport};

use crate::scene::black_hole::{self, BlackHolePose};
use crate::scene::camera::Projected;
use crate::scene::planet::{self, Facing, PlanetModel, PlanetPose};
use crate::scene::{AmbientMotion, Fog, SceneAssets, SceneCamera, SceneParameters};

/// World-space streak length at full warp.
const STREAK_LENGTH: f32 = 8.0;
const MIN_DOT_RADIUS: f64 = 0.5;
const DISK_ALPHA: f64 = 0.8;

/// Everything the 3D scene reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame<'a> {
    pub params: &'a SceneParameters,
    pub ambient: &'a AmbientMotion,
    pub assets: &'a SceneAssets,
    pub planet: &'a PlanetModel,
}

struct Projector<'a> {
    camera: SceneCamera,
    matrix: Mat4,
    viewport: &'a Viewport,
    fog: Fog,
}

impl<'a> Projector<'a> {
    fn new(params: &SceneParameters, viewport: &'a Viewport) -> Self {
        let camera = SceneCamera::at_depth(params.camera_z);
        Self {
            matrix: camera.view_projection(viewport),
            camera,
            viewport,
            fog: params.fog,
        }
    }

    fn raw(&self, world: Vec3) -> Option<Projected> {
        self.camera.project_with(&self.matrix, world, self.viewport)
    }

    /// Project and fog a world point; fully fogged points are dropped.
    fn project(&self, world: Vec3) -> Option<(Projected, f64)> {
        let p = self.raw(world)?;
        let alpha = self.fog.visibility(p.depth);
        (alpha > 0.0).then_some((p, alpha))
    }

    fn segment(
        &self,
        commands: &mut Vec<RenderCommand>,
        a: Vec3,
        b: Vec3,
        color: ThemeToken,
        width: f64,
        alpha: f64,
    ) {
        if let (Some((pa, fa)), Some((pb, fb))) = (self.project(a), self.project(b)) {
            commands.push(RenderCommand::DrawLine {
                from: pa.screen,
                to: pb.screen,
                color,
                width,
                alpha: fa.min(fb) * alpha,
            });
        }
    }
}

fn dot(center: &Projected, radius: f64, token: ThemeToken, alpha: f64) -> RenderCommand {
    RenderCommand::DrawCircle {
        center: center.screen,
        radius: radius.max(MIN_DOT_RADIUS),
        fill: Some(token),
        stroke: None,
        stroke_width: 0.0,
        alpha,
    }
}

/// Render the 3D backdrop: starfield, black hole and planet under the
/// current camera, with fog, scene fade and vignette applied.
pub fn render_scene(frame: &SceneFrame<'_>, viewport: &Viewport) -> Vec<RenderCommand> {
    if viewport.is_empty() {
        return Vec::new();
    }
    let params = frame.params;
    let projector = Projector::new(params, viewport);

    let mut commands = Vec::with_capacity(frame.assets.starfield.len() + 2048);
    commands.push(RenderCommand::begin_group("scene"));
    commands.push(RenderCommand::DrawRect {
        rect: viewport.bounds(),
        color: ThemeToken::SpaceBackground,
        border_color: None,
        corner_radius: 0.0,
    });

    let faded = params.scene_opacity < 1.0;
    if faded {
        commands.push(RenderCommand::PushOpacity {
            alpha: params.scene_opacity.max(0.0),
        });
    }

    render_starfield(&mut commands, frame, &projector);
    if params.black_hole_visible {
        render_black_hole(&mut commands, frame, &projector);
    }
    if params.planet_visible {
        render_planet(&mut commands, frame, &projector);
    }

    if faded {
        commands.push(RenderCommand::PopOpacity);
    }

    if params.vignette.strength > 0.0 {
        let half_diagonal = viewport.width.hypot(viewport.height) / 2.0;
        commands.push(RenderCommand::DrawVignette {
            center: viewport.center(),
            inner_radius: half_diagonal * params.vignette.inner_radius,
            outer_radius: half_diagonal,
            color: ThemeToken::VoidBlack,
            strength: params.vignette.strength,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

fn render_starfield(commands: &mut Vec<RenderCommand>, frame: &SceneFrame<'_>, projector: &Projector<'_>) {
    let params = frame.params;
    let roll = Mat3::from_rotation_z(frame.ambient.starfield_roll as f32);
    let drift = Vec3::new(0.0, 0.0, frame.ambient.starfield_z as f32);
    let streak = params.is_warping && params.warp_speed > 0.0;
    let streak_length = STREAK_LENGTH * params.warp_speed as f32;

    for star in &frame.assets.starfield.points {
        let world = roll * star.position + drift;
        let Some((head, alpha)) = projector.project(world) else {
            continue;
        };
        let radius = head.radius(star.size);

        // Tails point away from the camera; stars rush toward +Z.
        let tail = if streak {
            projector.raw(world - Vec3::Z * streak_length)
        } else {
            None
        };
        match tail {
            Some(tail) => commands.push(RenderCommand::DrawLine {
                from: tail.screen,
                to: head.screen,
                color: ThemeToken::WarpStreak,
                width: radius.max(MIN_DOT_RADIUS),
                alpha,
            }),
            None => commands.push(dot(&head, radius, star.tint.token(), alpha)),
        }
    }
}

fn render_black_hole(commands: &mut Vec<RenderCommand>, frame: &SceneFrame<'_>, projector: &Projector<'_>) {
    let pose = BlackHolePose::new(frame.ambient, frame.params.black_hole_scale);
    commands.push(RenderCommand::begin_group("black-hole"));

    let mut front = Vec::new();
    for particle in &frame.assets.accretion_disk.points {
        let world = pose.to_world(particle.position);
        let Some((p, alpha)) = projector.project(world) else {
            continue;
        };
        let cmd = dot(
            &p,
            p.radius(pose.world_length(particle.size)),
            particle.tint.token(),
            alpha * DISK_ALPHA,
        );
        // The near half of the disk passes in front of the horizon.
        if world.z >= black_hole::POSITION.z {
            front.push(cmd);
        } else {
            commands.push(cmd);
        }
    }

    if let Some((center, alpha)) = projector.project(black_hole::POSITION) {
        let ring = center.radius(pose.world_length(black_hole::PHOTON_RING_RADIUS));
        commands.push(RenderCommand::DrawCircle {
            center: center.screen,
            radius: ring,
            fill: None,
            stroke: Some(ThemeToken::PhotonRing),
            stroke_width: (ring * 0.08).max(1.5),
            alpha,
        });
        commands.push(dot(
            &center,
            center.radius(pose.world_length(black_hole::HORIZON_RADIUS)),
            ThemeToken::EventHorizon,
            1.0,
        ));
    }

    commands.extend(front);
    commands.push(RenderCommand::EndGroup);
}

fn render_planet(commands: &mut Vec<RenderCommand>, frame: &SceneFrame<'_>, projector: &Projector<'_>) {
    let pose = PlanetPose::new(frame.ambient);
    let Some((center, alpha)) = projector.project(pose.center) else {
        return;
    };
    let model = frame.planet;
    commands.push(RenderCommand::begin_group("planet"));

    render_rings(commands, model, &pose, projector, Facing::Back);

    let body = center.radius(planet::RADIUS);
    commands.push(dot(
        &center,
        body * f64::from(planet::OUTER_ATMOSPHERE_SCALE),
        ThemeToken::AtmosphereOuter,
        alpha * 0.15,
    ));
    commands.push(dot(
        &center,
        body * f64::from(planet::ATMOSPHERE_SCALE),
        ThemeToken::Atmosphere,
        alpha * 0.25,
    ));
    commands.push(dot(&center, body, ThemeToken::PlanetSurface, alpha));

    for line in &model.grid {
        for pair in line.windows(2) {
            if pose.body_facing(pair[0]) == Facing::Back || pose.body_facing(pair[1]) == Facing::Back {
                continue;
            }
            projector.segment(
                commands,
                pose.body_to_world(pair[0]),
                pose.body_to_world(pair[1]),
                ThemeToken::PlanetGrid,
                1.0,
                0.6,
            );
        }
    }

    render_rings(commands, model, &pose, projector, Facing::Front);

    if let Some((moon, moon_alpha)) = projector.project(pose.moon_center()) {
        commands.push(dot(&moon, moon.radius(planet::MOON_RADIUS), ThemeToken::Moon, moon_alpha));
    }

    commands.push(RenderCommand::EndGroup);
}

fn render_rings(
    commands: &mut Vec<RenderCommand>,
    model: &PlanetModel,
    pose: &PlanetPose,
    projector: &Projector<'_>,
    facing: Facing,
) {
    for ring in &model.rings {
        let (color, width, alpha) = if ring.glow {
            (ThemeToken::RingGlow, 3.0, 0.3)
        } else {
            (ThemeToken::PlanetRing, 1.0, 0.7)
        };
        for pair in ring.outline.windows(2) {
            if pose.ring_facing(pair[0]) != facing {
                continue;
            }
            projector.segment(
                commands,
                pose.ring_to_world(pair[0]),
                pose.ring_to_world(pair[1]),
                color,
                width,
                alpha,
            );
        }
    }
}
