//! Spinning cluster of spheres drawn with an outline pass and a cel-shaded pass.

use glam::Vec3;
use orrery_input::{InputDevice, KeyCode};
use orrery_kernel::{EngineContext, EngineError, Game, Window};
use orrery_render::{GpuBackend, Material, ShaderSource, ShaderStage, TextureHandle, UniformValue};
use orrery_scene::{MeshHandle, Node, Orientation};

pub const OUTLINE_SHADER: &str = "outline";
pub const CEL_SHADER: &str = "cel";
pub const MATERIAL: &str = "test";

pub const SPHERE_MESH: MeshHandle = MeshHandle(1);
pub const SPHERE_TEXTURE: TextureHandle = TextureHandle(1);

/// Degrees per second around the group's x axis.
pub const SPIN_RATE: f32 = 60.0;
/// Fixed tilt of the group around its y axis, in degrees.
pub const TILT: f32 = -7.0;
pub const SPACING: f32 = 3.0;

const OUTLINE_WIDTH: f32 = 0.05;
const OUTLINE_COLOR: Vec3 = Vec3::ZERO;

pub fn shader_sources(name: &str) -> Vec<ShaderSource> {
    let (vert, frag) = match name {
        OUTLINE_SHADER => (
            include_str!("../shaders/outline.vert"),
            include_str!("../shaders/outline.frag"),
        ),
        _ => (
            include_str!("../shaders/cel.vert"),
            include_str!("../shaders/cel.frag"),
        ),
    };
    vec![
        ShaderSource::new(ShaderStage::Vertex, vert),
        ShaderSource::new(ShaderStage::Fragment, frag),
    ]
}

/// A 2x2x2 block of spheres spaced `SPACING` apart, grouped under one node.
pub fn build_scene() -> Node {
    let mut children = Vec::with_capacity(8);
    for i in -1..1 {
        for j in -1..1 {
            for k in -1..1 {
                let at = Vec3::new(i as f32, j as f32, k as f32) * SPACING;
                children.push(Node::leaf(
                    MATERIAL,
                    SPHERE_MESH,
                    Orientation::from_translation(at),
                ));
            }
        }
    }
    Node::group(Orientation::default(), children)
}

#[derive(Debug)]
pub struct DemoGame {
    group: usize,
    spin: f32,
    light_dir: Vec3,
    light_follows_camera: bool,
    draws: u64,
}

impl DemoGame {
    /// Register shaders, the material and the sphere group on `ctx`.
    pub fn setup<W, D, B>(ctx: &mut EngineContext<W, D, B>) -> Result<Self, EngineError>
    where
        W: Window,
        D: InputDevice,
        B: GpuBackend,
    {
        for name in [OUTLINE_SHADER, CEL_SHADER] {
            ctx.add_shader(name, &shader_sources(name))?;
        }
        ctx.renderer
            .add_material(MATERIAL, Material::new(SPHERE_TEXTURE, Vec3::ONE));

        let group = ctx.models.len();
        ctx.add_model(build_scene());
        tracing::info!(leaves = ctx.models[group].leaf_count(), "demo scene built");

        Ok(Self {
            group,
            spin: 0.0,
            light_dir: ctx.camera.backward(),
            light_follows_camera: false,
            draws: 0,
        })
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn light_dir(&self) -> Vec3 {
        self.light_dir
    }

    pub fn light_follows_camera(&self) -> bool {
        self.light_follows_camera
    }

    /// Draw calls issued across every frame so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl<W, D, B> Game<EngineContext<W, D, B>> for DemoGame
where
    W: Window,
    D: InputDevice,
    B: GpuBackend,
{
    fn handle_input(&mut self, ctx: &mut EngineContext<W, D, B>) -> Result<(), EngineError> {
        ctx.apply_camera_input();
        if ctx.input.key_just_down(KeyCode::L) {
            self.light_dir = ctx.camera.backward();
            tracing::debug!(light = ?self.light_dir, "light moved to camera");
        }
        if ctx.input.key_just_down(KeyCode::T) {
            self.light_follows_camera = !self.light_follows_camera;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext<W, D, B>) -> Result<(), EngineError> {
        self.spin = (self.spin + SPIN_RATE * ctx.delta()) % 360.0;
        if let Some(group) = ctx.models.get_mut(self.group) {
            group
                .orientation_mut()
                .set_rotation_xyz(self.spin.to_radians(), TILT.to_radians(), 0.0);
        }
        if self.light_follows_camera {
            self.light_dir = ctx.camera.backward();
        }
        Ok(())
    }

    fn render(&mut self, ctx: &mut EngineContext<W, D, B>) -> Result<(), EngineError> {
        let eye = ctx.camera.pos();
        ctx.use_shader(OUTLINE_SHADER);
        ctx.set_uniform("width", UniformValue::Float(OUTLINE_WIDTH));
        ctx.set_uniform("outlineColor", UniformValue::Vec3(OUTLINE_COLOR));
        ctx.set_uniform("loc", UniformValue::Vec3(eye));
        self.draws += ctx.render_models()? as u64;

        ctx.use_shader(CEL_SHADER);
        ctx.set_uniform("lightDir", UniformValue::Vec3(self.light_dir));
        self.draws += ctx.render_models()? as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessWindow, KeyPress, ScriptedInput};
    use orrery_common::EngineConfig;
    use orrery_kernel::LoopHost;
    use orrery_render::{Command, RecordingBackend};

    type DemoContext = EngineContext<HeadlessWindow, ScriptedInput, RecordingBackend>;

    fn context(script: Vec<KeyPress>) -> DemoContext {
        EngineContext::new(
            &EngineConfig::default(),
            HeadlessWindow::new(640, 480, 10),
            ScriptedInput::new(script),
            RecordingBackend::new(),
        )
    }

    #[test]
    fn scene_is_two_by_two_by_two() {
        let scene = build_scene();
        assert_eq!(scene.leaf_count(), 8);
        assert_eq!(scene.depth(), 2);
        let last = scene.children()[7].orientation().translation();
        assert_eq!(last, Vec3::ZERO);
        let first = scene.children()[0].orientation().translation();
        assert_eq!(first, Vec3::splat(-SPACING));
    }

    #[test]
    fn shaders_declare_their_pass_uniforms() {
        let mut ctx = context(Vec::new());
        DemoGame::setup(&mut ctx).unwrap();
        let outline = ctx.renderer.shader(OUTLINE_SHADER).unwrap();
        assert!(outline.declares("width"));
        assert!(outline.declares("loc"));
        let cel = ctx.renderer.shader(CEL_SHADER).unwrap();
        assert!(cel.declares("lightDir"));
        assert!(cel.declares("sampler"));
        assert!(cel.declares("normalMatrix"));
    }

    #[test]
    fn frame_draws_every_sphere_twice() {
        let mut ctx = context(Vec::new());
        let mut game = DemoGame::setup(&mut ctx).unwrap();
        ctx.backend.clear();
        game.render(&mut ctx).unwrap();
        assert_eq!(ctx.backend.draw_count(), 16);
        assert_eq!(game.draws(), 16);
        assert_eq!(ctx.backend.uniform_values("lightDir").count(), 1);
        let binds = ctx
            .backend
            .commands()
            .iter()
            .filter(|c| matches!(c, Command::BindTexture { .. }))
            .count();
        assert_eq!(binds, 2);
    }

    #[test]
    fn update_spins_group() {
        let mut ctx = context(Vec::new());
        let mut game = DemoGame::setup(&mut ctx).unwrap();
        ctx.set_delta(0.5);
        game.update(&mut ctx).unwrap();
        assert!((game.spin() - 30.0).abs() < 1e-4);
        let rotation = ctx.models[0].orientation().rotation();
        let expected = Vec3::new(30f32.to_radians(), TILT.to_radians(), 0.0);
        assert!((rotation - expected).length() < 1e-5);
    }

    #[test]
    fn light_keys_move_and_toggle() {
        let mut ctx = context(vec![
            KeyPress::new(KeyCode::RIGHT, 2, 3),
            KeyPress::new(KeyCode::L, 3, 4),
            KeyPress::new(KeyCode::T, 4, 5),
        ]);
        let mut game = DemoGame::setup(&mut ctx).unwrap();
        let initial = game.light_dir();
        ctx.set_delta(1.0);
        for _ in 0..4 {
            ctx.poll_input();
            game.handle_input(&mut ctx).unwrap();
        }
        assert!((game.light_dir() - ctx.camera.backward()).length() < 1e-5);
        assert!((game.light_dir() - initial).length() > 1e-3);
        assert!(game.light_follows_camera());
    }
}
