use orrery_common::EngineConfig;
use orrery_input::{Action, Bindings, Input, InputDevice};
use orrery_render::{GpuBackend, RenderError, SceneRenderer, ShaderSource, UniformValue};
use orrery_scene::{Camera, Node, ProjectedOrientation};

use crate::scheduler::LoopHost;

/// The window the engine draws into, created and owned by the host.
pub trait Window {
    fn is_close_requested(&self) -> bool;
    fn present_frame(&mut self);
    fn dispose(&mut self);
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Everything a game touches during a run: window, input latch, GPU backend, renderer,
/// camera, world projection and the scene roots.
///
/// Built by the host and passed by reference to the scheduler and game callbacks.
pub struct EngineContext<W, D, B> {
    pub window: W,
    pub input: Input<D>,
    pub backend: B,
    pub renderer: SceneRenderer,
    pub camera: Camera,
    pub world: ProjectedOrientation,
    pub bindings: Bindings,
    pub models: Vec<Node>,
    delta: f32,
    viewport: (u32, u32),
    stop_requested: bool,
}

impl<W: Window, D: InputDevice, B: GpuBackend> EngineContext<W, D, B> {
    pub fn new(config: &EngineConfig, window: W, device: D, backend: B) -> Self {
        let mut world = ProjectedOrientation::from_config(config);
        let viewport = (window.width(), window.height());
        world.set_viewport(viewport.0 as f32, viewport.1 as f32);
        tracing::info!(
            title = %config.window.title,
            width = viewport.0,
            height = viewport.1,
            "engine context created"
        );
        Self {
            window,
            input: Input::new(device),
            backend,
            renderer: SceneRenderer::from_config(&config.render),
            camera: Camera::from_config(&config.camera),
            world,
            bindings: Bindings::default(),
            models: Vec::new(),
            delta: 0.0,
            viewport,
            stop_requested: false,
        }
    }

    /// Length of the current fixed step in seconds.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Ask the scheduler to stop. Takes effect at the next tick's close check.
    pub fn request_stop(&mut self) {
        tracing::info!("stop requested");
        self.stop_requested = true;
    }

    /// Append a scene root. Roots draw in insertion order.
    pub fn add_model(&mut self, node: Node) {
        self.models.push(node);
    }

    pub fn add_shader(&mut self, name: &str, sources: &[ShaderSource]) -> Result<(), RenderError> {
        self.renderer.add_shader(&mut self.backend, name, sources)
    }

    pub fn use_shader(&mut self, name: &str) -> bool {
        self.renderer.use_shader(&mut self.backend, name)
    }

    /// Upload a uniform the bound shader declares. Returns whether it was uploaded.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> bool {
        self.renderer.set_uniform(&mut self.backend, name, value)
    }

    /// Draw every model with the bound shader. Returns the number of draws.
    pub fn render_models(&mut self) -> Result<usize, RenderError> {
        self.renderer
            .render_models(&mut self.backend, &self.models, &self.world, &self.camera)
    }

    /// Actions the bindings produce from the current input state.
    pub fn active_actions(&self) -> Vec<Action> {
        self.bindings.active_actions(&self.input)
    }

    /// Apply one camera action scaled by the current step.
    pub fn apply_action(&mut self, action: Action) {
        let dt = self.delta;
        let camera = &mut self.camera;
        match action {
            Action::MoveForward => camera.move_forward(dt),
            Action::MoveBackward => camera.move_backward(dt),
            Action::MoveLeft => camera.move_left(dt),
            Action::MoveRight => camera.move_right(dt),
            Action::TurnUp => camera.turn_up(dt),
            Action::TurnDown => camera.turn_down(dt),
            Action::TurnLeft => camera.turn_left(dt),
            Action::TurnRight => camera.turn_right(dt),
            Action::ResetCamera => camera.reset(),
        }
    }

    /// Apply every active action to the camera.
    pub fn apply_camera_input(&mut self) {
        for action in self.active_actions() {
            self.apply_action(action);
        }
    }

    fn sync_viewport(&mut self) {
        let size = (self.window.width(), self.window.height());
        if size != self.viewport && size.0 > 0 && size.1 > 0 {
            tracing::debug!(width = size.0, height = size.1, "viewport resized");
            self.world.set_viewport(size.0 as f32, size.1 as f32);
            self.viewport = size;
        }
    }
}

impl<W: Window, D: InputDevice, B: GpuBackend> LoopHost for EngineContext<W, D, B> {
    fn close_requested(&self) -> bool {
        self.window.is_close_requested()
    }

    fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    fn poll_input(&mut self) {
        self.input.update();
        self.sync_viewport();
    }

    fn set_delta(&mut self, delta: f32) {
        self.delta = delta;
    }

    fn present(&mut self) {
        self.window.present_frame();
    }

    fn cleanup(&mut self) {
        self.window.dispose();
        self.input.dispose();
    }
}
