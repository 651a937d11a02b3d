use anyhow::{bail, Result};
use winit::dpi::LogicalSize;

use vista_engine::coords::{Rect, Vec2};
use vista_engine::core::{App, AppControl, FrameCtx, SetupCtx};
use vista_engine::device::{GpuEvent, GpuInit};
use vista_engine::input::{InputEvent, Key, MouseButton, MouseButtonState};
use vista_engine::window::{Runtime, RuntimeConfig};
use vista_ui::{GuiOverlay, UiInput};

use crate::config::ViewerConfig;
use crate::layout::{column_viewports, sidebar_pixels, PointerRouter, PointerTarget};
use crate::scene::{clear_policies, clear_target, ClearPolicy, Scene, SceneInit};
use crate::sidebar::{sidebar, SceneSummary, SidebarState};

/// Opens the window and runs the viewer until it is closed.
pub fn run(config: ViewerConfig) -> Result<()> {
    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: LogicalSize::new(config.size.0, config.size.1),
        resizable: true,
    };
    Runtime::run(runtime, GpuInit::default(), ViewerApp::new(config))
}

/// Owns the scenes and the GUI and drives them from the engine's frame loop.
pub struct ViewerApp {
    config: ViewerConfig,
    // Field order is drop order: GUI first, then scenes.
    gui: Option<GuiOverlay>,
    scenes: Vec<Scene>,
    router: PointerRouter,
    sidebar: SidebarState,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            gui: None,
            scenes: Vec::new(),
            router: PointerRouter::new(),
            sidebar: SidebarState::default(),
        }
    }

    fn layout(&self, ctx: &SetupCtx<'_, '_>) -> Vec<vista_engine::coords::ViewportRect> {
        let sidebar = sidebar_pixels(self.config.reserved_sidebar(), ctx.window.scale_factor());
        column_viewports(ctx.gpu.size(), sidebar, self.config.scenes.len())
    }

    fn build_gui(&mut self, ctx: &FrameCtx<'_, '_>) {
        let Some(gui) = self.gui.as_mut() else { return };

        let summaries: Vec<SceneSummary<'_>> = self
            .scenes
            .iter()
            .map(|s| SceneSummary {
                name: s.name(),
                camera: *s.camera().state(),
                lighting: *s.lighting(),
            })
            .collect();

        let logical = ctx.window.logical_size();
        let rect = Rect::new(0.0, 0.0, self.config.sidebar_width, logical.y);
        let input = UiInput::from_engine(ctx.input, ctx.input_frame);
        let state = &mut self.sidebar;
        let changes = gui.frame(input, |ui| sidebar(ui, rect, state, ctx.time.dt, &summaries));

        if let Some(enabled) = changes.inertia {
            for scene in &mut self.scenes {
                scene.set_inertia_enabled(enabled);
            }
        }
        if let Some(lighting) = changes.lighting {
            if let Some(scene) = self.scenes.get_mut(self.sidebar.selected) {
                *scene.lighting_mut() = lighting;
            }
        }
    }
}

impl App for ViewerApp {
    fn on_init(&mut self, ctx: &mut SetupCtx<'_, '_>) -> Result<()> {
        let viewports = self.layout(ctx);
        let output_size = ctx.gpu.size();

        for (desc, viewport) in self.config.scenes.iter().zip(viewports) {
            let init = SceneInit {
                device: ctx.gpu.device(),
                queue: ctx.gpu.queue(),
                color_format: ctx.gpu.surface_format(),
                depth_format: ctx.gpu.depth_format(),
                output_size,
                viewport,
            };
            let scene = Scene::on_init(&init, desc, &self.config)?;

            // Validation errors from pipeline creation arrive asynchronously.
            for event in ctx.gpu.poll_events() {
                match event {
                    GpuEvent::Error(msg) => bail!("scene `{}`: GPU error: {msg}", desc.name),
                    GpuEvent::DeviceLost { reason, message } => {
                        bail!("device lost during init ({reason}): {message}")
                    }
                }
            }
            self.scenes.push(scene);
        }

        if self.config.show_gui {
            self.gui = Some(GuiOverlay::new());
        }

        log::info!("{} scene(s) ready", self.scenes.len());
        Ok(())
    }

    fn on_resize(&mut self, ctx: &mut SetupCtx<'_, '_>) {
        let viewports = self.layout(ctx);
        let output_size = ctx.gpu.size();
        for (scene, viewport) in self.scenes.iter_mut().zip(viewports) {
            scene.on_resize(ctx.gpu.device(), output_size, viewport);
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        for event in ctx.gpu.poll_events() {
            match event {
                GpuEvent::Error(msg) => log::error!("GPU error: {msg}"),
                GpuEvent::DeviceLost { reason, message } => {
                    log::error!("device lost ({reason}): {message}");
                    return AppControl::Exit;
                }
            }
        }

        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        let scale = ctx.window.scale_factor();
        let gui = self.gui.as_ref();
        for event in ctx.input_frame.events() {
            route_input(
                &mut self.router,
                &mut self.scenes,
                |pos| gui.is_some_and(|g| g.wants_pointer(pos)),
                scale,
                event,
            );
        }

        self.build_gui(ctx);

        let time = ctx.time.elapsed;
        let scenes = &mut self.scenes;
        let gui = &mut self.gui;
        let count = scenes.len();
        ctx.render(|rctx, target| {
            for (scene, clear) in scenes.iter_mut().zip(clear_policies(count)) {
                scene.on_frame(
                    rctx.queue,
                    target.encoder,
                    target.color_view,
                    rctx.surface_size,
                    clear,
                    time,
                );
            }
            if let Some(clear) = ClearPolicy::background(count) {
                clear_target(target.encoder, target.color_view, clear);
            }
            if let Some(gui) = gui.as_mut() {
                gui.render(rctx, target);
            }
        })
    }
}

/// Delivers one input event to the scenes.
///
/// Positions arrive in logical pixels and are scaled to the surface's physical
/// pixels. Events over the GUI are left to it, except the release that ends a
/// scene drag.
pub fn route_input<T: PointerTarget>(
    router: &mut PointerRouter,
    scenes: &mut [T],
    gui_wants: impl Fn(Vec2) -> bool,
    scale: f32,
    event: &InputEvent,
) {
    let captured = router.capture().is_some();
    match event {
        InputEvent::PointerMoved(ev) => {
            if captured || !gui_wants(Vec2::new(ev.x, ev.y)) {
                router.pointer_move(scenes, ev.x * scale, ev.y * scale);
            }
        }
        InputEvent::PointerButton(ev) if ev.button == MouseButton::Left => match ev.state {
            MouseButtonState::Pressed => {
                if !gui_wants(Vec2::new(ev.x, ev.y)) {
                    router.pointer_down(scenes, ev.x * scale, ev.y * scale);
                }
            }
            MouseButtonState::Released => {
                if captured || !gui_wants(Vec2::new(ev.x, ev.y)) {
                    router.pointer_up(scenes, ev.x * scale, ev.y * scale);
                }
            }
        },
        InputEvent::MouseWheel { delta, x, y, .. } => {
            if !gui_wants(Vec2::new(*x, *y)) {
                router.scroll(scenes, x * scale, y * scale, delta.lines_y());
            }
        }
        InputEvent::Focused(false) => router.cancel(scenes),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_engine::coords::CanvasSize;
    use vista_engine::input::{Modifiers, MouseWheelDelta, PointerButtonEvent, PointerMoveEvent};

    use crate::camera::CameraState;
    use crate::scene::SceneView;

    fn two_scenes(sidebar: u32) -> Vec<SceneView> {
        column_viewports(CanvasSize::new(800, 400), sidebar, 2)
            .into_iter()
            .map(|vp| SceneView::new(vp, CameraState::default()))
            .collect()
    }

    fn button(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn no_gui(_: Vec2) -> bool {
        false
    }

    #[test]
    fn logical_positions_are_scaled_before_hit_testing() {
        // Scene 1 starts at x = 400 physical, i.e. 200 logical at scale 2.
        let mut scenes = two_scenes(0);
        let mut router = PointerRouter::new();
        route_input(&mut router, &mut scenes, no_gui, 2.0, &button(MouseButtonState::Pressed, 210.0, 10.0));
        assert_eq!(router.capture(), Some(1));
    }

    #[test]
    fn gui_consumes_press_over_panel() {
        let mut scenes = two_scenes(0);
        let mut router = PointerRouter::new();
        let over_panel = |p: Vec2| p.x < 100.0;

        route_input(&mut router, &mut scenes, over_panel, 1.0, &button(MouseButtonState::Pressed, 50.0, 10.0));
        assert_eq!(router.capture(), None);
        assert!(!scenes[0].camera().is_dragging());
    }

    #[test]
    fn drag_into_gui_keeps_rotating_and_releases() {
        let mut scenes = two_scenes(0);
        let mut router = PointerRouter::new();
        let over_panel = |p: Vec2| p.x < 100.0;

        route_input(&mut router, &mut scenes, over_panel, 1.0, &button(MouseButtonState::Pressed, 150.0, 10.0));
        let before = *scenes[0].camera().state();
        route_input(&mut router, &mut scenes, over_panel, 1.0, &moved(50.0, 10.0));
        assert_ne!(*scenes[0].camera().state(), before);

        route_input(&mut router, &mut scenes, over_panel, 1.0, &button(MouseButtonState::Released, 50.0, 10.0));
        assert!(!scenes[0].camera().is_dragging());
    }

    #[test]
    fn wheel_zooms_scene_under_pointer() {
        let mut scenes = two_scenes(0);
        let mut router = PointerRouter::new();
        let wheel = InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 },
            x: 600.0,
            y: 10.0,
            modifiers: Modifiers::default(),
        };
        route_input(&mut router, &mut scenes, no_gui, 1.0, &wheel);

        let default_zoom = CameraState::default().zoom;
        assert_eq!(scenes[0].camera().state().zoom, default_zoom);
        assert!((scenes[1].camera().state().zoom - (default_zoom + 0.1)).abs() < 1e-6);
    }

    #[test]
    fn focus_loss_ends_drag() {
        let mut scenes = two_scenes(0);
        let mut router = PointerRouter::new();
        route_input(&mut router, &mut scenes, no_gui, 1.0, &button(MouseButtonState::Pressed, 10.0, 10.0));
        route_input(&mut router, &mut scenes, no_gui, 1.0, &InputEvent::Focused(false));
        assert!(!scenes[0].camera().is_dragging());
        assert_eq!(router.capture(), None);
    }
}
