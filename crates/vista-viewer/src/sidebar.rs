//! GUI sidebar: frame time, scene selector, camera readout, inertia toggle and
//! light editing for the selected scene.

use glam::Vec4;
use vista_engine::coords::Rect;
use vista_ui::Ui;

use crate::camera::CameraState;
use crate::gpu::LightingUniforms;

/// Sidebar state that persists between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarState {
    pub selected: usize,
    pub inertia: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self { selected: 0, inertia: true }
    }
}

/// What the sidebar shows about one scene.
#[derive(Debug, Clone)]
pub struct SceneSummary<'a> {
    pub name: &'a str,
    pub camera: CameraState,
    pub lighting: LightingUniforms,
}

/// Edits made this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidebarChanges {
    pub inertia: Option<bool>,
    /// New lighting for the selected scene.
    pub lighting: Option<LightingUniforms>,
}

pub fn sidebar(
    ui: &mut Ui<'_>,
    rect: Rect,
    state: &mut SidebarState,
    frame_dt: f32,
    scenes: &[SceneSummary<'_>],
) -> SidebarChanges {
    let mut changes = SidebarChanges::default();
    if state.selected >= scenes.len() {
        state.selected = 0;
    }

    ui.panel(rect, "vista", |ui| {
        let ms = frame_dt * 1000.0;
        let fps = if frame_dt > 0.0 { 1.0 / frame_dt } else { 0.0 };
        ui.caption(format!("{ms:.2} ms  ({fps:.0} fps)"));
        ui.separator();

        ui.label("Scene");
        for (i, scene) in scenes.iter().enumerate() {
            if ui.radio(scene.name, state.selected == i) {
                state.selected = i;
            }
        }

        let Some(scene) = scenes.get(state.selected) else {
            ui.caption("no scenes");
            return;
        };

        ui.separator();
        ui.label("Camera");
        let cam = scene.camera;
        ui.caption(format!("yaw   {:+.3}", cam.yaw()));
        ui.caption(format!("pitch {:+.3}", cam.pitch()));
        ui.caption(format!("zoom  {:+.3}", cam.zoom));
        if ui.checkbox("Inertia", &mut state.inertia) {
            changes.inertia = Some(state.inertia);
        }

        let mut lighting = scene.lighting;
        let mut edited = false;
        for i in 0..LightingUniforms::LIGHT_COUNT {
            ui.separator();
            ui.label(format!("Light {}", i + 1));
            edited |= vec3_sliders(ui, ["dir x", "dir y", "dir z"], &mut lighting.directions[i], -1.0..=1.0);
            edited |= vec3_sliders(ui, ["red", "green", "blue"], &mut lighting.colors[i], 0.0..=1.0);
        }
        if edited {
            changes.lighting = Some(lighting);
        }
    });

    changes
}

/// Three sliders over the xyz part of `v`; `w` is left alone.
fn vec3_sliders(
    ui: &mut Ui<'_>,
    labels: [&str; 3],
    v: &mut Vec4,
    range: std::ops::RangeInclusive<f32>,
) -> bool {
    let mut changed = false;
    changed |= ui.slider(labels[0], &mut v.x, range.clone());
    changed |= ui.slider(labels[1], &mut v.y, range.clone());
    changed |= ui.slider(labels[2], &mut v.z, range);
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_engine::text::FontSystem;
    use vista_ui::{GuiOverlay, UiInput};

    fn summaries() -> Vec<SceneSummary<'static>> {
        vec![
            SceneSummary {
                name: "cube",
                camera: CameraState::default(),
                lighting: LightingUniforms::default(),
            },
            SceneSummary {
                name: "pyramid",
                camera: CameraState::default(),
                lighting: LightingUniforms::default(),
            },
        ]
    }

    #[test]
    fn idle_frame_changes_nothing() {
        let mut gui = GuiOverlay::with_fonts(FontSystem::new(), None);
        let mut state = SidebarState::default();
        let scenes = summaries();

        let changes = gui.frame(UiInput::default(), |ui| {
            sidebar(ui, Rect::new(0.0, 0.0, 260.0, 720.0), &mut state, 0.016, &scenes)
        });

        assert_eq!(changes, SidebarChanges::default());
        assert_eq!(state, SidebarState::default());
        assert!(gui.wants_pointer(vista_engine::coords::Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn out_of_range_selection_resets() {
        let mut gui = GuiOverlay::with_fonts(FontSystem::new(), None);
        let mut state = SidebarState { selected: 9, inertia: true };
        let scenes = summaries();
        gui.frame(UiInput::default(), |ui| {
            sidebar(ui, Rect::new(0.0, 0.0, 260.0, 720.0), &mut state, 0.0, &scenes)
        });
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn empty_scene_list_is_shown() {
        let mut gui = GuiOverlay::with_fonts(FontSystem::new(), None);
        let mut state = SidebarState::default();
        let changes = gui.frame(UiInput::default(), |ui| {
            sidebar(ui, Rect::new(0.0, 0.0, 260.0, 720.0), &mut state, 0.016, &[])
        });
        assert_eq!(changes, SidebarChanges::default());
    }
}
