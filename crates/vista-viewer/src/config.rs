use std::path::{Path, PathBuf};

use crate::camera::CameraState;

/// Overrides the resource directory at runtime.
pub const RESOURCE_DIR_ENV: &str = "VISTA_RESOURCE_DIR";

/// Where a scene's mesh comes from. Paths are relative to the resource
/// directory unless absolute.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshSource {
    Obj(PathBuf),
    /// Line-based `[points]` / `[indices]` file with 2D or 3D points.
    Text { path: PathBuf, dimensions: u32 },
}

/// One viewport's content.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDesc {
    pub name: String,
    pub mesh: MeshSource,
    pub texture: Option<PathBuf>,
    pub shader: PathBuf,
    pub camera: CameraState,
}

impl SceneDesc {
    pub fn new(name: impl Into<String>, mesh: MeshSource) -> Self {
        Self {
            name: name.into(),
            mesh,
            texture: None,
            shader: PathBuf::from("shader.wgsl"),
            camera: CameraState::default(),
        }
    }

    pub fn texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture = Some(path.into());
        self
    }

    pub fn shader(mut self, path: impl Into<PathBuf>) -> Self {
        self.shader = path.into();
        self
    }

    pub fn camera(mut self, camera: CameraState) -> Self {
        self.camera = camera;
        self
    }
}

/// Top-level viewer configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    /// Logical pixels.
    pub size: (f64, f64),
    pub resource_dir: PathBuf,
    /// Logical pixels reserved on the left for the GUI.
    pub sidebar_width: f32,
    pub show_gui: bool,
    pub scenes: Vec<SceneDesc>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "vista".to_string(),
            size: (1280.0, 720.0),
            resource_dir: default_resource_dir(),
            sidebar_width: 260.0,
            show_gui: true,
            scenes: vec![
                SceneDesc::new("cube", MeshSource::Obj("cube.obj".into())).texture("checker.png"),
                SceneDesc::new(
                    "pyramid",
                    MeshSource::Text { path: "pyramid.txt".into(), dimensions: 3 },
                ),
                SceneDesc::new(
                    "logo",
                    MeshSource::Text { path: "webgpu.txt".into(), dimensions: 2 },
                )
                .camera(CameraState { angles: glam::Vec2::new(-std::f32::consts::FRAC_PI_2, 1.2), zoom: -0.5 }),
            ],
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = (width, height);
        self
    }

    pub fn resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = dir.into();
        self
    }

    pub fn sidebar_width(mut self, width: f32) -> Self {
        self.sidebar_width = width.max(0.0);
        self
    }

    pub fn show_gui(mut self, show: bool) -> Self {
        self.show_gui = show;
        self
    }

    /// Replaces the scene list.
    pub fn scenes(mut self, scenes: Vec<SceneDesc>) -> Self {
        self.scenes = scenes;
        self
    }

    pub fn scene(mut self, scene: SceneDesc) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Resolves `path` against the resource directory.
    pub fn resource(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.resource_dir.join(path)
        }
    }

    /// Sidebar width actually reserved; zero when the GUI is hidden.
    pub fn reserved_sidebar(&self) -> f32 {
        if self.show_gui { self.sidebar_width } else { 0.0 }
    }
}

/// `$VISTA_RESOURCE_DIR`, falling back to this crate's `resources/`.
pub fn default_resource_dir() -> PathBuf {
    resource_dir_from(std::env::var_os(RESOURCE_DIR_ENV).map(PathBuf::from))
}

fn resource_dir_from(env: Option<PathBuf>) -> PathBuf {
    env.filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/resources")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins_over_builtin_dir() {
        assert_eq!(resource_dir_from(Some("/srv/assets".into())), PathBuf::from("/srv/assets"));
        assert!(resource_dir_from(None).ends_with("resources"));
        assert!(resource_dir_from(Some(PathBuf::new())).ends_with("resources"));
    }

    #[test]
    fn resource_resolves_relative_paths_only() {
        let cfg = ViewerConfig::new().resource_dir("/data");
        assert_eq!(cfg.resource(Path::new("cube.obj")), PathBuf::from("/data/cube.obj"));
        assert_eq!(cfg.resource(Path::new("/abs/x.obj")), PathBuf::from("/abs/x.obj"));
    }

    #[test]
    fn builder_replaces_and_appends_scenes() {
        let cfg = ViewerConfig::new()
            .scenes(vec![])
            .scene(SceneDesc::new("a", MeshSource::Obj("a.obj".into())))
            .scene(SceneDesc::new("b", MeshSource::Obj("b.obj".into())).shader("flat.wgsl"));
        let names: Vec<_> = cfg.scenes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(cfg.scenes[1].shader, PathBuf::from("flat.wgsl"));
        assert_eq!(cfg.scenes[0].texture, None);
    }

    #[test]
    fn hidden_gui_reserves_no_sidebar() {
        let cfg = ViewerConfig::new().sidebar_width(300.0);
        assert_eq!(cfg.reserved_sidebar(), 300.0);
        assert_eq!(cfg.show_gui(false).reserved_sidebar(), 0.0);
    }
}
