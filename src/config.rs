//! Runtime configuration.
//!
//! Configuration is an optional JSON file. Every field has a default, so a
//! partial file only overrides what it names and a missing file means
//! "all defaults".

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AssetError, ConfigError};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LEARNGL_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            assets: AssetConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            gl_major: 3,
            gl_minor: 3,
            vsync: true,
        }
    }
}

/// Where the texture program finds its files. Relative entries are joined
/// onto `root`. A relative `root` is looked up in the working directory
/// first, then next to the executable and in each of its ancestors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub root: PathBuf,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub texture: PathBuf,
    pub flip_vertically: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            vertex_shader: PathBuf::from("shaders/texture/vert.glsl"),
            fragment_shader: PathBuf::from("shaders/texture/frag.glsl"),
            texture: PathBuf::from("textures/checker.png"),
            flip_vertically: true,
        }
    }
}

/// Asset paths after joining and existence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssets {
    pub root: PathBuf,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub texture: PathBuf,
}

impl AssetConfig {
    /// Locates the root next to the running executable if needed, then joins
    /// every asset path onto it and checks that each one exists.
    pub fn resolve(&self) -> Result<ResolvedAssets, AssetError> {
        let exe = std::env::current_exe().ok();
        self.resolve_from(exe.as_deref().and_then(Path::parent))
    }

    /// Same as [`AssetConfig::resolve`] with an explicit executable directory.
    pub fn resolve_from(&self, exe_dir: Option<&Path>) -> Result<ResolvedAssets, AssetError> {
        let root = root_candidates(&self.root, exe_dir)
            .into_iter()
            .find(|candidate| candidate.is_dir())
            .ok_or_else(|| AssetError::MissingRoot(self.root.clone()))?;

        let existing = |relative: &Path| {
            let path = root.join(relative);
            if path.is_file() {
                Ok(path)
            } else {
                Err(AssetError::Missing { path })
            }
        };

        Ok(ResolvedAssets {
            vertex_shader: existing(&self.vertex_shader)?,
            fragment_shader: existing(&self.fragment_shader)?,
            texture: existing(&self.texture)?,
            root,
        })
    }
}

/// Places an asset root may live, most specific first.
fn root_candidates(root: &Path, exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![root.to_path_buf()];
    if let Some(dir) = exe_dir.filter(|_| root.is_relative()) {
        candidates.extend(dir.ancestors().map(|ancestor| ancestor.join(root)));
    }
    candidates
}

impl Config {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// Loads `$LEARNGL_CONFIG` if set, else the per-user config file if one
    /// exists, else the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path(std::env::var_os(CONFIG_ENV).map(PathBuf::from)) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }
}

/// An explicit path is always used, even if it does not exist, so that a
/// typo surfaces as an error instead of silently falling back to defaults.
fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("learngl").join("config.json"))
            .filter(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Config {
        Config::from_json(Path::new("test.json"), text).unwrap()
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let config = parse("{}");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!((config.window.gl_major, config.window.gl_minor), (3, 3));
        assert_eq!(config.window.title, "LearnOpenGL");
        assert!(config.window.vsync);
        assert_eq!(config.assets.root, PathBuf::from("assets"));
        assert!(config.assets.flip_vertically);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse(
            r#"{
                "window": { "width": 1024, "vsync": false },
                "assets": { "root": "/srv/learngl", "flip_vertically": false },
                "log_level": "debug"
            }"#,
        );
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert!(!config.window.vsync);
        assert_eq!(config.assets.root, PathBuf::from("/srv/learngl"));
        assert_eq!(config.assets.texture, PathBuf::from("textures/checker.png"));
        assert!(!config.assets.flip_vertically);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn malformed_json_names_the_file() {
        let err = Config::from_json(Path::new("broken.json"), "{ \"window\": 3 }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = Config::from_file(Path::new("/definitely/not/here/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn explicit_path_wins_even_if_missing() {
        let explicit = PathBuf::from("/nowhere/config.json");
        assert_eq!(config_path(Some(explicit.clone())), Some(explicit));
    }

    #[test]
    fn missing_root_is_reported_before_files() {
        let assets = AssetConfig {
            root: PathBuf::from("/definitely/not/an/asset/root"),
            ..AssetConfig::default()
        };
        let err = assets.resolve().unwrap_err();
        assert!(matches!(err, AssetError::MissingRoot(_)));
    }

    #[test]
    fn relative_root_tries_cwd_then_exe_ancestors() {
        let candidates = root_candidates(Path::new("assets"), Some(Path::new("/opt/app/bin")));
        assert_eq!(
            candidates,
            [
                PathBuf::from("assets"),
                PathBuf::from("/opt/app/bin/assets"),
                PathBuf::from("/opt/app/assets"),
                PathBuf::from("/opt/assets"),
                PathBuf::from("/assets"),
            ]
        );
    }

    #[test]
    fn absolute_root_is_used_as_is() {
        let candidates = root_candidates(Path::new("/srv/assets"), Some(Path::new("/opt/app")));
        assert_eq!(candidates, [PathBuf::from("/srv/assets")]);
    }

    #[test]
    fn relative_root_is_found_from_the_executable_directory() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
        // Stands in for `target/<profile>/`: the root only exists in an ancestor.
        let exe_dir = manifest.join("assets").join("textures");
        let assets = AssetConfig {
            root: PathBuf::from("shaders"),
            vertex_shader: PathBuf::from("texture/vert.glsl"),
            fragment_shader: PathBuf::from("texture/frag.glsl"),
            texture: PathBuf::from("../textures/checker.png"),
            flip_vertically: true,
        };
        let resolved = assets.resolve_from(Some(&exe_dir)).unwrap();
        assert_eq!(resolved.root, manifest.join("assets").join("shaders"));
        assert!(resolved.vertex_shader.ends_with("texture/vert.glsl"));
    }

    #[test]
    fn missing_relative_root_names_the_configured_path() {
        let assets = AssetConfig {
            root: PathBuf::from("learngl-no-such-root"),
            ..AssetConfig::default()
        };
        match assets.resolve_from(Some(Path::new("/"))) {
            Err(AssetError::MissingRoot(root)) => {
                assert_eq!(root, PathBuf::from("learngl-no-such-root"));
            }
            other => panic!("expected missing root, got {other:?}"),
        }
    }

    #[test]
    fn bundled_assets_resolve() {
        let assets = AssetConfig {
            root: Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"),
            ..AssetConfig::default()
        };
        let resolved = assets.resolve().unwrap();
        assert!(resolved.vertex_shader.ends_with("shaders/texture/vert.glsl"));
        assert!(resolved.texture.ends_with("textures/checker.png"));
    }

    #[test]
    fn missing_file_names_the_joined_path() {
        let assets = AssetConfig {
            root: Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"),
            texture: PathBuf::from("textures/nope.jpg"),
            ..AssetConfig::default()
        };
        match assets.resolve() {
            Err(AssetError::Missing { path }) => {
                assert!(path.ends_with("textures/nope.jpg"));
                assert!(path.starts_with(&assets.root));
            }
            other => panic!("expected missing asset, got {other:?}"),
        }
    }
}
