/// Batch configuration: which meshes to load, where images go, how they look
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use image::Rgb;

use crate::view::ViewComposer;

/// One input mesh and the name it is reported and rendered under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub path: PathBuf,
    pub display_name: String,
}

impl ManifestEntry {
    pub fn new(path: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: display_name.into(),
        }
    }

    /// Prefix for this shape's output files: the lowercased display name
    pub fn file_stem(&self) -> String {
        self.display_name.to_lowercase()
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.path.display())
    }
}

/// Parses `PATH=NAME`
impl FromStr for ManifestEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, name) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected PATH=NAME, got `{s}`"))?;
        let (path, name) = (path.trim(), name.trim());
        if path.is_empty() || name.is_empty() {
            return Err(format!("expected PATH=NAME, got `{s}`"));
        }
        Ok(Self::new(path, name))
    }
}

/// Raster output parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Pixels per inch of figure size
    pub dpi: u32,
    /// Faces whose edges are drawn in comparison wireframes; `None` draws all
    pub max_wireframe_faces: Option<usize>,
    pub surface_alpha: f32,
    /// Also write an uncapped `{name}_wireframe.png` per shape
    pub write_wireframe: bool,
    pub background: [u8; 3],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            dpi: 300,
            max_wireframe_faces: Some(500),
            surface_alpha: 0.8,
            write_wireframe: false,
            background: [255, 255, 255],
        }
    }
}

impl RenderSettings {
    /// Convert a figure size in inches to pixels
    pub fn pixels(&self, (width, height): (f64, f64)) -> (u32, u32) {
        let dpi = self.dpi.max(1) as f64;
        (
            ((width * dpi).round() as u32).max(1),
            ((height * dpi).round() as u32).max(1),
        )
    }

    pub fn background(&self) -> Rgb<u8> {
        Rgb(self.background)
    }

    /// Gap between grid cells, a tenth of an inch
    pub fn grid_gap(&self) -> u32 {
        (self.dpi / 10).max(1)
    }

    pub fn composer(&self, width: u32, height: u32) -> ViewComposer {
        ViewComposer::new(width, height)
            .with_background(self.background())
            .with_surface_alpha(self.surface_alpha)
    }
}

/// Everything a batch run needs
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub manifest: Vec<ManifestEntry>,
    pub output_dir: PathBuf,
    pub render: RenderSettings,
}

impl PipelineConfig {
    pub fn new(manifest: Vec<ManifestEntry>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            output_dir: output_dir.into(),
            render: RenderSettings::default(),
        }
    }

    pub fn with_render(mut self, render: RenderSettings) -> Self {
        self.render = render;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(
            vec![
                ManifestEntry::new("sphere_mesh.obj", "Sphere"),
                ManifestEntry::new("cube_mesh.obj", "Cube"),
                ManifestEntry::new("gyroid_mesh.obj", "Gyroid"),
            ],
            "results",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let config = PipelineConfig::default();
        let names: Vec<_> = config.manifest.iter().map(|e| e.file_stem()).collect();
        assert_eq!(names, ["sphere", "cube", "gyroid"]);
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.render.dpi, 300);
        assert_eq!(config.render.max_wireframe_faces, Some(500));
    }

    #[test]
    fn test_parse_manifest_entry() {
        let entry: ManifestEntry = "meshes/torus.obj=Torus Knot".parse().unwrap();
        assert_eq!(entry.path, PathBuf::from("meshes/torus.obj"));
        assert_eq!(entry.file_stem(), "torus knot");

        assert!("no-separator.obj".parse::<ManifestEntry>().is_err());
        assert!("=Name".parse::<ManifestEntry>().is_err());
        assert!("path.obj=".parse::<ManifestEntry>().is_err());
    }

    #[test]
    fn test_pixels_from_inches() {
        let settings = RenderSettings::default();
        assert_eq!(settings.pixels((12.0, 10.0)), (3600, 3000));
        let tiny = RenderSettings {
            dpi: 0,
            ..RenderSettings::default()
        };
        assert_eq!(tiny.pixels((0.1, 0.1)), (1, 1));
    }
}
