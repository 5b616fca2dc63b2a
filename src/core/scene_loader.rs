// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::hitable::Hitable;
use crate::core::integrator::Integrator;
use crate::core::scene::{default_kerr_scene, default_schwarzschild_scene, palette, Scene,
                         DEFAULT_DISK_OUTER_RADIUS, SCHWARZSCHILD_HORIZON_RADIUS};
use crate::core::texture::Texture;
use crate::equations::kerr::KerrEquation;
use crate::equations::schwarzschild::{SchwarzschildEquation, DEFAULT_COEFFICIENT};
use crate::hitables::disk::{Disk, DiskSurface};
use crate::hitables::horizon::Horizon;
use crate::hitables::sky::Sky;
use crate::hitables::sphere::Sphere;
use crate::integrators::kerr::{KerrIntegrator, KerrSettings};
use crate::integrators::schwarzschild::{SchwarzschildIntegrator, SchwarzschildSettings, SchwarzschildStepper};
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use crate::sensors::pinhole::{PinholeCamera, DEFAULT_FIELD_SCALE};
use crate::textures::image::ImageTexture;
use crate::textures::pattern::Pattern;
use std::sync::Arc;

// Outer radius used when the camera starts beyond the configured one, as a
// multiple of the camera distance.
const CAMERA_OUTER_MARGIN: Float = 1.25;

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
    Texture(String),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

impl fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneLoadError::Io(err) => write!(f, "io error: {}", err),
            SceneLoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            SceneLoadError::MissingField(field) => write!(f, "missing field: {}", field),
            SceneLoadError::Texture(msg) => write!(f, "texture error: {}", msg),
        }
    }
}

impl std::error::Error for SceneLoadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Kerr,
    Schwarzschild,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KerrView {
    pub distance: Float,
    pub theta: Float,
    pub phi: Float,
    pub spin: Float,
    pub tilt: Float,
    pub yaw: Float,
    pub field_scale: Float,
}

impl Default for KerrView {
    fn default() -> Self {
        Self { distance: 30.0, theta: 87.0, phi: 0.0, spin: 0.0, tilt: 0.0, yaw: 0.0, field_scale: DEFAULT_FIELD_SCALE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchwarzschildView {
    pub coefficient: Float,
    pub outer_radius: Float,
    pub origin: Vector3f,
    pub target: Vector3f,
    pub up: Vector3f,
    pub fov: Float,
}

impl Default for SchwarzschildView {
    fn default() -> Self {
        Self {
            coefficient: DEFAULT_COEFFICIENT,
            outer_radius: SchwarzschildSettings::default().outer_radius,
            origin: Vector3f::new(0.0, -20.0, 2.0),
            target: Vector3f::zeros(),
            up: Vector3f::new(0.0, 0.0, 1.0),
            fov: 40.0,
        }
    }
}

/// `<integrator>` values; unset ones keep the model's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntegratorOverrides {
    pub max_iterations: Option<usize>,
    pub tolerance: Option<Float>,
    pub initial_step: Option<Float>,
    pub error_scale: Option<Float>,
    pub stepper: Option<SchwarzschildStepper>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Disk,
    Horizon,
    Sky,
    Sphere,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySpec {
    pub kind: GeometryKind,
    pub attributes: HashMap<String, String>,
}

/// Everything read from a scene file, before any hitable is built. The
/// binaries patch fields from the command line and then call `build`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub width: usize,
    pub height: usize,
    pub model: ModelKind,
    pub kerr: KerrView,
    pub schwarzschild: SchwarzschildView,
    pub integrator: IntegratorOverrides,
    /// Sky texture for the built-in scenes.
    pub sky_texture: Option<String>,
    /// Empty means the built-in scene of the model.
    pub geometry: Vec<GeometrySpec>,
    pub base_dir: PathBuf,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            model: ModelKind::Kerr,
            kerr: KerrView::default(),
            schwarzschild: SchwarzschildView::default(),
            integrator: IntegratorOverrides::default(),
            sky_texture: None,
            geometry: Vec::new(),
            base_dir: PathBuf::from("."),
        }
    }
}

pub struct SceneLoadResult {
    pub scene: Scene,
    pub integrator: Box<dyn Integrator>,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult, SceneLoadError> {
    load_scene_description(path)?.build()
}

pub fn load_scene_description<P: AsRef<Path>>(path: P) -> Result<SceneDescription, SceneLoadError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_scene_description(&xml, base_dir)
}

pub fn parse_scene_description(xml: &str, base_dir: &Path) -> Result<SceneDescription, SceneLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut description = SceneDescription { base_dir: base_dir.to_path_buf(), ..SceneDescription::default() };

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                match e.name().as_ref() {
                    b"default" => {
                        let attrs = attributes(&e, &defaults);
                        let name = attrs.get("name").ok_or(SceneLoadError::MissingField("default.name"))?;
                        let value = attrs.get("value").ok_or(SceneLoadError::MissingField("default.value"))?;
                        defaults.insert(name.clone(), value.clone());
                    }
                    b"scene" => {
                        let attrs = attributes(&e, &defaults);
                        if let Some(sky) = attrs.get("sky") {
                            description.sky_texture = Some(sky.clone());
                        }
                    }
                    b"film" => {
                        for (key, value) in attributes(&e, &defaults) {
                            match key.as_str() {
                                "width" => description.width = parse_usize(&value)?,
                                "height" => description.height = parse_usize(&value)?,
                                _ => {}
                            }
                        }
                    }
                    b"kerr" => {
                        description.model = ModelKind::Kerr;
                        let view = &mut description.kerr;
                        for (key, value) in attributes(&e, &defaults) {
                            match key.as_str() {
                                "r" => view.distance = parse_float(&value)?,
                                "theta" => view.theta = parse_float(&value)?,
                                "phi" => view.phi = parse_float(&value)?,
                                "a" => view.spin = parse_float(&value)?,
                                "tilt" => view.tilt = parse_float(&value)?,
                                "yaw" => view.yaw = parse_float(&value)?,
                                "field" => view.field_scale = parse_float(&value)?,
                                _ => {}
                            }
                        }
                    }
                    b"schwarzschild" => {
                        description.model = ModelKind::Schwarzschild;
                        for (key, value) in attributes(&e, &defaults) {
                            match key.as_str() {
                                "curvature" => description.schwarzschild.coefficient = parse_float(&value)?,
                                "outer" => description.schwarzschild.outer_radius = parse_float(&value)?,
                                "stepper" => description.integrator.stepper = Some(parse_stepper(&value)?),
                                _ => {}
                            }
                        }
                    }
                    b"camera" => {
                        let view = &mut description.schwarzschild;
                        for (key, value) in attributes(&e, &defaults) {
                            match key.as_str() {
                                "origin" => view.origin = parse_vec3(&value)?,
                                "target" => view.target = parse_vec3(&value)?,
                                "up" => view.up = parse_vec3(&value)?,
                                "fov" => view.fov = parse_float(&value)?,
                                _ => {}
                            }
                        }
                    }
                    b"integrator" => {
                        let overrides = &mut description.integrator;
                        for (key, value) in attributes(&e, &defaults) {
                            match key.as_str() {
                                "max_iterations" => overrides.max_iterations = Some(parse_usize(&value)?),
                                "tolerance" => overrides.tolerance = Some(parse_float(&value)?),
                                "initial_step" => overrides.initial_step = Some(parse_float(&value)?),
                                "error_scale" => overrides.error_scale = Some(parse_float(&value)?),
                                "stepper" => overrides.stepper = Some(parse_stepper(&value)?),
                                _ => {}
                            }
                        }
                    }
                    b"disk" => description.geometry.push(GeometrySpec { kind: GeometryKind::Disk, attributes: attributes(&e, &defaults) }),
                    b"horizon" => description.geometry.push(GeometrySpec { kind: GeometryKind::Horizon, attributes: attributes(&e, &defaults) }),
                    b"sky" => description.geometry.push(GeometrySpec { kind: GeometryKind::Sky, attributes: attributes(&e, &defaults) }),
                    b"sphere" => description.geometry.push(GeometrySpec { kind: GeometryKind::Sphere, attributes: attributes(&e, &defaults) }),
                    other => {
                        log::warn!("Ignoring unknown element <{}>.", String::from_utf8_lossy(other));
                    }
                }
            }
            Err(e) => {
                return Err(SceneLoadError::Parse(e.to_string()));
            }
            _ => {}
        }

        buf.clear();
    }

    Ok(description)
}

impl SceneDescription {
    pub fn build(&self) -> Result<SceneLoadResult, SceneLoadError> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneLoadError::Parse(format!("invalid film size {}x{}", self.width, self.height)));
        }
        let mut textures = TextureCache::new(&self.base_dir);
        match self.model {
            ModelKind::Kerr => self.build_kerr(&mut textures),
            ModelKind::Schwarzschild => self.build_schwarzschild(&mut textures),
        }
    }

    fn build_kerr(&self, textures: &mut TextureCache) -> Result<SceneLoadResult, SceneLoadError> {
        let view = &self.kerr;
        let equation = KerrEquation::new(view.distance, view.theta, view.phi, view.spin);
        let camera = PinholeCamera::new(self.width, self.height, view.tilt, view.yaw, view.field_scale);

        let defaults = KerrSettings::default();
        let settings = KerrSettings {
            initial_step: self.integrator.initial_step.unwrap_or(defaults.initial_step),
            error_scale: self.integrator.error_scale.unwrap_or(defaults.error_scale),
            max_iterations: self.integrator.max_iterations.unwrap_or(defaults.max_iterations),
            tolerance: self.integrator.tolerance.unwrap_or(defaults.tolerance),
            ..defaults
        };

        let scene = if self.geometry.is_empty() {
            default_kerr_scene(&equation, self.sky_texture(textures)?)
        } else {
            let radii = Radii {
                disk_inner: equation.isco_radius(),
                horizon: equation.horizon_radius(),
                sky: equation.outer_radius(),
            };
            self.build_geometry(&radii, textures)?
        };

        let integrator = KerrIntegrator::new(equation, camera, settings);
        log::info!("Loaded {} with {}", integrator.describe(), scene.describe());
        Ok(SceneLoadResult { scene, integrator: Box::new(integrator) })
    }

    fn build_schwarzschild(&self, textures: &mut TextureCache) -> Result<SceneLoadResult, SceneLoadError> {
        let view = &self.schwarzschild;
        let equation = SchwarzschildEquation::new(view.coefficient);
        let camera = PerspectiveCamera::new(view.origin, view.target, view.up, view.fov, self.width, self.height);

        // Rays starting beyond the outer boundary would end on their first step.
        let camera_distance = view.origin.norm();
        let outer_radius = if camera_distance >= view.outer_radius {
            let enlarged = CAMERA_OUTER_MARGIN * camera_distance;
            log::warn!("Camera at r={} lies outside outer radius {}, using {}.", camera_distance, view.outer_radius, enlarged);
            enlarged
        } else {
            view.outer_radius
        };

        let defaults = SchwarzschildSettings::default();
        let settings = SchwarzschildSettings {
            stepper: self.integrator.stepper.unwrap_or(defaults.stepper),
            max_iterations: self.integrator.max_iterations.unwrap_or(defaults.max_iterations),
            relative_tolerance: self.integrator.tolerance.unwrap_or(defaults.relative_tolerance),
            initial_step: self.integrator.initial_step.unwrap_or(defaults.initial_step),
            error_scale: self.integrator.error_scale.unwrap_or(defaults.error_scale),
            outer_radius,
            ..defaults
        };

        let scene = if self.geometry.is_empty() {
            default_schwarzschild_scene(outer_radius, self.sky_texture(textures)?)
        } else {
            let radii = Radii { disk_inner: 3.0, horizon: SCHWARZSCHILD_HORIZON_RADIUS, sky: outer_radius };
            self.build_geometry(&radii, textures)?
        };

        let integrator = SchwarzschildIntegrator::new(equation, camera, settings);
        log::info!("Loaded {} with {}", integrator.describe(), scene.describe());
        Ok(SceneLoadResult { scene, integrator: Box::new(integrator) })
    }

    fn sky_texture(&self, textures: &mut TextureCache) -> Result<Option<Arc<dyn Texture>>, SceneLoadError> {
        match &self.sky_texture {
            Some(path) => Ok(Some(textures.load(path)?)),
            None => Ok(None),
        }
    }

    fn build_geometry(&self, radii: &Radii, textures: &mut TextureCache) -> Result<Scene, SceneLoadError> {
        let mut scene = Scene::new();
        for spec in self.geometry.iter() {
            let attrs = &spec.attributes;
            let hitable: Arc<dyn Hitable> = match spec.kind {
                GeometryKind::Disk => {
                    let inner = match attrs.get("inner").map(|s| s.as_str()) {
                        None | Some("isco") => radii.disk_inner,
                        Some(value) => parse_float(value)?,
                    };
                    let outer = optional_float(attrs, "outer")?.unwrap_or(DEFAULT_DISK_OUTER_RADIUS);
                    Arc::new(build_disk(attrs, inner, outer, textures)?)
                }
                GeometryKind::Horizon => {
                    let radius = optional_float(attrs, "radius")?.unwrap_or(radii.horizon);
                    let pattern = parse_pattern(attrs, textures, RGBSpectrum::BLACK)?;
                    Arc::new(Horizon::new(radius, pattern))
                }
                GeometryKind::Sky => {
                    let radius = optional_float(attrs, "radius")?.unwrap_or(radii.sky);
                    let pattern = match attrs.get("type") {
                        Some(_) => parse_pattern(attrs, textures, RGBSpectrum::BLACK)?,
                        None => match attrs.get("texture") {
                            Some(path) => Pattern::Textured(textures.load(path)?),
                            None => Pattern::checkered(palette::dim_gray(), palette::midnight_blue()),
                        },
                    };
                    Arc::new(Sky::new(radius, pattern))
                }
                GeometryKind::Sphere => {
                    let center = parse_vec3(attrs.get("center").ok_or(SceneLoadError::MissingField("sphere.center"))?)?;
                    let radius = optional_float(attrs, "radius")?.unwrap_or(1.0);
                    if attrs.get("type").map(|s| s.as_str()) == Some("reflective") {
                        let color = optional_color(attrs, "color")?.unwrap_or(RGBSpectrum::WHITE);
                        Arc::new(Sphere::reflective(center, radius, color))
                    } else {
                        Arc::new(Sphere::new(center, radius, parse_pattern(attrs, textures, RGBSpectrum::WHITE)?))
                    }
                }
            };
            scene.add_hitable(hitable);
        }
        Ok(scene)
    }
}

struct Radii {
    disk_inner: Float,
    horizon: Float,
    sky: Float,
}

/// Decoded textures keyed by the path written in the scene file, so several
/// objects can share one image.
struct TextureCache<'a> {
    base_dir: &'a Path,
    textures: HashMap<String, Arc<dyn Texture>>,
}

impl<'a> TextureCache<'a> {
    fn new(base_dir: &'a Path) -> Self {
        Self { base_dir, textures: HashMap::new() }
    }

    fn load(&mut self, path: &str) -> Result<Arc<dyn Texture>, SceneLoadError> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(Arc::clone(texture));
        }
        let full_path = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir.join(path)
        };
        let full_path = full_path.to_string_lossy().to_string();
        let texture: Arc<dyn Texture> = Arc::new(ImageTexture::from_file(&full_path).map_err(SceneLoadError::Texture)?);
        log::info!("Loaded texture {}: {}", full_path, texture.describe());
        self.textures.insert(path.to_string(), Arc::clone(&texture));
        Ok(texture)
    }
}

fn build_disk(attrs: &HashMap<String, String>, inner: Float, outer: Float, textures: &mut TextureCache) -> Result<Disk, SceneLoadError> {
    let kind = attrs.get("type").map(|s| s.as_str()).unwrap_or("checkered");
    let surface = match kind {
        "checkered" => {
            DiskSurface::Checkered {
                top: [
                    optional_color(attrs, "top1")?.unwrap_or_else(palette::blue_violet),
                    optional_color(attrs, "top2")?.unwrap_or_else(palette::medium_blue),
                ],
                bottom: [
                    optional_color(attrs, "bottom1")?.unwrap_or_else(palette::forest_green),
                    optional_color(attrs, "bottom2")?.unwrap_or_else(palette::light_sea_green),
                ],
            }
        }
        "solid" => DiskSurface::Solid(optional_color(attrs, "color")?.unwrap_or(RGBSpectrum::WHITE)),
        "texture" => {
            let path = attrs.get("texture").ok_or(SceneLoadError::MissingField("disk.texture"))?;
            DiskSurface::Textured(textures.load(path)?)
        }
        other => return Err(SceneLoadError::Parse(format!("unsupported disk type: {}", other))),
    };
    Ok(Disk::new(inner, outer, surface))
}

/// `type` is one of solid (`color`), checkered (`color1`, `color2`) or
/// texture (`texture`).
fn parse_pattern(attrs: &HashMap<String, String>, textures: &mut TextureCache, fallback: RGBSpectrum) -> Result<Pattern, SceneLoadError> {
    let kind = match attrs.get("type") {
        Some(kind) => kind.as_str(),
        None if attrs.contains_key("texture") => "texture",
        None if attrs.contains_key("color1") => "checkered",
        None => "solid",
    };
    match kind {
        "solid" => Ok(Pattern::Solid(optional_color(attrs, "color")?.unwrap_or(fallback))),
        "checkered" => {
            let first = optional_color(attrs, "color1")?.ok_or(SceneLoadError::MissingField("color1"))?;
            let second = optional_color(attrs, "color2")?.ok_or(SceneLoadError::MissingField("color2"))?;
            Ok(Pattern::checkered(first, second))
        }
        "texture" => {
            let path = attrs.get("texture").ok_or(SceneLoadError::MissingField("texture"))?;
            Ok(Pattern::Textured(textures.load(path)?))
        }
        other => Err(SceneLoadError::Parse(format!("unsupported pattern type: {}", other))),
    }
}

fn attributes(e: &BytesStart, defaults: &HashMap<String, String>) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = resolve_value(&attr.unescape_value().unwrap_or_default(), defaults);
        out.insert(key, value);
    }
    out
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn optional_float(attrs: &HashMap<String, String>, key: &str) -> Result<Option<Float>, SceneLoadError> {
    attrs.get(key).map(|v| parse_float(v)).transpose()
}

fn optional_color(attrs: &HashMap<String, String>, key: &str) -> Result<Option<RGBSpectrum>, SceneLoadError> {
    attrs.get(key).map(|v| parse_color(v)).transpose()
}

pub fn parse_stepper(value: &str) -> Result<SchwarzschildStepper, SceneLoadError> {
    match value {
        "fixed" => Ok(SchwarzschildStepper::Fixed),
        "adaptive" => Ok(SchwarzschildStepper::Adaptive),
        other => Err(SceneLoadError::Parse(format!("unsupported stepper: {}", other))),
    }
}

fn parse_float(value: &str) -> Result<Float, SceneLoadError> {
    value.trim().parse::<Float>().map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_usize(value: &str) -> Result<usize, SceneLoadError> {
    value.trim().parse::<usize>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_vec3(value: &str) -> Result<Vector3f, SceneLoadError> {
    let mut parts = value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty());
    let x = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    let y = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    let z = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    Ok(Vector3f::new(parse_float(x)?, parse_float(y)?, parse_float(z)?))
}

fn parse_color(value: &str) -> Result<RGBSpectrum, SceneLoadError> {
    RGBSpectrum::parse(value).ok_or_else(|| SceneLoadError::Parse(format!("invalid colour: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> SceneDescription {
        parse_scene_description(xml, Path::new(".")).unwrap()
    }

    #[test]
    fn test_empty_scene_uses_defaults() {
        let description = parse("<scene/>");
        assert_eq!(description, SceneDescription::default());
        let loaded = description.build().unwrap();
        assert_eq!(loaded.scene.hitables().len(), 5);
        assert_eq!(loaded.integrator.resolution(), (1000, 1000));
    }

    #[test]
    fn test_kerr_scene_with_defaults_and_geometry() {
        let xml = r#"
            <scene>
                <default name="spin" value="0.9"/>
                <film width="64" height="48"/>
                <kerr r="40" theta="80" phi="10" a="$spin"/>
                <integrator max_iterations="5000" tolerance="1e-6"/>
                <disk inner="isco" outer="15" type="solid" color="255,140,0"/>
                <horizon/>
                <sky/>
                <sphere center="16,0,4" radius="1" color1="255,215,0" color2="255,140,0"/>
            </scene>"#;
        let description = parse(xml);
        assert_eq!(description.model, ModelKind::Kerr);
        assert_eq!(description.kerr.spin, 0.9);
        assert_eq!(description.kerr.distance, 40.0);
        assert_eq!(description.integrator.max_iterations, Some(5000));
        assert_eq!(description.geometry.len(), 4);
        assert_eq!(description.geometry[0].kind, GeometryKind::Disk);

        let loaded = description.build().unwrap();
        assert_eq!(loaded.integrator.resolution(), (64, 48));
        let names = loaded.scene.describe();
        assert!(names.contains("Sphere"));
        assert_eq!(loaded.scene.hitables().len(), 4);
    }

    #[test]
    fn test_schwarzschild_scene() {
        let xml = r#"
            <scene>
                <film width="16" height="8"/>
                <schwarzschild curvature="-1.0" outer="40" stepper="adaptive"/>
                <camera origin="0,-25,3" target="0,0,0" up="0,0,1" fov="35"/>
                <sphere center="7,3,1" type="reflective"/>
            </scene>"#;
        let description = parse(xml);
        assert_eq!(description.model, ModelKind::Schwarzschild);
        assert_eq!(description.schwarzschild.coefficient, -1.0);
        assert_eq!(description.schwarzschild.outer_radius, 40.0);
        assert_eq!(description.schwarzschild.origin, Vector3f::new(0.0, -25.0, 3.0));
        assert_eq!(description.integrator.stepper, Some(SchwarzschildStepper::Adaptive));

        let loaded = description.build().unwrap();
        assert_eq!(loaded.integrator.resolution(), (16, 8));
        assert!(loaded.integrator.describe().contains("Adaptive"));
        assert_eq!(loaded.scene.hitables().len(), 1);
    }

    #[test]
    fn test_camera_beyond_outer_radius_still_renders() {
        let xml = r#"
            <scene>
                <film width="16" height="8"/>
                <schwarzschild/>
                <camera origin="0,-40,2" target="0,0,0" up="0,0,1" fov="60"/>
            </scene>"#;
        let description = parse(xml);
        assert_eq!(description.schwarzschild.outer_radius, 30.0);
        let loaded = description.build().unwrap();

        let mut lit = 0;
        for y in 0..8 {
            for x in 0..16 {
                let color = loaded.integrator.trace_ray_forward(&loaded.scene, x, y, None);
                assert_ne!(color, RGBSpectrum::FAILURE);
                if !color.is_black() {
                    lit += 1;
                }
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn test_errors_are_reported() {
        let bad_float = parse_scene_description(r#"<scene><kerr r="far"/></scene>"#, Path::new("."));
        assert!(matches!(bad_float, Err(SceneLoadError::Parse(_))));

        let missing_center = parse(r#"<scene><sphere radius="1"/></scene>"#).build();
        assert!(matches!(missing_center, Err(SceneLoadError::MissingField("sphere.center"))));

        let missing_texture = parse(r#"<scene><sky texture="does_not_exist.png"/></scene>"#).build();
        assert!(matches!(missing_texture, Err(SceneLoadError::Texture(_))));

        let bad_stepper = parse_scene_description(r#"<scene><schwarzschild stepper="euler"/></scene>"#, Path::new("."));
        assert!(matches!(bad_stepper, Err(SceneLoadError::Parse(_))));
    }
}
