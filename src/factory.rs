//! Fractal catalogue
//!
//! Built-in descriptions are literal transform tables. Custom descriptions
//! live as `<name>.txt` files in a fractal directory and go through the
//! file handler.

use std::path::{Path, PathBuf};

use crate::description::ChaosGameDescription;
use crate::file_handler::{self, FileHandlerError};
use crate::math::{Complex, Matrix2x2, Vector2d};
use crate::transform::Transform2D;

/// Extension of custom description files
const FRACTAL_EXT: &str = "txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFractal {
    SierpinskiTriangle,
    BarnsleyFern,
    Julia,
    LevyCCurve,
    DragonCurve,
}

impl BuiltinFractal {
    pub const ALL: [BuiltinFractal; 5] = [
        BuiltinFractal::SierpinskiTriangle,
        BuiltinFractal::BarnsleyFern,
        BuiltinFractal::Julia,
        BuiltinFractal::LevyCCurve,
        BuiltinFractal::DragonCurve,
    ];

    /// Stable identifier used on the command line and in config
    pub fn name(self) -> &'static str {
        match self {
            BuiltinFractal::SierpinskiTriangle => "sierpinski_triangle",
            BuiltinFractal::BarnsleyFern => "barnsley_fern",
            BuiltinFractal::Julia => "julia",
            BuiltinFractal::LevyCCurve => "levy_c_curve",
            BuiltinFractal::DragonCurve => "dragon_curve",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BuiltinFractal::SierpinskiTriangle => "Sierpinski Triangle",
            BuiltinFractal::BarnsleyFern => "Barnsley Fern",
            BuiltinFractal::Julia => "Julia Set",
            BuiltinFractal::LevyCCurve => "Lévy C Curve",
            BuiltinFractal::DragonCurve => "Dragon Curve",
        }
    }

    /// Case-insensitive; `-`, `_` and spaces are interchangeable
    pub fn from_name(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
            .collect();
        match key.as_str() {
            "sierpinski_triangle" | "sierpinski" => Some(BuiltinFractal::SierpinskiTriangle),
            "barnsley_fern" | "barnsley" | "fern" => Some(BuiltinFractal::BarnsleyFern),
            "julia" | "julia_set" => Some(BuiltinFractal::Julia),
            "levy_c_curve" | "levy_c" | "levy" => Some(BuiltinFractal::LevyCCurve),
            "dragon_curve" | "dragon" => Some(BuiltinFractal::DragonCurve),
            _ => None,
        }
    }

    pub fn description(self) -> ChaosGameDescription {
        match self {
            BuiltinFractal::SierpinskiTriangle => affine(
                (0.0, 0.0),
                (1.0, 1.0),
                &[
                    [0.5, 0.0, 0.0, 0.5, 0.0, 0.0],
                    [0.5, 0.0, 0.0, 0.5, 0.5, 0.0],
                    [0.5, 0.0, 0.0, 0.5, 0.25, 0.5],
                ],
            ),
            BuiltinFractal::BarnsleyFern => affine(
                (-2.5, 0.0),
                (2.5, 10.0),
                &[
                    [0.0, 0.0, 0.0, 0.16, 0.0, 0.0],
                    [0.85, 0.04, -0.04, 0.85, 0.0, 1.6],
                    [0.2, -0.26, 0.23, 0.22, 0.0, 1.6],
                    [-0.15, 0.28, 0.26, 0.24, 0.0, 0.44],
                ],
            ),
            BuiltinFractal::Julia => ChaosGameDescription::new_unchecked(
                Vector2d::new(-1.6, -1.0),
                Vector2d::new(1.6, 1.0),
                Transform2D::julia_pair(Complex::new(-0.74543, 0.11301)).to_vec(),
            ),
            BuiltinFractal::LevyCCurve => affine(
                (-1.0, -0.5),
                (2.0, 1.5),
                &[
                    [0.5, -0.5, 0.5, 0.5, 0.0, 0.0],
                    [0.5, 0.5, -0.5, 0.5, 0.5, 0.5],
                ],
            ),
            BuiltinFractal::DragonCurve => affine(
                (-7.0, 0.0),
                (6.0, 11.0),
                &[
                    [0.824074, 0.281482, -0.212346, 0.864198, -1.882290, -0.110607],
                    [0.088272, 0.520988, -0.463889, -0.377778, 0.785360, 8.095795],
                ],
            ),
        }
    }
}

fn affine(min: (f64, f64), max: (f64, f64), rows: &[[f64; 6]]) -> ChaosGameDescription {
    let transforms = rows
        .iter()
        .map(|&[a00, a01, a10, a11, v0, v1]| {
            Transform2D::affine(Matrix2x2::new(a00, a01, a10, a11), Vector2d::new(v0, v1))
        })
        .collect();
    ChaosGameDescription::new_unchecked(
        Vector2d::new(min.0, min.1),
        Vector2d::new(max.0, max.1),
        transforms,
    )
}

/// Resolves fractal names to descriptions: built-ins first, then custom
/// files in `fractal_dir`
#[derive(Debug, Clone)]
pub struct DescriptionFactory {
    fractal_dir: PathBuf,
}

impl DescriptionFactory {
    pub fn new(fractal_dir: impl Into<PathBuf>) -> Self {
        Self {
            fractal_dir: fractal_dir.into(),
        }
    }

    pub fn fractal_dir(&self) -> &Path {
        &self.fractal_dir
    }

    /// Built-in or custom description by name
    pub fn get(&self, name: &str) -> Result<ChaosGameDescription, FileHandlerError> {
        match BuiltinFractal::from_name(name) {
            Some(builtin) => Ok(builtin.description()),
            None => self.load_custom(name),
        }
    }

    pub fn custom_path(&self, name: &str) -> Result<PathBuf, FileHandlerError> {
        let name = name.trim();
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\'])
            && !name.contains("..");
        if !valid {
            return Err(FileHandlerError::InvalidName(name.to_string()));
        }
        Ok(self.fractal_dir.join(format!("{}.{}", name, FRACTAL_EXT)))
    }

    pub fn load_custom(&self, name: &str) -> Result<ChaosGameDescription, FileHandlerError> {
        file_handler::read_from_file(self.custom_path(name)?)
    }

    /// Save a description under `name`, replacing any existing one
    pub fn store_custom(&self, name: &str, description: &ChaosGameDescription) -> Result<PathBuf, FileHandlerError> {
        let path = self.custom_path(name)?;
        std::fs::create_dir_all(&self.fractal_dir)?;
        file_handler::write_to_file(description, &path)?;
        Ok(path)
    }

    pub fn custom_exists(&self, name: &str) -> bool {
        self.custom_path(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Names of stored custom descriptions, sorted. A missing directory
    /// means no custom fractals.
    pub fn custom_names(&self) -> Result<Vec<String>, FileHandlerError> {
        let entries = match std::fs::read_dir(&self.fractal_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(FRACTAL_EXT) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Validate a description file from anywhere and copy it into the
    /// fractal directory. Returns the name it was stored under.
    pub fn import_file(&self, source: &Path, name: Option<&str>) -> Result<String, FileHandlerError> {
        file_handler::read_from_file(source)?;

        let name = match name {
            Some(n) => n.trim().to_string(),
            None => source
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or_else(|| FileHandlerError::InvalidName(source.display().to_string()))?,
        };
        let dest = self.custom_path(&name)?;
        std::fs::create_dir_all(&self.fractal_dir)?;
        std::fs::copy(source, &dest)?;
        tracing::info!("Imported {:?} as custom fractal '{}'", source, name);
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformKind;

    #[test]
    fn test_builtin_shapes() {
        let expect = [
            (BuiltinFractal::SierpinskiTriangle, (0.0, 0.0), (1.0, 1.0), 3, TransformKind::Affine2D),
            (BuiltinFractal::BarnsleyFern, (-2.5, 0.0), (2.5, 10.0), 4, TransformKind::Affine2D),
            (BuiltinFractal::Julia, (-1.6, -1.0), (1.6, 1.0), 2, TransformKind::Julia),
            (BuiltinFractal::LevyCCurve, (-1.0, -0.5), (2.0, 1.5), 2, TransformKind::Affine2D),
            (BuiltinFractal::DragonCurve, (-7.0, 0.0), (6.0, 11.0), 2, TransformKind::Affine2D),
        ];
        for (fractal, min, max, n, kind) in expect {
            let d = fractal.description();
            assert_eq!(d.min(), Vector2d::new(min.0, min.1), "{:?}", fractal);
            assert_eq!(d.max(), Vector2d::new(max.0, max.1), "{:?}", fractal);
            assert_eq!(d.transforms().len(), n, "{:?}", fractal);
            assert_eq!(d.kind(), kind, "{:?}", fractal);
        }
    }

    #[test]
    fn test_from_name() {
        for f in BuiltinFractal::ALL {
            assert_eq!(BuiltinFractal::from_name(f.name()), Some(f));
        }
        assert_eq!(BuiltinFractal::from_name("Barnsley-Fern"), Some(BuiltinFractal::BarnsleyFern));
        assert_eq!(BuiltinFractal::from_name("SIERPINSKI TRIANGLE"), Some(BuiltinFractal::SierpinskiTriangle));
        assert_eq!(BuiltinFractal::from_name("mandelbrot"), None);
    }

    #[test]
    fn test_builtins_survive_text_round_trip() {
        for f in BuiltinFractal::ALL {
            let d = f.description();
            assert_eq!(file_handler::parse_str(&d.to_string()).unwrap(), d);
        }
    }

    #[test]
    fn test_store_load_and_list_custom() {
        let dir = tempfile::tempdir().unwrap();
        let factory = DescriptionFactory::new(dir.path().join("fractals"));
        assert!(factory.custom_names().unwrap().is_empty());

        let fern = BuiltinFractal::BarnsleyFern.description();
        factory.store_custom("my_fern", &fern).unwrap();
        factory.store_custom("a_julia", &BuiltinFractal::Julia.description()).unwrap();

        assert_eq!(factory.custom_names().unwrap(), vec!["a_julia", "my_fern"]);
        assert!(factory.custom_exists("my_fern"));
        assert_eq!(factory.load_custom("my_fern").unwrap(), fern);
        assert_eq!(factory.get("my_fern").unwrap(), fern);
        assert_eq!(factory.get("dragon").unwrap(), BuiltinFractal::DragonCurve.description());
    }

    #[test]
    fn test_missing_custom_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let factory = DescriptionFactory::new(dir.path());
        let err = factory.load_custom("non_existent_transformation").unwrap_err();
        assert!(matches!(err, FileHandlerError::NotFound { .. }));
        assert!(err.to_string().contains("non_existent_transformation.txt"));
    }

    #[test]
    fn test_rejects_path_like_names() {
        let factory = DescriptionFactory::new("fractals");
        for bad in ["", "../etc/passwd", "a/b", ".hidden"] {
            assert!(matches!(factory.custom_path(bad), Err(FileHandlerError::InvalidName(_))), "{}", bad);
        }
    }

    #[test]
    fn test_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let factory = DescriptionFactory::new(dir.path().join("fractals"));

        let good = dir.path().join("upload.txt");
        std::fs::write(&good, "Julia\n-1.6, -1\n1.6, 1\n0.285, 0.01\n").unwrap();
        assert_eq!(factory.import_file(&good, None).unwrap(), "upload");
        assert!(factory.get("upload").unwrap().is_julia());

        let bad = dir.path().join("broken.txt");
        std::fs::write(&bad, "Spiral\n0, 0\n1, 1\n").unwrap();
        assert!(matches!(
            factory.import_file(&bad, Some("broken")),
            Err(FileHandlerError::UnknownTransformKind(_))
        ));
        assert!(!factory.custom_exists("broken"));
    }
}
