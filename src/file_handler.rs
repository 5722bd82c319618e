//! Description file reader/writer
//!
//! Line-oriented text format:
//!
//! ```text
//! Affine2D                 # or Julia, case-insensitive
//! 0, 0                     # min corner
//! 1, 1                     # max corner
//! 0.5, 0, 0, 0.5, 0, 0     # Affine2D: one line per map (a00 a01 a10 a11 b0 b1)
//! ```
//!
//! A Julia file has exactly one line after the bounds: the center `re, im`.
//! Tokens are separated by commas and/or whitespace; `#` starts a comment.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::description::{ChaosGameDescription, DescriptionError};
use crate::math::{Complex, Matrix2x2, Vector2d};
use crate::transform::{Transform2D, TransformKind};

#[derive(Error, Debug)]
pub enum FileHandlerError {
    #[error("File '{}' not found", path.display())]
    NotFound { path: PathBuf },
    #[error("Malformed input on line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
    #[error("Unknown transform kind: '{0}'")]
    UnknownTransformKind(String),
    #[error("Invalid fractal name: '{0}'")]
    InvalidName(String),
    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] DescriptionError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FileHandlerError {
    fn malformed(line: usize, reason: impl Into<String>) -> Self {
        FileHandlerError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

/// Read and parse a description file
pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<ChaosGameDescription, FileHandlerError> {
    let path = path.as_ref();
    tracing::debug!("Reading description from {:?}", path);

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FileHandlerError::NotFound {
            path: path.to_path_buf(),
        },
        _ => FileHandlerError::Io(e),
    })?;

    let description = parse_str(&content).map_err(|e| {
        tracing::warn!("Rejected description file {:?}: {}", path, e);
        e
    })?;
    tracing::info!(
        "Loaded {} description with {} transforms from {:?}",
        description.kind(),
        description.transforms().len(),
        path
    );
    Ok(description)
}

/// Write a description in the text format, replacing any existing file
pub fn write_to_file<P: AsRef<Path>>(
    description: &ChaosGameDescription,
    path: P,
) -> Result<(), FileHandlerError> {
    let path = path.as_ref();
    std::fs::write(path, description.to_string())?;
    tracing::info!("Saved {} description to {:?}", description.kind(), path);
    Ok(())
}

/// Parse the text format. No partial result is ever returned.
pub fn parse_str(text: &str) -> Result<ChaosGameDescription, FileHandlerError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, raw)| (i + 1, strip_comment(raw).trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line_no, header) = lines
        .next()
        .ok_or_else(|| FileHandlerError::malformed(1, "missing transform keyword"))?;
    let keyword = header
        .split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or_default();
    let kind = TransformKind::from_keyword(keyword)
        .ok_or_else(|| FileHandlerError::UnknownTransformKind(keyword.to_string()))?;
    tracing::debug!("Parsing {} description (keyword on line {})", kind, line_no);

    let min = next_vector(&mut lines, line_no, "min corner")?;
    let max = next_vector(&mut lines, line_no, "max corner")?;

    let transforms = match kind {
        TransformKind::Affine2D => {
            let mut transforms = Vec::new();
            for (n, line) in lines {
                let [a00, a01, a10, a11, v0, v1] = parse_numbers::<6>(line, n)?;
                transforms.push(Transform2D::affine(
                    Matrix2x2::new(a00, a01, a10, a11),
                    Vector2d::new(v0, v1),
                ));
            }
            if transforms.is_empty() {
                return Err(FileHandlerError::malformed(line_no, "Affine2D file lists no transforms"));
            }
            transforms
        }
        TransformKind::Julia => {
            let (n, line) = lines
                .next()
                .ok_or_else(|| FileHandlerError::malformed(line_no, "missing Julia center"))?;
            let [re, im] = parse_numbers::<2>(line, n)?;
            if let Some((extra, _)) = lines.next() {
                return Err(FileHandlerError::malformed(extra, "Julia file takes exactly one center"));
            }
            Transform2D::julia_pair(Complex::new(re, im)).to_vec()
        }
    };

    Ok(ChaosGameDescription::new(min, max, transforms)?)
}

/// Parse exactly `N` finite numbers from one line. Values are separated by
/// whitespace or a comma with optional whitespace; `1,,2` is malformed.
pub fn parse_numbers<const N: usize>(line: &str, line_no: usize) -> Result<[f64; N], FileHandlerError> {
    let mut tokens: Vec<&str> = Vec::new();
    for field in line.split(',') {
        let before = tokens.len();
        tokens.extend(field.split_whitespace());
        if tokens.len() == before {
            return Err(FileHandlerError::malformed(line_no, "empty value between commas"));
        }
    }
    if tokens.len() != N {
        return Err(FileHandlerError::malformed(
            line_no,
            format!("expected {} numbers, found {}", N, tokens.len()),
        ));
    }

    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(&tokens) {
        *slot = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FileHandlerError::malformed(line_no, format!("'{}' is not a number", token)))?;
    }
    Ok(out)
}

fn next_vector<'a, I>(lines: &mut I, after: usize, what: &str) -> Result<Vector2d, FileHandlerError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let (n, line) = lines
        .next()
        .ok_or_else(|| FileHandlerError::malformed(after, format!("missing {}", what)))?;
    let [x0, x1] = parse_numbers::<2>(line, n)?;
    Ok(Vector2d::new(x0, x1))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::JuliaSign;

    const AFFINE_FILE: &str = "Affine2D                # Type of transform\n\
        0, 0                    # Lower left\n\
        1, 1                    # Upper right\n\
        .5, 0, 0, .5, 0, 0      # 1st transform\n\
        .5, 0, 0, .5, .25, .5   # 2nd transform\n\
        .5, 0, 0, .5, .5, 0     # 3rd transform\n";

    const JULIA_FILE: &str = "Julia\n-1.6, -1\n1.6, 1\n-.74543, .11301\n";

    fn sierpinski() -> ChaosGameDescription {
        ChaosGameDescription::from_rows(
            Vector2d::new(0.0, 0.0),
            Vector2d::new(1.0, 1.0),
            &[
                vec![0.5, 0.0, 0.0, 0.5, 0.0, 0.0],
                vec![0.5, 0.0, 0.0, 0.5, 0.25, 0.5],
                vec![0.5, 0.0, 0.0, 0.5, 0.5, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_parse_affine_with_comments() {
        assert_eq!(parse_str(AFFINE_FILE).unwrap(), sierpinski());
    }

    #[test]
    fn test_parse_julia_synthesizes_two_transforms() {
        let d = parse_str(JULIA_FILE).unwrap();
        let c = Complex::new(-0.74543, 0.11301);
        assert_eq!(
            d.transforms(),
            &[
                Transform2D::julia(c, JuliaSign::Negative),
                Transform2D::julia(c, JuliaSign::Positive)
            ]
        );
        assert_eq!(d.min(), Vector2d::new(-1.6, -1.0));
        assert_eq!(d.max(), Vector2d::new(1.6, 1.0));
    }

    #[test]
    fn test_keyword_case_and_whitespace_separators() {
        let d = parse_str("  JULIA  \n-2 -1\n2 1\n0.25 -0.5\n").unwrap();
        assert!(d.is_julia());
    }

    #[test]
    fn test_round_trip_text() {
        let affine = sierpinski();
        assert_eq!(parse_str(&affine.to_string()).unwrap(), affine);

        let julia = parse_str(JULIA_FILE).unwrap();
        assert_eq!(parse_str(&julia.to_string()).unwrap(), julia);
    }

    #[test]
    fn test_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("julia.txt");
        let julia = parse_str(JULIA_FILE).unwrap();
        write_to_file(&julia, &path).unwrap();
        assert_eq!(read_from_file(&path).unwrap(), julia);
        // Julia center written once even though two transforms are stored
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 4);
    }

    #[test]
    fn test_unknown_keyword() {
        let err = parse_str("Mandelbrot\n0, 0\n1, 1\n0.5, 0.5\n").unwrap_err();
        assert!(matches!(err, FileHandlerError::UnknownTransformKind(ref k) if k == "Mandelbrot"));
    }

    #[test]
    fn test_malformed_numbers() {
        let err = parse_str("Affine2D\n0, 0\n1, one\n.5, 0, 0, .5, 0, 0\n").unwrap_err();
        assert!(matches!(err, FileHandlerError::MalformedInput { line: 3, .. }));

        let err = parse_str("Affine2D\n0, 0\n1, 1\n.5, 0, 0, .5, 0\n").unwrap_err();
        assert!(matches!(err, FileHandlerError::MalformedInput { line: 4, .. }));

        let err = parse_str("Julia\n0, 0\n1, 1\nNaN, 0\n").unwrap_err();
        assert!(matches!(err, FileHandlerError::MalformedInput { .. }));
    }

    #[test]
    fn test_empty_value_between_commas() {
        assert!(matches!(
            parse_numbers::<2>("1,,2", 7),
            Err(FileHandlerError::MalformedInput { line: 7, .. })
        ));
        assert!(parse_numbers::<2>("1, 2,", 1).is_err());
        assert!(parse_numbers::<2>(", 1 2", 1).is_err());
        assert_eq!(parse_numbers::<2>("1,2", 1).unwrap(), [1.0, 2.0]);
        assert_eq!(parse_numbers::<3>("1, 2 3", 1).unwrap(), [1.0, 2.0, 3.0]);

        let err = parse_str("Julia\n0,, 0\n1, 1\n0.1, 0.2\n").unwrap_err();
        assert!(matches!(err, FileHandlerError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_missing_sections() {
        assert!(matches!(parse_str(""), Err(FileHandlerError::MalformedInput { .. })));
        assert!(matches!(parse_str("Julia\n0, 0\n"), Err(FileHandlerError::MalformedInput { .. })));
        assert!(matches!(parse_str("Julia\n0, 0\n1, 1\n"), Err(FileHandlerError::MalformedInput { .. })));
        assert!(matches!(parse_str("Affine2D\n0, 0\n1, 1\n"), Err(FileHandlerError::MalformedInput { .. })));
        assert!(matches!(
            parse_str("Julia\n0, 0\n1, 1\n0.1, 0.2\n0.3, 0.4\n"),
            Err(FileHandlerError::MalformedInput { line: 5, .. })
        ));
    }

    #[test]
    fn test_invalid_bounds_in_file() {
        let err = parse_str("Julia\n1, 1\n0, 0\n0.1, 0.2\n").unwrap_err();
        assert!(matches!(err, FileHandlerError::InvalidDescription(DescriptionError::InvalidBounds { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_from_file(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, FileHandlerError::NotFound { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }
}
