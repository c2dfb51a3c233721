/// Parser for the minimal vertex/triangle text geometry format
///
/// Only two directives are read: `v x y z` and `f a b c ...` with 1-based
/// vertex references. Every other line is skipped.
use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, i64 as integer, multispace0, multispace1},
    combinator::{eof, opt},
    number::complete::double,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Face, Mesh, Vertex};

/// Classification of a single input line by its leading token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjLine {
    Vertex([f64; 3]),
    /// Raw 1-based references, before conversion
    Face([i64; 3]),
    Other,
}

/// Load a mesh from a file on disk
pub fn load_obj(path: impl AsRef<Path>) -> MeshResult<Mesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => MeshError::MissingFile {
            path: path.to_path_buf(),
        },
        // Not UTF-8 text; there is no line to point at
        io::ErrorKind::InvalidData => MeshError::format(0, e.to_string()),
        _ => MeshError::Io(e),
    })?;
    parse_obj(&text)
}

/// Parse mesh text in a single pass
pub fn parse_obj(input: &str) -> MeshResult<Mesh> {
    let mut vertices = Vec::new();
    // (line number, raw references) so index errors can point at the source line
    let mut raw_faces = Vec::new();
    let mut skipped = 0usize;

    for (i, line) in input.lines().enumerate() {
        match classify_line(line, i + 1)? {
            ObjLine::Vertex([x, y, z]) => vertices.push(Vertex::new(x, y, z)),
            ObjLine::Face(refs) => raw_faces.push((i + 1, refs)),
            ObjLine::Other => skipped += 1,
        }
    }

    let vertex_count = vertices.len();
    let mut faces = Vec::with_capacity(raw_faces.len());
    for (line, refs) in raw_faces {
        let mut indices = [0usize; 3];
        for (slot, &reference) in indices.iter_mut().zip(refs.iter()) {
            let index = reference
                .checked_sub(1)
                .filter(|&i| i >= 0 && (i as usize) < vertex_count)
                .ok_or_else(|| MeshError::Index {
                    line,
                    index: reference.saturating_sub(1),
                    vertex_count,
                })?;
            *slot = index as usize;
        }
        faces.push(Face { indices });
    }

    debug!(
        "parsed {} vertices, {} faces, skipped {} lines",
        vertex_count,
        faces.len(),
        skipped
    );
    Ok(Mesh::from_checked(vertices, faces))
}

/// Classify one line. `line_no` is only used for error reporting.
pub fn classify_line(line: &str, line_no: usize) -> MeshResult<ObjLine> {
    let line = line.trim();
    let (keyword, rest) = match line.find(char::is_whitespace) {
        Some(split) => (&line[..split], &line[split..]),
        None => (line, ""),
    };

    match keyword {
        "v" => parse_vertex_fields(rest)
            .map(|(_, coords)| ObjLine::Vertex(coords))
            .map_err(|_| MeshError::format(line_no, format!("expected `v x y z`, got `{line}`"))),
        "f" => parse_face_fields(rest)
            .map(|(_, refs)| ObjLine::Face(refs))
            .map_err(|_| MeshError::format(line_no, format!("expected `f a b c`, got `{line}`"))),
        _ => Ok(ObjLine::Other),
    }
}

/// Consume the whitespace (or end of input) that must follow a numeric token
fn token_end(input: &str) -> IResult<&str, &str> {
    alt((multispace1, eof))(input)
}

fn coordinate(input: &str) -> IResult<&str, f64> {
    preceded(multispace0, terminated(double, token_end))(input)
}

/// A face reference; `i/t/n` forms contribute only their vertex index
fn vertex_reference(input: &str) -> IResult<&str, i64> {
    preceded(
        multispace0,
        terminated(
            integer,
            tuple((opt(preceded(char('/'), opt(is_not(" \t\r\n")))), token_end)),
        ),
    )(input)
}

fn parse_vertex_fields(input: &str) -> IResult<&str, [f64; 3]> {
    let (input, (x, y, z)) = tuple((coordinate, coordinate, coordinate))(input)?;
    Ok((input, [x, y, z]))
}

fn parse_face_fields(input: &str) -> IResult<&str, [i64; 3]> {
    let (input, (a, b, c)) = tuple((vertex_reference, vertex_reference, vertex_reference))(input)?;
    Ok((input, [a, b, c]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_triangle() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
        assert_eq!(mesh.vertices()[1], Vertex::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_other_lines_ignored() {
        let text = "# generated\no shape\nvn 0 0 1\nvt 0.5 0.5\nv 0 0 0\nv 1 0 0\nv 0 1 0\ns off\nf 1 2 3\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_extra_face_columns_truncated() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3 4\n").unwrap();
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_slash_references() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2//2 3/3\n").unwrap();
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_scientific_and_negative_coordinates() {
        let mesh = parse_obj("v -1.5e-2 2E3 -0.25").unwrap();
        let p = mesh.vertices()[0].position;
        assert!((p.x + 0.015).abs() < 1e-12);
        assert!((p.y - 2000.0).abs() < 1e-9);
        assert!((p.z + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_short_vertex_line_is_format_error() {
        let err = parse_obj("v 0 0 0\nv 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::Format { line: 2, .. }));
    }

    #[test]
    fn test_non_numeric_token_is_format_error() {
        assert!(matches!(
            parse_obj("v 0 zero 0").unwrap_err(),
            MeshError::Format { line: 1, .. }
        ));
        assert!(matches!(
            parse_obj("v 1.0abc 0 0").unwrap_err(),
            MeshError::Format { .. }
        ));
        assert!(matches!(
            parse_obj("v 0 0 0\nf 1 two 3").unwrap_err(),
            MeshError::Format { line: 2, .. }
        ));
    }

    #[test]
    fn test_zero_reference_is_index_error() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::Index { line: 4, index: -1, .. }));
    }

    #[test]
    fn test_most_negative_reference_is_index_error() {
        let err = parse_obj("v 0 0 0\nf -9223372036854775808 1 1\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::Index {
                line: 2,
                index: i64::MIN,
                vertex_count: 1,
            }
        ));
    }

    #[test]
    fn test_reference_past_end_is_index_error() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::Index {
                index: 3,
                vertex_count: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("  v 1 2 3  ", 1).unwrap(), ObjLine::Vertex([1.0, 2.0, 3.0]));
        assert_eq!(classify_line("f 3 2 1", 1).unwrap(), ObjLine::Face([3, 2, 1]));
        assert_eq!(classify_line("", 1).unwrap(), ObjLine::Other);
        assert_eq!(classify_line("vertex 1 2 3", 1).unwrap(), ObjLine::Other);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_obj(dir.path().join("absent.obj")).unwrap_err();
        assert!(err.is_missing_file());
    }

    #[test]
    fn test_load_non_utf8_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.obj");
        fs::write(&path, [b'v', b' ', 0xff, 0xfe, b'\n']).unwrap();
        assert!(matches!(
            load_obj(&path).unwrap_err(),
            MeshError::Format { line: 0, .. }
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        let mesh = load_obj(&path).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }
}
