//! SVG path fragment builders.
//!
//! Shapes and the drawing pass assemble path `d` strings from these small
//! helpers. Lowercase commands are relative, uppercase absolute. The exact
//! output format (spacing included) is part of the crate's contract: shape
//! fragments concatenate into a single attribute value, and tests compare
//! them literally.

/// A coordinate pair used inside `line` and `curve` fragments.
pub fn point(x: f32, y: f32) -> String {
    format!(" {x},{y} ")
}

/// An absolute move.
pub fn move_to(x: f32, y: f32) -> String {
    format!(" M {x},{y} ")
}

/// A relative move.
pub fn move_by(dx: f32, dy: f32) -> String {
    format!(" m {dx},{dy} ")
}

/// A relative line.
pub fn line_to(dx: f32, dy: f32) -> String {
    format!(" l {dx},{dy} ")
}

/// A relative polyline through the given points.
pub fn line(points: &[String]) -> String {
    format!(" l{}", points.concat())
}

/// A single-axis line: `command` is one of `h`, `v`, `H`, `V`.
pub fn line_on_axis(command: &str, value: f32) -> String {
    format!(" {command} {value} ")
}

/// A curve of the given kind (`c`, `s`, `C`, `S`) through the given points.
pub fn curve(command: &str, points: &[String]) -> String {
    format!(" {}{}", command, points.concat())
}

/// A circular arc with equal radii. `flags` carries the rotation and the
/// large-arc/sweep flags, e.g. `"0 0,1"`.
pub fn arc(command: &str, flags: &str, radius: f32, end: &str) -> String {
    format!("{command} {radius} {radius} {flags}{end}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_format() {
        assert_eq!(point(8.0, -7.5), " 8,-7.5 ");
        assert_eq!(point(0.0, 2.5), " 0,2.5 ");
    }

    #[test]
    fn test_moves_and_lines() {
        assert_eq!(move_to(10.0, 5.0), " M 10,5 ");
        assert_eq!(move_by(0.0, 8.0), " m 0,8 ");
        assert_eq!(line_to(-8.0, 7.5), " l -8,7.5 ");
        assert_eq!(line_on_axis("v", 15.0), " v 15 ");
        assert_eq!(line_on_axis("H", 66.5), " H 66.5 ");
    }

    #[test]
    fn test_polyline() {
        let path = line(&[point(6.0, 3.0), point(-12.0, 6.0), point(6.0, 3.0)]);
        assert_eq!(path, " l 6,3  -12,6  6,3 ");
    }

    #[test]
    fn test_curve_and_arc() {
        let c = curve("c", &[point(30.0, -15.0), point(70.0, -15.0), point(100.0, 0.0)]);
        assert_eq!(c, " c 30,-15  70,-15  100,0 ");

        let a = arc("a", "0 0,1", 8.0, &point(8.0, -8.0));
        assert_eq!(a, "a 8 8 0 0,1 8,-8 ");
    }
}
