// src/geometry.rs
//! Геометрия в пиксельных координатах континента
//!
//! - `centroid` — точка привязки подписи региона (среднее вершин);
//! - `Bounds` — прямоугольник зоны (запад/север/восток/юг);
//! - `validate_polygon` — проверка, что полигон простой (без самопересечений),
//!   до того как он попадёт в растеризатор.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

/// Вершина полигона `(x, y)` в пикселях изображения континента
pub type Vertex = (i32, i32);

/// Возвращает среднее арифметическое вершин полигона.
///
/// Это не центр масс площади: для сильно вогнутых регионов точка может
/// оказаться смещённой, но для размещения подписи этого достаточно.
///
/// # Ошибки
/// `MapError::EmptyPolygon`, если вершин нет.
///
/// # Пример
/// ```
/// use claimmap::geometry::centroid;
/// let c = centroid(&[(0, 0), (0, 10), (10, 10), (10, 0)]).unwrap();
/// assert_eq!(c, (5.0, 5.0));
/// ```
pub fn centroid(vertices: &[Vertex]) -> Result<(f32, f32)> {
    if vertices.is_empty() {
        return Err(MapError::EmptyPolygon);
    }
    let n = vertices.len() as f64;
    let (sx, sy) = vertices.iter().fold((0i64, 0i64), |(sx, sy), &(x, y)| {
        (sx + i64::from(x), sy + i64::from(y))
    });
    Ok(((sx as f64 / n) as f32, (sy as f64 / n) as f32))
}

/// Прямоугольник в пикселях: `west`/`east` — левая и правая границы,
/// `north`/`south` — верхняя и нижняя (ось Y направлена вниз).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub west: u32,
    pub north: u32,
    pub east: u32,
    pub south: u32,
}

impl Bounds {
    #[must_use]
    pub fn new(west: u32, north: u32, east: u32, south: u32) -> Self {
        Self {
            west,
            north,
            east,
            south,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.east.saturating_sub(self.west)
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.south.saturating_sub(self.north)
    }

    /// `west < east` и `north < south`
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.west < self.east && self.north < self.south
    }

    /// Прямоугольник целиком лежит внутри изображения `width × height`
    #[must_use]
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.is_well_formed() && self.east <= width && self.south <= height
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(w {}, n {}, e {}, s {})",
            self.west, self.north, self.east, self.south
        )
    }
}

/// Проверяет, что вершины образуют простой полигон.
///
/// Требования:
/// - не меньше трёх вершин;
/// - последняя вершина не повторяет первую (контур замыкается неявно);
/// - соседние вершины не совпадают;
/// - несмежные рёбра не пересекаются и не касаются.
///
/// Возвращает текст причины, чтобы вызывающий код мог добавить имя региона.
pub fn validate_polygon(vertices: &[Vertex]) -> std::result::Result<(), String> {
    let n = vertices.len();
    if n < 3 {
        return Err(format!("needs at least 3 vertices, got {n}"));
    }
    if vertices[0] == vertices[n - 1] {
        return Err("last vertex repeats the first one".to_string());
    }
    for i in 0..n {
        let next = (i + 1) % n;
        if vertices[i] == vertices[next] {
            return Err(format!("vertex {i} duplicates vertex {next}"));
        }
    }

    for i in 0..n {
        let a = (vertices[i], vertices[(i + 1) % n]);
        for j in (i + 1)..n {
            // смежные рёбра делят вершину
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let b = (vertices[j], vertices[(j + 1) % n]);
            if segments_intersect(a, b) {
                return Err(format!("edge {i} intersects edge {j}"));
            }
        }
    }
    Ok(())
}

fn orientation(p: Vertex, q: Vertex, r: Vertex) -> i64 {
    let v = (i64::from(q.0) - i64::from(p.0)) * (i64::from(r.1) - i64::from(p.1))
        - (i64::from(q.1) - i64::from(p.1)) * (i64::from(r.0) - i64::from(p.0));
    v.signum()
}

fn on_segment(p: Vertex, q: Vertex, r: Vertex) -> bool {
    q.0 >= p.0.min(r.0) && q.0 <= p.0.max(r.0) && q.1 >= p.1.min(r.1) && q.1 <= p.1.max(r.1)
}

fn segments_intersect((p1, q1): (Vertex, Vertex), (p2, q2): (Vertex, Vertex)) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && on_segment(p1, p2, q1))
        || (o2 == 0 && on_segment(p1, q2, q1))
        || (o3 == 0 && on_segment(p2, p1, q2))
        || (o4 == 0 && on_segment(p2, q1, q2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_is_vertex_mean() {
        let c = centroid(&[(0, 0), (0, 10), (10, 10), (10, 0)]).unwrap();
        assert_eq!(c, (5.0, 5.0));

        let c = centroid(&[(3525, 5040), (3430, 5185), (3635, 5185), (3615, 5040)]).unwrap();
        assert!((c.0 - 3551.25).abs() < 1e-3);
        assert!((c.1 - 5112.5).abs() < 1e-3);
    }

    #[test]
    fn centroid_of_single_point_is_that_point() {
        assert_eq!(centroid(&[(7, -3)]).unwrap(), (7.0, -3.0));
    }

    #[test]
    fn centroid_of_empty_polygon_fails() {
        assert!(matches!(centroid(&[]), Err(MapError::EmptyPolygon)));
    }

    #[test]
    fn bounds_dimensions() {
        let b = Bounds::new(1000, 2000, 1500, 2500);
        assert_eq!((b.width(), b.height()), (500, 500));
        assert!(b.fits_within(5000, 6000));
        assert!(!b.fits_within(1400, 6000));
        assert!(!Bounds::new(10, 0, 10, 5).is_well_formed());
    }

    #[test]
    fn square_and_concave_polygons_are_valid() {
        assert!(validate_polygon(&[(0, 0), (0, 10), (10, 10), (10, 0)]).is_ok());
        // Razorfen Downs: вогнутый семиугольник
        let concave = [
            (3525, 8030),
            (3525, 8190),
            (3807, 8410),
            (4010, 8410),
            (4010, 8286),
            (3800, 8125),
            (3564, 8030),
        ];
        assert!(validate_polygon(&concave).is_ok());
    }

    #[test]
    fn degenerate_polygons_are_rejected() {
        let err = validate_polygon(&[(0, 0), (1, 1)]).unwrap_err();
        assert!(err.contains("3 vertices"), "{err}");

        let err = validate_polygon(&[(0, 0), (0, 5), (5, 5), (0, 0)]).unwrap_err();
        assert!(err.contains("repeats"), "{err}");

        let err = validate_polygon(&[(0, 0), (0, 5), (0, 5), (5, 5)]).unwrap_err();
        assert!(err.contains("duplicates"), "{err}");
    }

    #[test]
    fn bow_tie_is_rejected() {
        let err = validate_polygon(&[(0, 0), (10, 10), (10, 0), (0, 10)]).unwrap_err();
        assert!(err.contains("intersects"), "{err}");
    }
}
