// src/math/algorithms/marching_squares/extractor.rs

use super::cell::{CellCase, SaddleResolution};
use super::edge_cache::{EdgeCache, EdgeKey};
use super::levels::isoline_levels;
use crate::math::{
    error::{MathError, MathResult},
    grid::Grid,
    sampling::FieldValues,
    types::Point2D,
    utils::comparison,
};
use bevy::log::debug;
use std::ops::Range;

/// Isolinie eines einzelnen Levels als Linienliste (kein zusammenhängender Polygonzug).
/// Die Indexpaare `[2i, 2i + 1]` bilden jeweils ein Segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsolineSet {
    pub level: f32,
    pub vertices: Vec<Point2D>,
    pub indices: Vec<u32>,
    /// Gitterkante, auf der `vertices[i]` liegt.
    pub crossed_edges: Vec<EdgeKey>,
}

impl IsolineSet {
    pub fn new(level: f32) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Iteriert über alle Segmente als Punktpaare.
    pub fn segments(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.indices.chunks_exact(2).map(|pair| {
            (
                self.vertices[pair[0] as usize],
                self.vertices[pair[1] as usize],
            )
        })
    }
}

/// Extrahiert Isolinien per Marching Squares aus den Feldwerten eines Gitters.
#[derive(Debug, Clone, Copy)]
pub struct IsolineExtractor<'a> {
    grid: &'a Grid,
    values: &'a FieldValues,
    saddle: SaddleResolution,
}

impl<'a> IsolineExtractor<'a> {
    pub fn new(grid: &'a Grid, values: &'a FieldValues) -> MathResult<Self> {
        if values.len() != grid.point_count() {
            return Err(MathError::DimensionMismatch {
                expected: grid.point_count(),
                actual: values.len(),
            });
        }
        Ok(Self {
            grid,
            values,
            saddle: SaddleResolution::default(),
        })
    }

    pub fn with_saddle_resolution(mut self, saddle: SaddleResolution) -> Self {
        self.saddle = saddle;
        self
    }

    /// Extrahiert die Isolinie für ein einzelnes Level.
    /// Jede geschnittene Gitterkante erzeugt genau einen Vertex, den sich
    /// benachbarte Zellen teilen.
    pub fn extract(&self, level: f32) -> IsolineSet {
        let mut isoline = IsolineSet::new(level);
        let mut cache = EdgeCache::with_capacity(self.grid.width() + self.grid.height());

        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                let corners = self.grid.cell_corners(row, col);
                let residuals = corners.map(|i| self.values.value(i) - level);

                let case = CellCase::classify(residuals, self.saddle);
                for segment in case.segments() {
                    for (from, to) in segment {
                        let key = EdgeKey::new(corners[from], corners[to]);
                        let index = cache.get_or_insert_with(key, || {
                            isoline.vertices.push(self.interpolate(key, level));
                            isoline.crossed_edges.push(key);
                            (isoline.vertices.len() - 1) as u32
                        });
                        isoline.indices.push(index);
                    }
                }
            }
        }

        isoline
    }

    /// Extrahiert `count` Isolinien, gleichmäßig verteilt zwischen Minimum und
    /// Maximum der Feldwerte (Extremwerte selbst ausgenommen).
    pub fn extract_levels(&self, count: i32) -> MathResult<Vec<IsolineSet>> {
        let levels = isoline_levels(self.values.min(), self.values.max(), count)?;
        let isolines: Vec<IsolineSet> = levels.into_iter().map(|l| self.extract(l)).collect();

        debug!(
            "Extracted {} isoline levels ({} segments) on {}x{} grid",
            isolines.len(),
            isolines.iter().map(IsolineSet::segment_count).sum::<usize>(),
            self.grid.width(),
            self.grid.height()
        );
        Ok(isolines)
    }

    /// Lineare Interpolation des Schnittpunkts auf einer achsparallelen Gitterkante.
    fn interpolate(&self, edge: EdgeKey, level: f32) -> Point2D {
        let (a, b) = (edge.low(), edge.high());
        let (p1, p2) = (self.grid.point(a), self.grid.point(b));
        let (v1, v2) = (self.values.value(a), self.values.value(b));

        // Gleiche Endwerte: Parameter undefiniert, Kantenmitte verwenden
        let t = comparison::inverse_lerp_or(v1, v2, level, 0.5).clamp(0.0, 1.0);

        if self.grid.point_row(a) == self.grid.point_row(b) {
            Point2D::new(comparison::lerp(p1.x, p2.x, t), p1.y)
        } else {
            Point2D::new(p1.x, comparison::lerp(p1.y, p2.y, t))
        }
    }
}

/// Index-Bereich eines Levels innerhalb eines `IsolineBatch`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRange {
    pub level: f32,
    pub indices: Range<usize>,
}

/// Alle Level in einem gemeinsamen Vertex-/Index-Puffer für den Renderer.
/// Indizes jedes Levels sind um dessen Vertex-Offset verschoben, Segmente
/// verschiedener Level teilen sich daher nie einen Vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsolineBatch {
    pub vertices: Vec<Point2D>,
    pub indices: Vec<u32>,
    pub levels: Vec<LevelRange>,
}

impl IsolineBatch {
    pub fn from_sets(sets: &[IsolineSet]) -> Self {
        let mut batch = Self {
            vertices: Vec::with_capacity(sets.iter().map(|s| s.vertices.len()).sum()),
            indices: Vec::with_capacity(sets.iter().map(|s| s.indices.len()).sum()),
            levels: Vec::with_capacity(sets.len()),
        };

        for set in sets {
            let offset = batch.vertices.len() as u32;
            let start = batch.indices.len();
            batch.vertices.extend_from_slice(&set.vertices);
            batch.indices.extend(set.indices.iter().map(|i| i + offset));
            batch.levels.push(LevelRange {
                level: set.level,
                indices: start..batch.indices.len(),
            });
        }
        batch
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    pub fn segments(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.indices.chunks_exact(2).map(|pair| {
            (
                self.vertices[pair[0] as usize],
                self.vertices[pair[1] as usize],
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::scalar_field::AnalyticField;
    use approx::assert_abs_diff_eq;

    /// 1x1-Gitter mit Eckwerten in der Reihenfolge oben-links, unten-links,
    /// unten-rechts, oben-rechts.
    fn single_cell(corners: [f32; 4]) -> (Grid, FieldValues) {
        let grid = Grid::new(1, 1).unwrap();
        let [tl, bl, br, tr] = corners;
        // Punkte sind zeilenweise abgelegt: TL, TR, BL, BR
        let values = FieldValues::for_grid(&grid, vec![tl, tr, bl, br]).unwrap();
        (grid, values)
    }

    fn circle_field() -> AnalyticField<impl Fn(f32, f32) -> f32> {
        AnalyticField(|x: f32, y: f32| x * x + y * y)
    }

    /// Größte Abweichung der Vertices vom exakten Kreis mit Radius 0.5.
    fn max_circle_error(resolution: usize) -> f32 {
        let grid = Grid::new(resolution, resolution).unwrap();
        let values = FieldValues::sample(&grid, &circle_field());
        let isoline = IsolineExtractor::new(&grid, &values).unwrap().extract(0.25);
        assert!(!isoline.is_empty());
        isoline
            .vertices
            .iter()
            .map(|v| (v.length() - 0.5).abs())
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_single_corner_cell() {
        let (grid, values) = single_cell([10.0, -10.0, -10.0, -10.0]);
        let isoline = IsolineExtractor::new(&grid, &values).unwrap().extract(0.0);

        assert_eq!(isoline.segment_count(), 1);
        assert_eq!(isoline.vertices.len(), 2);

        // Beide Schnittpunkte liegen auf den an oben-links anliegenden Kanten, je mittig
        let top_left = grid.point(0);
        for v in &isoline.vertices {
            assert_abs_diff_eq!(v.distance(top_left), 1.0, epsilon = 1e-6);
        }
        assert!(isoline.vertices.contains(&Point2D::new(0.0, 1.0)));
        assert!(isoline.vertices.contains(&Point2D::new(-1.0, 0.0)));
    }

    #[test]
    fn test_constant_field_produces_nothing() {
        let grid = Grid::new(6, 4).unwrap();
        let values = FieldValues::sample(&grid, &AnalyticField(|_: f32, _: f32| 2.0));
        let extractor = IsolineExtractor::new(&grid, &values).unwrap();

        for level in [1.0, 2.0, 3.0] {
            let isoline = extractor.extract(level);
            assert!(isoline.vertices.is_empty());
            assert!(isoline.indices.is_empty());
        }
        // min == max: alle Level fallen zusammen, trotzdem keine Linien
        let sets = extractor.extract_levels(4).unwrap();
        assert_eq!(sets.len(), 4);
        assert!(sets.iter().all(IsolineSet::is_empty));
    }

    #[test]
    fn test_shared_edge_vertex_is_deduplicated() {
        // 2x1 Zellen, Punkte:  0 1 2
        //                      3 4 5
        // Nur Punkt 1 ist positiv; beide Zellen schneiden die gemeinsame Kante 1-4.
        let grid = Grid::new(2, 1).unwrap();
        let values =
            FieldValues::for_grid(&grid, vec![-10.0, 10.0, -10.0, -10.0, -10.0, -10.0]).unwrap();
        let isoline = IsolineExtractor::new(&grid, &values).unwrap().extract(0.0);

        assert_eq!(isoline.segment_count(), 2);
        assert_eq!(isoline.vertices.len(), 3);

        let shared = isoline
            .crossed_edges
            .iter()
            .position(|&e| e == EdgeKey::new(4, 1))
            .unwrap() as u32;
        let first = &isoline.indices[0..2];
        let second = &isoline.indices[2..4];
        assert!(first.contains(&shared));
        assert!(second.contains(&shared));
    }

    #[test]
    fn test_saddle_is_deterministic() {
        let (grid, values) = single_cell([10.0, -10.0, 10.0, -10.0]);
        let extractor = IsolineExtractor::new(&grid, &values).unwrap();

        let first = extractor.extract(0.0);
        for _ in 0..5 {
            assert_eq!(extractor.extract(0.0), first);
        }
        assert_eq!(first.segment_count(), 2);
        assert_eq!(first.vertices.len(), 4);

        // Standardregel: Mitte (0) zählt als negativ, die positiven Ecken
        // oben-links und unten-rechts werden einzeln abgeschnitten.
        let top_left = grid.point(0);
        let bottom_right = grid.point(3);
        let (a, b) = first.segments().next().unwrap();
        assert_abs_diff_eq!(a.distance(top_left), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.distance(top_left), 1.0, epsilon = 1e-6);
        let (c, d) = first.segments().nth(1).unwrap();
        assert_abs_diff_eq!(c.distance(bottom_right), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(d.distance(bottom_right), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_saddle_resolution_changes_topology() {
        let (grid, values) = single_cell([10.0, -10.0, 10.0, -10.0]);
        let joined = IsolineExtractor::new(&grid, &values)
            .unwrap()
            .with_saddle_resolution(SaddleResolution::JoinPositive)
            .extract(0.0);

        // Jetzt werden unten-links und oben-rechts abgeschnitten
        let bottom_left = grid.point(2);
        let (a, b) = joined.segments().next().unwrap();
        assert_abs_diff_eq!(a.distance(bottom_left), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.distance(bottom_left), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_equal_corner_values_do_not_produce_nan() {
        // Kante oben-links/unten-links hat Residuum 0 an beiden Enden
        let (grid, values) = single_cell([0.0, 0.0, 1.0, 1.0]);
        let extractor = IsolineExtractor::new(&grid, &values).unwrap();
        let isoline = extractor.extract(0.0);
        assert!(isoline.vertices.iter().all(|v| v.is_finite()));

        let key = EdgeKey::new(0, 2);
        let midpoint = extractor.interpolate(key, 0.0);
        assert_eq!(midpoint, Point2D::new(-1.0, 0.0));
    }

    #[test]
    fn test_vertices_lie_on_level() {
        let grid = Grid::new(20, 15).unwrap();
        let field = AnalyticField(|x: f32, y: f32| (2.0 * x).sin() + y * y - 0.5 * x * y);
        let values = FieldValues::sample(&grid, &field);
        let extractor = IsolineExtractor::new(&grid, &values).unwrap();

        for isoline in extractor.extract_levels(6).unwrap() {
            assert!(!isoline.is_empty());
            assert_eq!(isoline.indices.len() % 2, 0);
            assert_eq!(isoline.vertices.len(), isoline.crossed_edges.len());

            for pair in isoline.indices.chunks_exact(2) {
                assert_ne!(pair[0], pair[1]);
                assert!((pair[1] as usize) < isoline.vertices.len());
            }

            for (vertex, edge) in isoline.vertices.iter().zip(&isoline.crossed_edges) {
                let (p1, p2) = (grid.point(edge.low()), grid.point(edge.high()));
                let (v1, v2) = (values.value(edge.low()), values.value(edge.high()));
                let t = if grid.point_row(edge.low()) == grid.point_row(edge.high()) {
                    (vertex.x - p1.x) / (p2.x - p1.x)
                } else {
                    (vertex.y - p1.y) / (p2.y - p1.y)
                };
                let reconstructed = v1 + (v2 - v1) * t;
                assert_abs_diff_eq!(reconstructed, isoline.level, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_refinement_converges_to_circle() {
        let coarse = max_circle_error(10);
        let fine = max_circle_error(40);
        assert!(fine < coarse);
        assert!(fine < 5e-3);
    }

    #[test]
    fn test_extract_levels_counts() {
        let grid = Grid::new(8, 8).unwrap();
        let values = FieldValues::sample(&grid, &circle_field());
        let extractor = IsolineExtractor::new(&grid, &values).unwrap();

        assert!(extractor.extract_levels(0).unwrap().is_empty());
        assert_eq!(
            extractor.extract_levels(-3),
            Err(MathError::InvalidIsolineCount { count: -3 })
        );

        let sets = extractor.extract_levels(3).unwrap();
        assert_eq!(sets.len(), 3);
        assert!(sets.windows(2).all(|w| w[0].level < w[1].level));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let grid = Grid::new(2, 2).unwrap();
        let values = FieldValues::from_values(vec![0.0; 4]);
        assert!(matches!(
            IsolineExtractor::new(&grid, &values),
            Err(MathError::DimensionMismatch {
                expected: 9,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_batch_keeps_levels_apart() {
        let grid = Grid::new(12, 12).unwrap();
        let values = FieldValues::sample(&grid, &circle_field());
        let sets = IsolineExtractor::new(&grid, &values)
            .unwrap()
            .extract_levels(3)
            .unwrap();
        let batch = IsolineBatch::from_sets(&sets);

        assert_eq!(
            batch.segment_count(),
            sets.iter().map(IsolineSet::segment_count).sum::<usize>()
        );
        assert_eq!(batch.levels.len(), 3);

        let mut vertex_start = 0u32;
        for (range, set) in batch.levels.iter().zip(&sets) {
            let vertex_end = vertex_start + set.vertices.len() as u32;
            assert_eq!(range.level, set.level);
            assert!(
                batch.indices[range.indices.clone()]
                    .iter()
                    .all(|&i| i >= vertex_start && i < vertex_end)
            );
            vertex_start = vertex_end;
        }
    }
}
