// src/math/algorithms/marching_squares/cell.rs

use serde::{Deserialize, Serialize};

/// Lokale Eckennummern einer Zelle, feste Reihenfolge gegen den Uhrzeigersinn
/// beginnend oben links. Nachbarn von Ecke k sind (k + 3) % 4 und (k + 1) % 4.
pub const TOP_LEFT: usize = 0;
pub const BOTTOM_LEFT: usize = 1;
pub const BOTTOM_RIGHT: usize = 2;
pub const TOP_RIGHT: usize = 3;

/// Eine Zellkante als Paar lokaler Eckennummern.
pub type LocalEdge = (usize, usize);

/// Ein Segment verbindet die Schnittpunkte auf zwei Zellkanten.
pub type SegmentEdges = [LocalEdge; 2];

/// Tie-Break-Regel für den mehrdeutigen Sattelfall (diagonal gleiche Vorzeichen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SaddleResolution {
    /// Schätzt den Wert in der Zellmitte als Mittel der vier Residuen (Wert des
    /// bilinearen Interpolanten im Zentrum). Das Ecken-Paar, dessen Vorzeichen
    /// die Mitte teilt, wird durch die Mitte verbunden; das andere Paar wird
    /// abgeschnitten. Ein Mittelwert von exakt 0 zählt als nicht-positiv.
    #[default]
    CenterValue,
    /// Schneidet immer die beiden positiven Ecken ab (positive Bereiche getrennt).
    SeparatePositive,
    /// Schneidet immer die beiden nicht-positiven Ecken ab (positive Bereiche verbunden).
    JoinPositive,
}

/// Verlauf der einzelnen Linie bei einer 2-2-Teilung mit benachbarten Ecken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineOrientation {
    /// Linke und rechte Spalte unterscheiden sich: Linie von oberer zu unterer Kante.
    Vertical,
    /// Obere und untere Zeile unterscheiden sich: Linie von linker zu rechter Kante.
    Horizontal,
}

/// Klassifikation einer Zelle anhand der Vorzeichen ihrer vier Residuen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellCase {
    /// Alle Ecken auf derselben Seite, kein Schnitt.
    Empty,
    /// Genau eine Ecke weicht ab; ein Segment schneidet sie ab.
    SingleCorner { corner: usize },
    /// Zwei benachbarte Ecken auf jeder Seite; ein durchgehendes Segment.
    AdjacentPair { orientation: LineOrientation },
    /// Diagonal gleiche Vorzeichen; die beiden Ecken in `isolated` werden per
    /// eigenem Segment abgeschnitten.
    Saddle { isolated: [usize; 2] },
}

impl CellCase {
    /// Klassifiziert eine Zelle. `residuals` sind Eckwert minus Level in der
    /// Reihenfolge oben-links, unten-links, unten-rechts, oben-rechts.
    /// Eine Ecke gilt als "positiv" nur bei Residuum strikt größer 0.
    pub fn classify(residuals: [f32; 4], saddle: SaddleResolution) -> Self {
        let positive = residuals.map(|r| r > 0.0);
        let positive_count = positive.iter().filter(|&&p| p).count();

        match positive_count {
            1 | 3 => {
                let corner = (0..4)
                    .find(|&k| {
                        positive[k] != positive[(k + 3) % 4] && positive[k] != positive[(k + 1) % 4]
                    })
                    .unwrap_or(TOP_LEFT); // bei 1 oder 3 existiert die Ecke immer
                CellCase::SingleCorner { corner }
            }
            2 => {
                if positive[TOP_LEFT] == positive[BOTTOM_LEFT] {
                    CellCase::AdjacentPair {
                        orientation: LineOrientation::Vertical,
                    }
                } else if positive[TOP_LEFT] == positive[TOP_RIGHT] {
                    CellCase::AdjacentPair {
                        orientation: LineOrientation::Horizontal,
                    }
                } else {
                    let cut_odd = match saddle {
                        SaddleResolution::CenterValue => {
                            let center = residuals.iter().sum::<f32>() / 4.0;
                            (center > 0.0) == positive[TOP_LEFT]
                        }
                        SaddleResolution::SeparatePositive => !positive[TOP_LEFT],
                        SaddleResolution::JoinPositive => positive[TOP_LEFT],
                    };
                    let isolated = if cut_odd {
                        [BOTTOM_LEFT, TOP_RIGHT]
                    } else {
                        [TOP_LEFT, BOTTOM_RIGHT]
                    };
                    CellCase::Saddle { isolated }
                }
            }
            _ => CellCase::Empty,
        }
    }

    /// Die Segmente dieser Zelle, jeweils als Paar geschnittener Kanten.
    pub fn segments(&self) -> impl Iterator<Item = SegmentEdges> {
        let segments: [Option<SegmentEdges>; 2] = match *self {
            CellCase::Empty => [None, None],
            CellCase::SingleCorner { corner } => [Some(corner_cut(corner)), None],
            CellCase::AdjacentPair {
                orientation: LineOrientation::Vertical,
            } => [
                Some([(TOP_LEFT, TOP_RIGHT), (BOTTOM_LEFT, BOTTOM_RIGHT)]),
                None,
            ],
            CellCase::AdjacentPair {
                orientation: LineOrientation::Horizontal,
            } => [
                Some([(TOP_LEFT, BOTTOM_LEFT), (TOP_RIGHT, BOTTOM_RIGHT)]),
                None,
            ],
            CellCase::Saddle { isolated: [a, b] } => [Some(corner_cut(a)), Some(corner_cut(b))],
        };
        segments.into_iter().flatten()
    }

    pub fn segment_count(&self) -> usize {
        match self {
            CellCase::Empty => 0,
            CellCase::SingleCorner { .. } | CellCase::AdjacentPair { .. } => 1,
            CellCase::Saddle { .. } => 2,
        }
    }
}

/// Die beiden an Ecke `corner` anliegenden Kanten.
#[inline]
fn corner_cut(corner: usize) -> SegmentEdges {
    [(corner, (corner + 3) % 4), (corner, (corner + 1) % 4)]
}
