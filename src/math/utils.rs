// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    /// Unterhalb dieser Spannweite gilt ein Feld als konstant (Farbabbildung).
    pub const COLOR_RANGE_EPSILON: f32 = 1e-6;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Lineare Interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Inverse lineare Interpolation.
    /// Bei (nahezu) gleichen Endpunkten ist der Parameter undefiniert; dann wird
    /// `fallback` zurückgegeben statt NaN.
    pub fn inverse_lerp_or(a: f32, b: f32, value: f32, fallback: f32) -> f32 {
        if nearly_equal(a, b) {
            fallback
        } else {
            (value - a) / (b - a)
        }
    }

}
