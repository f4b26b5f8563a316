// src/math/scalar_field.rs

/// Trait für ein zweidimensionales, kontinuierliches Skalarfeld.
/// Gitter-Sampling und Marching Squares arbeiten ausschließlich über diesen
/// Trait, die konkrete Feldfunktion ist austauschbar.
pub trait ScalarField2D {
    /// Wertet das Feld am Punkt (x, y) aus.
    /// Deterministisch für einen festen inneren Zustand, ohne Seiteneffekte.
    fn evaluate(&self, x: f32, y: f32) -> f32;

    /// Schreitet den inneren Zustand (z.B. bewegte Zentren) um `dt` Sekunden voran.
    /// Statische Felder ignorieren den Aufruf.
    fn advance(&mut self, _dt: f32) {}
}

/// Adapter, der eine beliebige Funktion `f(x, y)` als statisches Feld nutzbar macht.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticField<F>(pub F);

impl<F> ScalarField2D for AnalyticField<F>
where
    F: Fn(f32, f32) -> f32,
{
    fn evaluate(&self, x: f32, y: f32) -> f32 {
        (self.0)(x, y)
    }
}
