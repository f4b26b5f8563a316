use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum PlaybackState {
    #[default] // Startzustand
    Running,
    Paused,
}
