// src/viewer/ui.rs
use super::resources::{FieldSimulation, SingleStepRequest};
use super::state::PlaybackState;
use crate::config::{IsolineSettings, SceneKind};
use crate::math::algorithms::{MetaballFalloff, SaddleResolution};
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{self, ComboBox, Slider, Window},
};

pub fn isoline_control_ui_system(
    mut contexts: EguiContexts,
    mut settings: ResMut<IsolineSettings>,
    simulation: Res<FieldSimulation>,
    mut step_request: ResMut<SingleStepRequest>,
    mut next_state: ResMut<NextState<PlaybackState>>,
    current_state: Res<State<PlaybackState>>,
) {
    Window::new("Isolinien")
        .default_width(320.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Wiedergabe");
            ui.horizontal(|ui| {
                match current_state.get() {
                    PlaybackState::Running => {
                        if ui.button("⏸ Pause").clicked() {
                            next_state.set(PlaybackState::Paused);
                        }
                    }
                    PlaybackState::Paused => {
                        if ui.button("▶ Start").clicked() {
                            next_state.set(PlaybackState::Running);
                        }
                        if ui.button("Schritt ⏭").clicked() {
                            step_request.0 = true;
                        }
                    }
                }
            });

            // Nur bei echten Änderungen schreiben, sonst wird die Resource jedes Frame "changed"
            let mut movement_scale = settings.movement_scale;
            if ui
                .add(Slider::new(&mut movement_scale, 0.0..=3.0).text("Geschwindigkeit"))
                .changed()
            {
                settings.movement_scale = movement_scale;
            }

            ui.collapsing("Gitter", |ui| {
                let mut width = settings.grid_width;
                let mut height = settings.grid_height;
                let width_changed = ui
                    .add(Slider::new(&mut width, 1..=800).text("Breite"))
                    .changed();
                let height_changed = ui
                    .add(Slider::new(&mut height, 1..=600).text("Höhe"))
                    .changed();
                if width_changed || height_changed {
                    settings.grid_width = width;
                    settings.grid_height = height;
                }
                let mut show_fill = settings.show_fill;
                if ui.checkbox(&mut show_fill, "Feld einfärben").changed() {
                    settings.show_fill = show_fill;
                }
            });

            ui.collapsing("Isolinien", |ui| {
                let mut count = settings.isoline_count;
                if ui.add(Slider::new(&mut count, 0..=50).text("Anzahl")).changed() {
                    settings.isoline_count = count;
                }

                let mut saddle = settings.saddle_resolution;
                ComboBox::from_label("Sattelpunkte")
                    .selected_text(saddle_label(saddle))
                    .show_ui(ui, |ui| {
                        for option in [
                            SaddleResolution::CenterValue,
                            SaddleResolution::SeparatePositive,
                            SaddleResolution::JoinPositive,
                        ] {
                            ui.selectable_value(&mut saddle, option, saddle_label(option));
                        }
                    });
                if saddle != settings.saddle_resolution {
                    settings.saddle_resolution = saddle;
                }
            });

            ui.collapsing("Falloff", |ui| {
                let mut falloff = settings.field.falloff;
                ComboBox::from_label("Funktion")
                    .selected_text(falloff_label(falloff))
                    .show_ui(ui, |ui| {
                        for option in [
                            MetaballFalloff::Gaussian,
                            MetaballFalloff::Algebraic {
                                radius_scale_factor: 1.0,
                            },
                            MetaballFalloff::WyvillCubic,
                        ] {
                            // Nur die Variante vergleichen, der Faktor bleibt beim Wechsel erhalten
                            let selected = std::mem::discriminant(&falloff)
                                == std::mem::discriminant(&option);
                            if ui
                                .selectable_label(selected, falloff_label(option))
                                .clicked()
                                && !selected
                            {
                                falloff = option;
                            }
                        }
                    });
                if let MetaballFalloff::Algebraic {
                    radius_scale_factor,
                } = &mut falloff
                {
                    ui.add(Slider::new(radius_scale_factor, 0.1..=3.0).text("Radiusfaktor"));
                }
                if falloff != settings.field.falloff {
                    settings.field.falloff = falloff;
                }
            });

            ui.collapsing("Szene", |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Klassisch").clicked() {
                        settings.scene = SceneKind::Classic;
                    }
                    if ui.button("Zufällig").clicked() {
                        let seed = match settings.scene {
                            SceneKind::Random { seed, .. } => seed.wrapping_add(1),
                            SceneKind::Classic => rand::random::<u64>(),
                        };
                        settings.scene = SceneKind::Random { count: 9, seed };
                    }
                });
            });

            ui.separator();
            ui.label(format!(
                "Feld: {:.4} .. {:.4}",
                simulation.values.min(),
                simulation.values.max()
            ));
            ui.label(format!(
                "{} Level, {} Segmente",
                simulation.isolines.levels.len(),
                simulation.isolines.segment_count()
            ));
            ui.add(egui::Label::new(format!("Szene: {:?}", simulation.scene)));
        });
}

fn falloff_label(falloff: MetaballFalloff) -> &'static str {
    match falloff {
        MetaballFalloff::Gaussian => "Gauß",
        MetaballFalloff::Algebraic { .. } => "Algebraisch",
        MetaballFalloff::WyvillCubic => "Wyvill (kubisch)",
    }
}

fn saddle_label(saddle: SaddleResolution) -> &'static str {
    match saddle {
        SaddleResolution::CenterValue => "Zellmittelwert",
        SaddleResolution::SeparatePositive => "Positive trennen",
        SaddleResolution::JoinPositive => "Positive verbinden",
    }
}
