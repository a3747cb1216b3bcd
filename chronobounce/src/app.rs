//! The demo window: clock, stopwatch and bounce field side by side.

use crate::paint::{paint_face, paint_field, to_panel, viewport_of};
use crate::theme::{Palette, Role, RolePalette};
use crate::widgets::PanelButton;
use chronocore::config::DemoConfig;
use chronocore::driver::{self, DriverEvent, DriverKind, Drivers, Waker};
use chronocore::hands::{Granularity, TimepieceKind};
use chronocore::scene::Scene;
use egui::{Align2, CentralPanel, Context, Key, Sense, TopBottomPanel, Vec2};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

/// Height reserved under each canvas for its buttons.
const BUTTON_ROW: f32 = 32.0;

pub struct ChronoBounceApp {
    scene: Scene,
    drivers: Drivers,
    events: Receiver<DriverEvent>,
    roles: RolePalette,
    show_about: bool,
}

impl ChronoBounceApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &DemoConfig) -> Self {
        let (tx, events) = driver::event_channel();
        let ctx = cc.egui_ctx.clone();
        let wake: Waker = Arc::new(move || ctx.request_repaint());
        Self {
            scene: Scene::new(config),
            drivers: Drivers::spawn(config.periods(), tx, wake),
            events,
            roles: RolePalette::from_config(config),
            show_about: false,
        }
    }

    /// Apply everything the drivers published since the last frame.
    fn drain_events(&mut self) {
        let applied = self.scene.apply_batch(self.events.try_iter());
        if applied > 1 {
            log::trace!("coalesced {applied} driver events");
        }
    }

    fn toggle_stopwatch(&mut self) {
        if self.drivers.stopwatch().is_running() {
            self.drivers.stop_stopwatch();
        } else {
            self.drivers.start_stopwatch();
        }
    }

    fn reset_stopwatch(&mut self) {
        self.drivers.reset_stopwatch();
        self.scene.reset_stopwatch();
    }

    fn toggle_driver(&self, kind: DriverKind) {
        if self.drivers.is_paused(kind) {
            self.drivers.resume(kind);
        } else {
            self.drivers.pause(kind);
        }
    }

    fn toggle_granularity(&mut self, kind: TimepieceKind) {
        let next = self.scene.timepiece(kind).granularity().toggled();
        self.scene.set_granularity(kind, next);
    }

    fn format_stopwatch(elapsed: Duration) -> String {
        let total_secs = elapsed.as_secs();
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        let centis = elapsed.subsec_millis() / 10;
        format!("{:02}:{:02}.{:02}", mins, secs, centis)
    }

    /// Label for the button that switches away from `current`.
    fn granularity_button(current: Granularity) -> &'static str {
        match current {
            Granularity::Continuous => "tick: hard",
            Granularity::Discrete => "tick: soft",
        }
    }

    fn canvas(ui: &mut egui::Ui, sense: Sense) -> (egui::Rect, egui::Response) {
        let size = Vec2::new(ui.available_width(), (ui.available_height() - BUTTON_ROW).max(0.0));
        ui.allocate_exact_size(size, sense)
    }

    fn draw_clock_panel(&mut self, ui: &mut egui::Ui) {
        self.roles.heading(ui, Role::Clock);
        let (rect, _) = Self::canvas(ui, Sense::hover());
        self.scene.observe_clock_viewport(viewport_of(rect));
        let clock = &self.scene.clock;
        paint_face(ui.painter(), rect, &clock.layout(), clock.colors());

        ui.horizontal(|ui| {
            let paused = self.drivers.is_paused(DriverKind::Clock);
            let freeze = if paused { "resume" } else { "freeze" };
            if ui.add(PanelButton::new(freeze).latched(paused)).clicked() {
                self.toggle_driver(DriverKind::Clock);
            }
            let tick = Self::granularity_button(self.scene.clock.granularity());
            if ui.add(PanelButton::new(tick)).clicked() {
                self.toggle_granularity(TimepieceKind::Clock);
            }
        });
    }

    fn draw_stopwatch_panel(&mut self, ui: &mut egui::Ui) {
        self.roles.heading(ui, Role::Stopwatch);
        let (rect, _) = Self::canvas(ui, Sense::hover());
        self.scene.observe_stopwatch_viewport(viewport_of(rect));
        let stopwatch = &self.scene.stopwatch;
        paint_face(ui.painter(), rect, &stopwatch.layout(), stopwatch.colors());

        let watch = self.drivers.stopwatch();
        ui.horizontal(|ui| {
            let run = if watch.is_running() { "stop" } else { "start" };
            if ui.add(PanelButton::new(run)).clicked() {
                self.toggle_stopwatch();
            }
            if ui.add_enabled(watch.can_reset(), PanelButton::new("reset")).clicked() {
                self.reset_stopwatch();
            }
            let tick = Self::granularity_button(self.scene.stopwatch.granularity());
            if ui.add(PanelButton::new(tick)).clicked() {
                self.toggle_granularity(TimepieceKind::Stopwatch);
            }
        });
    }

    fn draw_bounce_panel(&mut self, ui: &mut egui::Ui) {
        self.roles.heading(ui, Role::Bounce);
        let (rect, response) = Self::canvas(ui, Sense::click());
        self.scene.observe_field_viewport(viewport_of(rect));
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let p = to_panel(rect, pos);
                self.scene.spawn_bouncer(p.x, p.y);
            }
        }
        ui.painter().rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Palette::INK));
        paint_field(ui.painter(), rect, &self.scene.field, self.roles.bouncer);

        ui.horizontal(|ui| {
            let paused = self.drivers.is_paused(DriverKind::Bounce);
            let freeze = if paused { "unfreeze" } else { "freeze" };
            if ui.add(PanelButton::new(freeze).latched(paused)).clicked() {
                self.toggle_driver(DriverKind::Bounce);
            }
        });
    }

    fn draw_about(&mut self, ctx: &Context) {
        if !self.show_about {
            return;
        }
        egui::Window::new("about chronobounce")
            .collapsible(false)
            .resizable(false)
            .default_width(260.0)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.heading("chronobounce");
                    ui.label(concat!("version ", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label("analog clock, stopwatch and bouncing balls");
                    ui.label("click the bounce panel to add a ball");
                    ui.label("space starts and stops the stopwatch");
                    ui.add_space(12.0);
                    if ui.add(PanelButton::new("ok")).clicked() {
                        self.show_about = false;
                    }
                    ui.add_space(4.0);
                });
            });
    }
}

impl eframe::App for ChronoBounceApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        if ctx.input(|i| i.key_pressed(Key::Space) && !i.modifiers.command) {
            self.toggle_stopwatch();
        }

        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("drivers", |ui| {
                    for kind in [DriverKind::Clock, DriverKind::Stopwatch, DriverKind::Bounce] {
                        let mut running = !self.drivers.is_paused(kind);
                        if ui.checkbox(&mut running, kind.name()).changed() {
                            self.toggle_driver(kind);
                        }
                    }
                });
                ui.menu_button("help", |ui| {
                    if ui.button("about").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} balls", self.scene.field.len()));
                ui.separator();
                ui.label(format!("clock {}", self.scene.clock.granularity()));
                ui.separator();
                ui.monospace(Self::format_stopwatch(self.drivers.stopwatch().elapsed()));
                ui.label(self.scene.stopwatch.granularity().to_string());
            });
        });

        CentralPanel::default().show(ctx, |ui| {
            ui.columns(3, |cols| {
                self.draw_clock_panel(&mut cols[0]);
                self.draw_stopwatch_panel(&mut cols[1]);
                self.draw_bounce_panel(&mut cols[2]);
            });
        });

        self.draw_about(ctx);
    }
}

impl Drop for ChronoBounceApp {
    fn drop(&mut self) {
        log::info!("window closing, stopping drivers");
        self.drivers.shutdown();
    }
}
