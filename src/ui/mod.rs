// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Top-level egui application shell.
//! Handles layout, navigation and wiring of page views to the MVU kernel.

pub mod components;
pub mod pages;

use eframe::egui;

use crate::mvu::{self, AppModel, Command, Msg};
use crate::routes::Route;
use crate::ui::components::{language_switcher, post_form};

/// Stateful egui application hosting the routed pages.
pub struct FormStarterApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl FormStarterApp {
    /// Spawn command workers and wrap `model`.
    pub fn new(model: AppModel) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().clamp(2, 4))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model,
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for FormStarterApp {
    /// Drain worker results, apply queued messages, then render the top bar,
    /// error modal and current page. Views push new messages into the inbox
    /// for the next frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);
        self.process_messages();

        // Keep polling while workers are busy so results show without input.
        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(self.model.translator.t("app.title"));
                ui.separator();
                self.render_nav(ui);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                    ui.separator();
                    self.render_language_switcher(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_max_width(720.0);
                self.render_page(ui);
            });
        });
    }

    /// Required by eframe 0.34; all rendering happens in `update`, which
    /// eframe still invokes right before `ui` each frame.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}
}

impl FormStarterApp {
    /// Collect worker results, then apply the inbox in arrival order and
    /// dispatch the resulting commands.
    fn process_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        for msg in std::mem::take(&mut self.inbox) {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
    }

    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    fn render_language_switcher(&mut self, ui: &mut egui::Ui) {
        let t = &self.model.translator;
        if let Some(locale) = language_switcher::view(ui, t.locale(), &t.t("language.label")) {
            self.inbox.push(Msg::SetLocale(locale));
        }
    }

    /// Navigation buttons; the active route is highlighted.
    fn render_nav(&mut self, ui: &mut egui::Ui) {
        for route in Route::NAV {
            let icon = match route {
                Route::Post => egui_phosphor::regular::NOTE_PENCIL,
                _ => egui_phosphor::regular::HOUSE,
            };
            let label = format!("{icon} {}", self.model.translator.t(route.nav_key()));
            let button = egui::Button::new(label).selected(self.model.route == route);
            if ui.add(button).clicked() && self.model.route != route {
                self.inbox.push(Msg::Navigate(route));
            }
        }
    }

    fn render_page(&mut self, ui: &mut egui::Ui) {
        let t = &self.model.translator;
        match &self.model.route {
            Route::Home => {
                if let Some(route) = pages::home(ui, t) {
                    self.inbox.push(Msg::Navigate(route));
                }
            }
            Route::Post => {
                let msgs = post_form::view(ui, &self.model.post_form, t);
                self.inbox.extend(msgs.into_iter().map(Msg::PostForm));
            }
            Route::NotFound(path) => {
                if let Some(route) = pages::not_found(ui, t, path) {
                    self.inbox.push(Msg::Navigate(route));
                }
            }
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new(self.model.translator.t("form.error"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }
}
