// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Static pages. Each returns a route when the user asks to navigate.

use eframe::egui;

use crate::i18n::Translator;
use crate::routes::Route;
use crate::validation::MessageParams;

pub fn home(ui: &mut egui::Ui, t: &Translator) -> Option<Route> {
    let mut target = None;
    ui.vertical_centered(|ui| {
        ui.add_space(32.0);
        ui.heading(egui::RichText::new(t.t("home.title")).size(28.0));
        ui.add_space(8.0);
        ui.label(egui::RichText::new(t.t("home.description")).color(egui::Color32::from_gray(110)));
        ui.add_space(16.0);
        let label = format!("{} {}", egui_phosphor::regular::PENCIL_SIMPLE, t.t("home.getStarted"));
        if ui.button(label).clicked() {
            target = Some(Route::Post);
        }
    });
    target
}

pub fn not_found(ui: &mut egui::Ui, t: &Translator, path: &str) -> Option<Route> {
    let mut target = None;
    ui.vertical_centered(|ui| {
        ui.add_space(32.0);
        ui.heading(egui::RichText::new(format!("404 · {}", t.t("notFound.title"))).size(28.0));
        ui.add_space(8.0);
        let description =
            t.t_with("notFound.description", &MessageParams::new().with("path", path));
        ui.label(egui::RichText::new(description).color(egui::Color32::from_gray(110)));
        ui.add_space(16.0);
        let label = format!("{} {}", egui_phosphor::regular::HOUSE, t.t("notFound.backHome"));
        if ui.button(label).clicked() {
            target = Some(Route::Home);
        }
    });
    target
}
