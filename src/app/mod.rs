// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Application entry point wiring egui/eframe to launch the form starter UI.

use anyhow::{Result, anyhow};
use eframe::egui;
use egui_phosphor::Variant;

use crate::config::AppConfig;
use crate::mvu::AppModel;
use crate::ui::FormStarterApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: AppConfig) -> Result<()> {
    let model = AppModel::new(config, AppConfig::path())?;
    let title = model.translator.t("app.title");

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title(title.clone()),
        ..Default::default()
    };

    tracing::info!(locale = %model.translator.locale(), "starting UI");
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(FormStarterApp::new(model)))
        }),
    )
    .map_err(|err| anyhow!("UI terminated with an error: {err}"))
}
