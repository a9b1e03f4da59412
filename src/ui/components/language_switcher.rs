// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Locale selector for the top bar.

use eframe::egui;

use crate::i18n::Locale;

/// Render a combo box of locales by native name. Returns the new locale when changed.
pub fn view(ui: &mut egui::Ui, current: Locale, label: &str) -> Option<Locale> {
    let mut selected = current;
    egui::ComboBox::from_id_salt("language_switcher")
        .selected_text(format!(
            "{} {}",
            egui_phosphor::regular::TRANSLATE,
            current.native_name()
        ))
        .show_ui(ui, |ui| {
            for locale in Locale::ALL {
                ui.selectable_value(&mut selected, locale, locale.native_name());
            }
        })
        .response
        .on_hover_text(label);
    (selected != current).then_some(selected)
}
