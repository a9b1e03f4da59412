// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Labelled form inputs with helper text and inline errors.
//!
//! Each widget takes the current value and returns the edited value only when
//! the user changed it, so callers can turn edits into messages.

use eframe::egui;

/// Presentation shared by every field kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldProps<'a> {
    pub label: &'a str,
    pub placeholder: &'a str,
    pub required: bool,
    pub helper_text: Option<&'a str>,
    /// First validation error for the field, if any.
    pub error: Option<&'a str>,
}

impl<'a> FieldProps<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn helper_text(mut self, text: &'a str) -> Self {
        self.helper_text = Some(text);
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

/// Label with a required marker, e.g. `Title *`.
pub fn label_text(label: &str, required: bool) -> String {
    if required {
        format!("{label} *")
    } else {
        label.to_string()
    }
}

pub fn text_field(ui: &mut egui::Ui, props: FieldProps<'_>, value: &str) -> Option<String> {
    let mut buffer = value.to_string();
    let changed = field_frame(ui, props, |ui| {
        ui.add(
            egui::TextEdit::singleline(&mut buffer)
                .hint_text(props.placeholder)
                .desired_width(f32::INFINITY),
        )
        .changed()
    });
    changed.then_some(buffer)
}

pub fn textarea_field(
    ui: &mut egui::Ui,
    props: FieldProps<'_>,
    value: &str,
    rows: usize,
) -> Option<String> {
    let mut buffer = value.to_string();
    let changed = field_frame(ui, props, |ui| {
        ui.add(
            egui::TextEdit::multiline(&mut buffer)
                .hint_text(props.placeholder)
                .desired_rows(rows)
                .desired_width(f32::INFINITY),
        )
        .changed()
    });
    changed.then_some(buffer)
}

/// Horizontal radio group over `options` (value, label).
pub fn radio_field<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    props: FieldProps<'_>,
    current: T,
    options: &[(T, String)],
) -> Option<T> {
    let mut selected = current;
    field_frame(ui, props, |ui| {
        ui.horizontal(|ui| {
            for (value, label) in options {
                ui.radio_value(&mut selected, *value, label.as_str());
            }
        });
        false
    });
    (selected != current).then_some(selected)
}

/// Checkbox with its label inline; error and helper text render below.
pub fn checkbox_field(ui: &mut egui::Ui, props: FieldProps<'_>, checked: bool) -> Option<bool> {
    let mut value = checked;
    let changed = ui
        .checkbox(&mut value, label_text(props.label, props.required))
        .changed();
    render_footer(ui, props);
    changed.then_some(value)
}

fn field_frame(
    ui: &mut egui::Ui,
    props: FieldProps<'_>,
    input: impl FnOnce(&mut egui::Ui) -> bool,
) -> bool {
    ui.label(egui::RichText::new(label_text(props.label, props.required)).strong());
    ui.add_space(2.0);
    let changed = input(ui);
    render_footer(ui, props);
    changed
}

fn render_footer(ui: &mut egui::Ui, props: FieldProps<'_>) {
    if let Some(helper) = props.helper_text {
        ui.label(
            egui::RichText::new(helper)
                .small()
                .color(egui::Color32::from_gray(110)),
        );
    }
    if let Some(error) = props.error {
        let color = ui.visuals().error_fg_color;
        ui.label(egui::RichText::new(error).small().color(color));
    }
}
