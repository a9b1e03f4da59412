// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Reusable egui components structured for MVU-style updates.

pub mod form_field;
pub mod language_switcher;
pub mod post_form;

pub use form_field::FieldProps;
