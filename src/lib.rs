// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Desktop form starter: routed pages, conditional post validation with
//! localized messages, and date/file helpers.

pub mod app;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod logic;
pub mod models;
pub mod mvu;
pub mod routes;
pub mod ui;
pub mod utils;
pub mod validation;
