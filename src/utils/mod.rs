// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Shared helper utilities reused by UI and business logic.

pub mod date;
pub mod file;

/// Default timezone for date helpers.
pub use date::DEFAULT_TIMEZONE;
/// Coarse file family returned by [`file::classify_path`].
pub use file::FileKind;
