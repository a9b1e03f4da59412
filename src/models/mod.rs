// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Domain layer: pure data types shared between the form UI and validation.

pub mod post;

pub use post::{PostDraft, RawPostInput, Visibility};
