// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Form schemas composed from the shared rules.

pub mod post;

pub use post::PostSchema;
