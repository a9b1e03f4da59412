// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Side-effecting business logic invoked from MVU commands.

pub mod post_api;
