// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

use anyhow::Result;

use formstarter::config::AppConfig;
use formstarter::{app, logging};

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(config.log_format)?;
    tracing::info!(
        path = %AppConfig::path().display(),
        locale = %config.locale,
        timezone = %config.timezone,
        "config loaded"
    );
    app::run(config)
}
