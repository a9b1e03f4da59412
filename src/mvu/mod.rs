// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::config::AppConfig;
use crate::i18n::{Locale, Translator};
use crate::logic::post_api;
use crate::models::post::PostDraft;
use crate::routes::Route;
use crate::ui::components::post_form::{self, PostFormCommand, PostFormModel, PostFormMsg};

/// Top-level application state.
pub struct AppModel {
    /// Page currently shown in the central panel.
    pub route: Route,
    /// Active translator, also injected into form validation.
    pub translator: Translator,
    /// Settings as loaded; locale changes are written back.
    pub config: AppConfig,
    /// Where `config` is persisted.
    pub config_path: PathBuf,
    /// Post creation form state.
    pub post_form: PostFormModel,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Result<Self> {
        let translator = Translator::new(config.locale)?;
        let route = Route::resolve(&config.start_path);
        if let Route::NotFound(path) = &route {
            tracing::warn!(path = %path, "unknown start path");
        }
        Ok(Self {
            route,
            translator,
            config,
            config_path,
            post_form: PostFormModel::default(),
            error: None,
            pending_commands: 0,
        })
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    Navigate(Route),
    SetLocale(Locale),
    ConfigSaved(Result<PathBuf, String>),
    DismissError,
    PostForm(PostFormMsg),
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    SubmitPost { draft: PostDraft, delay: Duration },
    SaveConfig { config: AppConfig, path: PathBuf },
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Navigate(route) => {
            tracing::debug!(from = %model.route, to = %route, "navigate");
            model.route = route;
        }
        Msg::SetLocale(locale) => {
            if locale == model.translator.locale() {
                return;
            }
            model.translator.set_locale(locale);
            model.config.locale = locale;
            cmds.push(Command::SaveConfig {
                config: model.config.clone(),
                path: model.config_path.clone(),
            });
        }
        Msg::ConfigSaved(result) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "failed to save settings");
                model.error = Some(err);
            }
        }
        Msg::DismissError => model.error = None,
        Msg::PostForm(m) => {
            let mut form_cmds = Vec::new();
            post_form::update(
                &mut model.post_form,
                m,
                &model.translator,
                &model.config.timezone,
                &mut form_cmds,
            );
            for c in form_cmds {
                match c {
                    PostFormCommand::Submit(draft) => cmds.push(Command::SubmitPost {
                        draft,
                        delay: Duration::from_millis(model.config.submit_delay_ms),
                    }),
                }
            }
        }
    }
}

/// Execute a command (on a worker thread) and return a resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::SubmitPost { draft, delay } => {
            let result = post_api::submit_post_with_delay(&draft, delay);
            Msg::PostForm(PostFormMsg::SubmitCompleted(result))
        }
        Command::SaveConfig { config, path } => {
            let result = config
                .save_to(&path)
                .map(|_| path)
                .map_err(|err| format!("{err:#}"));
            Msg::ConfigSaved(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::post::Visibility;
    use tempfile::TempDir;

    fn model_in(dir: &TempDir) -> AppModel {
        let config = AppConfig {
            timezone: "UTC".into(),
            submit_delay_ms: 0,
            ..Default::default()
        };
        AppModel::new(config, dir.path().join("formstarter.json")).unwrap()
    }

    fn drain(model: &mut AppModel, mut cmds: Vec<Command>) {
        while let Some(cmd) = cmds.pop() {
            let msg = run_command(cmd);
            update(model, msg, &mut cmds);
        }
    }

    fn send(model: &mut AppModel, msg: Msg) -> Vec<Command> {
        let mut cmds = Vec::new();
        update(model, msg, &mut cmds);
        cmds
    }

    #[test]
    fn navigation_changes_route_only() {
        let tmp = TempDir::new().unwrap();
        let mut model = model_in(&tmp);
        assert_eq!(model.route, Route::Home);
        let cmds = send(&mut model, Msg::Navigate(Route::Post));
        assert!(cmds.is_empty());
        assert_eq!(model.route, Route::Post);
    }

    #[test]
    fn post_submit_enqueues_and_completes() {
        let tmp = TempDir::new().unwrap();
        let mut model = model_in(&tmp);
        for msg in [
            PostFormMsg::TitleChanged("My Post".into()),
            PostFormMsg::DescriptionChanged("A draft".into()),
            PostFormMsg::VisibilityChanged(Visibility::Public),
            PostFormMsg::PublicIdChanged("my-post".into()),
        ] {
            assert!(send(&mut model, Msg::PostForm(msg)).is_empty());
        }

        let cmds = send(&mut model, Msg::PostForm(PostFormMsg::Submit));
        assert_eq!(cmds.len(), 1, "submit should enqueue command");
        assert!(matches!(
            &cmds[0],
            Command::SubmitPost { delay, .. } if delay.is_zero()
        ));
        assert!(model.post_form.is_submitting());

        drain(&mut model, cmds);
        assert!(!model.post_form.is_submitting());
        assert!(model.post_form.banner().is_some_and(|b| !b.is_error));
        assert!(model.error.is_none());
    }

    #[test]
    fn invalid_post_does_not_enqueue() {
        let tmp = TempDir::new().unwrap();
        let mut model = model_in(&tmp);
        let cmds = send(&mut model, Msg::PostForm(PostFormMsg::Submit));
        assert!(cmds.is_empty());
        assert!(model.post_form.error("title").is_some());
    }

    #[test]
    fn locale_change_is_persisted() {
        let tmp = TempDir::new().unwrap();
        let mut model = model_in(&tmp);

        let cmds = send(&mut model, Msg::SetLocale(Locale::Ja));
        assert_eq!(cmds.len(), 1);
        assert_eq!(model.translator.locale(), Locale::Ja);
        assert_eq!(model.translator.t("nav.home"), "ホーム");

        drain(&mut model, cmds);
        assert!(model.error.is_none());
        let saved = AppConfig::load_from(&model.config_path).unwrap();
        assert_eq!(saved.locale, Locale::Ja);
    }

    #[test]
    fn selecting_current_locale_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        let mut model = model_in(&tmp);
        assert!(send(&mut model, Msg::SetLocale(Locale::En)).is_empty());
    }

    #[test]
    fn failed_save_surfaces_error() {
        let tmp = TempDir::new().unwrap();
        let mut model = model_in(&tmp);
        // A directory cannot be overwritten with a file.
        model.config_path = tmp.path().to_path_buf();

        let cmds = send(&mut model, Msg::SetLocale(Locale::Ja));
        drain(&mut model, cmds);
        assert!(model.error.is_some());

        send(&mut model, Msg::DismissError);
        assert!(model.error.is_none());
    }

    #[test]
    fn start_path_selects_initial_route() {
        let tmp = TempDir::new().unwrap();
        let model_at = |start: &str| {
            let config = AppConfig {
                start_path: start.into(),
                ..Default::default()
            };
            AppModel::new(config, tmp.path().join("formstarter.json")).unwrap()
        };
        assert_eq!(model_at("/").route, Route::Home);
        assert_eq!(model_at("/post/").route, Route::Post);
        assert_eq!(model_at("/missing").route, Route::NotFound("/missing".into()));
    }
}
