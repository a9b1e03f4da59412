// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Post creation form in MVU shape.
//!
//! Validation runs only on submit. Editing a field clears that field's
//! error; the public ID input is shown (and validated) only for public posts.

use std::collections::BTreeMap;

use eframe::egui;

use crate::logic::post_api::SubmitReceipt;
use crate::models::post::{PostDraft, RawPostInput, Visibility};
use crate::utils::date::{self, DateFormat};
use crate::validation::schema::post::fields;
use crate::validation::{ApiError, MessageLookup, MessageParams, PostSchema, ValidationMessages};

use super::form_field::{self, FieldProps};

/// Form values, per-field errors and submission state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostFormModel {
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
    pub public_id: String,
    errors: BTreeMap<String, String>,
    submitting: bool,
    banner: Option<Banner>,
}

/// Outcome message shown above the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub is_error: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostFormMsg {
    TitleChanged(String),
    DescriptionChanged(String),
    VisibilityChanged(Visibility),
    PublicIdChanged(String),
    Submit,
    Cancel,
    SubmitCompleted(Result<SubmitReceipt, Vec<ApiError>>),
    DismissBanner,
}

/// Side effects requested by the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostFormCommand {
    Submit(PostDraft),
}

impl PostFormModel {
    /// Candidate built from the current values.
    pub fn to_input(&self) -> RawPostInput {
        RawPostInput::new(
            self.title.as_str(),
            self.description.as_str(),
            self.visibility.as_str(),
            Some(self.public_id.clone()),
        )
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn shows_public_id(&self) -> bool {
        self.visibility == Visibility::Public
    }

    fn reset_values(&mut self) {
        self.title.clear();
        self.description.clear();
        self.visibility = Visibility::default();
        self.public_id.clear();
        self.errors.clear();
    }
}

/// Apply a message to the form.
///
/// `lookup` renders validation and outcome messages; `timezone` is used for
/// the submission time in the success banner.
pub fn update<L: MessageLookup>(
    model: &mut PostFormModel,
    msg: PostFormMsg,
    lookup: &L,
    timezone: &str,
    cmds: &mut Vec<PostFormCommand>,
) {
    match msg {
        PostFormMsg::TitleChanged(text) => {
            model.title = text;
            model.errors.remove(fields::TITLE);
        }
        PostFormMsg::DescriptionChanged(text) => {
            model.description = text;
            model.errors.remove(fields::DESCRIPTION);
        }
        PostFormMsg::VisibilityChanged(visibility) => {
            model.visibility = visibility;
            model.errors.remove(fields::VISIBILITY);
            if visibility == Visibility::Private {
                model.errors.remove(fields::PUBLIC_ID);
            }
        }
        PostFormMsg::PublicIdChanged(text) => {
            model.public_id = text;
            model.errors.remove(fields::PUBLIC_ID);
        }
        PostFormMsg::Submit => submit(model, lookup, cmds),
        PostFormMsg::Cancel => {
            model.reset_values();
            model.banner = None;
        }
        PostFormMsg::SubmitCompleted(result) => {
            model.submitting = false;
            match result {
                Ok(receipt) => {
                    model.reset_values();
                    model.banner = Some(Banner {
                        message: success_message(lookup, &receipt, timezone),
                        is_error: false,
                    });
                }
                Err(errors) => apply_api_errors(model, &errors, lookup),
            }
        }
        PostFormMsg::DismissBanner => model.banner = None,
    }
}

fn submit<L: MessageLookup>(
    model: &mut PostFormModel,
    lookup: &L,
    cmds: &mut Vec<PostFormCommand>,
) {
    if model.submitting {
        return;
    }
    model.banner = None;
    let schema = PostSchema::new(lookup).with_public_id_format();
    match schema.validate(&model.to_input()) {
        Ok(draft) => {
            match serde_json::to_string(&draft) {
                Ok(json) => tracing::info!(payload = %json, "submitting post"),
                Err(err) => tracing::warn!(error = %err, "failed to serialize post draft"),
            }
            model.errors.clear();
            model.submitting = true;
            cmds.push(PostFormCommand::Submit(draft));
        }
        Err(failure) => {
            tracing::debug!(fields = failure.issues().len(), "post form rejected");
            model.errors = failure.field_errors();
        }
    }
}

fn apply_api_errors<L: MessageLookup>(model: &mut PostFormModel, errors: &[ApiError], lookup: &L) {
    let messages = ValidationMessages::new(lookup);
    let mut form_level = None;
    for error in errors {
        // Codes are catalog keys; unknown ones fall back to the server text.
        let text = match &error.code {
            Some(code) if lookup.has_template(code) => lookup.lookup(code, &MessageParams::new()),
            _ => messages.api_error(Some(error.message.as_str())),
        };
        match &error.field {
            Some(field) => {
                model.errors.insert(field.clone(), text);
            }
            None => form_level = Some(text),
        }
    }
    if errors.is_empty() {
        form_level = Some(messages.api_error(None));
    }
    model.banner = form_level.map(|message| Banner {
        message,
        is_error: true,
    });
}

fn success_message<L: MessageLookup>(
    lookup: &L,
    receipt: &SubmitReceipt,
    timezone: &str,
) -> String {
    let headline = lookup.lookup("post.createSuccess", &MessageParams::new());
    match date::format_date(receipt.accepted_at, DateFormat::DisplayDateTime, timezone) {
        Ok(time) => {
            let when = lookup.lookup("post.submittedAt", &MessageParams::new().with("time", time));
            format!("{headline} · {when}")
        }
        Err(err) => {
            tracing::warn!(error = %err, timezone, "could not format submission time");
            headline
        }
    }
}

/// Render the form. `t` translates UI copy.
pub fn view<L: MessageLookup>(ui: &mut egui::Ui, model: &PostFormModel, t: &L) -> Vec<PostFormMsg> {
    let mut msgs = Vec::new();
    let tr = |key: &str| t.lookup(key, &MessageParams::new());

    ui.heading(tr("post.create"));
    ui.add_space(8.0);

    if let Some(banner) = &model.banner {
        render_banner(ui, banner, &mut msgs);
        ui.add_space(8.0);
    }

    let title_label = tr("post.title");
    if let Some(text) = form_field::text_field(
        ui,
        FieldProps::new(&title_label)
            .required()
            .placeholder(&title_label)
            .error(model.error(fields::TITLE)),
        &model.title,
    ) {
        msgs.push(PostFormMsg::TitleChanged(text));
    }
    ui.add_space(10.0);

    let description_label = tr("post.description");
    if let Some(text) = form_field::textarea_field(
        ui,
        FieldProps::new(&description_label)
            .required()
            .placeholder(&description_label)
            .error(model.error(fields::DESCRIPTION)),
        &model.description,
        5,
    ) {
        msgs.push(PostFormMsg::DescriptionChanged(text));
    }
    ui.add_space(10.0);

    let options: Vec<(Visibility, String)> = Visibility::ALL
        .iter()
        .map(|v| (*v, tr(&format!("post.{}", v.as_str()))))
        .collect();
    let visibility_label = tr("post.visibility");
    if let Some(visibility) = form_field::radio_field(
        ui,
        FieldProps::new(&visibility_label)
            .required()
            .error(model.error(fields::VISIBILITY)),
        model.visibility,
        &options,
    ) {
        msgs.push(PostFormMsg::VisibilityChanged(visibility));
    }

    if model.shows_public_id() {
        ui.add_space(10.0);
        let public_id_label = tr("post.publicId");
        let helper = tr("post.publicIdHelper");
        if let Some(text) = form_field::text_field(
            ui,
            FieldProps::new(&public_id_label)
                .required()
                .placeholder("my-awesome-post")
                .helper_text(&helper)
                .error(model.error(fields::PUBLIC_ID)),
            &model.public_id,
        ) {
            msgs.push(PostFormMsg::PublicIdChanged(text));
        }
    }

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        let submit_label = if model.submitting {
            tr("form.loading")
        } else {
            format!("{} {}", egui_phosphor::regular::PAPER_PLANE_TILT, tr("form.submit"))
        };
        if ui
            .add_enabled(!model.submitting, egui::Button::new(submit_label))
            .clicked()
        {
            msgs.push(PostFormMsg::Submit);
        }
        if ui.button(tr("form.cancel")).clicked() {
            msgs.push(PostFormMsg::Cancel);
        }
        if model.submitting {
            ui.add(egui::Spinner::new().size(14.0));
        }
    });

    msgs
}

fn render_banner(ui: &mut egui::Ui, banner: &Banner, msgs: &mut Vec<PostFormMsg>) {
    let (icon, color) = if banner.is_error {
        (egui_phosphor::regular::WARNING_CIRCLE, ui.visuals().error_fg_color)
    } else {
        (
            egui_phosphor::regular::CHECK_CIRCLE,
            egui::Color32::from_rgb(46, 125, 50),
        )
    };
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("{icon} {}", banner.message)).color(color));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button(egui_phosphor::regular::X).clicked() {
                    msgs.push(PostFormMsg::DismissBanner);
                }
            });
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Locale, Translator};
    use crate::logic::post_api::{self, TAKEN_PUBLIC_ID};
    use std::time::Duration;

    const TZ: &str = "UTC";

    fn translator() -> Translator {
        Translator::new(Locale::En).unwrap()
    }

    fn send(model: &mut PostFormModel, msg: PostFormMsg) -> Vec<PostFormCommand> {
        let mut cmds = Vec::new();
        update(model, msg, &translator(), TZ, &mut cmds);
        cmds
    }

    fn filled(title: &str, visibility: Visibility, public_id: &str) -> PostFormModel {
        PostFormModel {
            title: title.into(),
            description: "A draft".into(),
            visibility,
            public_id: public_id.into(),
            ..Default::default()
        }
    }

    fn complete(model: &mut PostFormModel, cmds: Vec<PostFormCommand>) {
        for cmd in cmds {
            let PostFormCommand::Submit(draft) = cmd;
            let result = post_api::submit_post_with_delay(&draft, Duration::ZERO);
            send(model, PostFormMsg::SubmitCompleted(result));
        }
    }

    #[test]
    fn defaults_are_empty_and_private() {
        let model = PostFormModel::default();
        assert!(model.title.is_empty());
        assert_eq!(model.visibility, Visibility::Private);
        assert!(!model.shows_public_id());
        assert!(!model.is_submitting());
    }

    #[test]
    fn invalid_submit_sets_errors_without_command() {
        let mut model = PostFormModel::default();
        let cmds = send(&mut model, PostFormMsg::Submit);
        assert!(cmds.is_empty());
        assert!(!model.is_submitting());
        assert_eq!(model.error("title"), Some("Title is required"));
        assert_eq!(model.error("description"), Some("Description is required"));
        assert!(model.error("publicId").is_none());
    }

    #[test]
    fn public_without_id_reports_public_id_only() {
        let mut model = filled("My Post", Visibility::Public, "");
        let cmds = send(&mut model, PostFormMsg::Submit);
        assert!(cmds.is_empty());
        assert_eq!(model.errors().len(), 1);
        assert_eq!(model.error("publicId"), Some("Public ID is required"));
    }

    #[test]
    fn public_id_format_is_checked_in_the_form() {
        let mut model = filled("My Post", Visibility::Public, "not valid!");
        assert!(send(&mut model, PostFormMsg::Submit).is_empty());
        assert!(model.error("publicId").is_some());
    }

    #[test]
    fn private_ignores_stale_public_id() {
        let mut model = filled("My Post", Visibility::Private, "?? junk ??");
        let cmds = send(&mut model, PostFormMsg::Submit);
        assert_eq!(cmds.len(), 1);
        assert!(model.is_submitting());
    }

    #[test]
    fn editing_clears_only_that_field_error() {
        let mut model = PostFormModel::default();
        send(&mut model, PostFormMsg::Submit);
        send(&mut model, PostFormMsg::TitleChanged("My Post".into()));
        assert!(model.error("title").is_none());
        assert!(model.error("description").is_some());
    }

    #[test]
    fn switching_to_private_drops_public_id_error() {
        let mut model = filled("My Post", Visibility::Public, "");
        send(&mut model, PostFormMsg::Submit);
        assert!(model.error("publicId").is_some());
        send(&mut model, PostFormMsg::VisibilityChanged(Visibility::Private));
        assert!(model.error("publicId").is_none());
    }

    #[test]
    fn successful_submit_resets_and_shows_banner() {
        let mut model = filled("  My Post ", Visibility::Public, "my-post");
        let cmds = send(&mut model, PostFormMsg::Submit);
        assert_eq!(
            cmds,
            vec![PostFormCommand::Submit(PostDraft {
                title: "My Post".into(),
                description: "A draft".into(),
                visibility: Visibility::Public,
                public_id: Some("my-post".into()),
            })]
        );
        assert!(send(&mut model, PostFormMsg::Submit).is_empty(), "no double submit");

        complete(&mut model, cmds);
        assert!(!model.is_submitting());
        assert!(model.title.is_empty());
        assert_eq!(model.visibility, Visibility::Private);
        let banner = model.banner().unwrap();
        assert!(!banner.is_error);
        assert!(banner.message.starts_with("Post created successfully"));
        assert!(banner.message.contains("Submitted"));
    }

    #[test]
    fn api_errors_map_onto_fields() {
        let mut model = filled("Error handling", Visibility::Private, "");
        let cmds = send(&mut model, PostFormMsg::Submit);
        complete(&mut model, cmds);
        assert!(!model.is_submitting());
        assert_eq!(model.title, "Error handling", "values kept on failure");
        assert_eq!(model.error("title"), Some("Title cannot contain the word \"error\""));
        assert!(model.error("description").is_some());
        assert!(model.banner().is_none());
    }

    #[test]
    fn taken_public_id_is_reported_by_api() {
        let mut model = filled("My Post", Visibility::Public, TAKEN_PUBLIC_ID);
        let cmds = send(&mut model, PostFormMsg::Submit);
        complete(&mut model, cmds);
        assert_eq!(model.error("publicId"), Some("This public ID is already taken"));
    }

    #[test]
    fn fieldless_api_error_becomes_banner() {
        let mut model = filled("My Post", Visibility::Private, "");
        send(&mut model, PostFormMsg::Submit);
        send(
            &mut model,
            PostFormMsg::SubmitCompleted(Err(vec![ApiError {
                message: "Service unavailable".into(),
                field: None,
                code: None,
            }])),
        );
        let banner = model.banner().unwrap();
        assert!(banner.is_error);
        assert_eq!(banner.message, "Service unavailable");

        send(&mut model, PostFormMsg::SubmitCompleted(Err(Vec::new())));
        assert_eq!(
            model.banner().unwrap().message,
            "An error occurred while processing your request"
        );
    }

    #[test]
    fn unknown_api_code_shows_server_message() {
        let mut model = filled("My Post", Visibility::Private, "");
        send(&mut model, PostFormMsg::Submit);
        send(
            &mut model,
            PostFormMsg::SubmitCompleted(Err(vec![
                ApiError {
                    message: "Service unavailable".into(),
                    field: None,
                    code: Some("503".into()),
                },
                ApiError {
                    message: "taken".into(),
                    field: Some("publicId".into()),
                    code: Some(post_api::PUBLIC_ID_TAKEN.into()),
                },
            ])),
        );
        assert_eq!(model.banner().unwrap().message, "Service unavailable");
        assert_eq!(model.error("publicId"), Some("This public ID is already taken"));
    }

    #[test]
    fn cancel_resets_form() {
        let mut model = filled("My Post", Visibility::Public, "");
        send(&mut model, PostFormMsg::Submit);
        send(&mut model, PostFormMsg::Cancel);
        assert_eq!(model, PostFormModel::default());
    }

    #[test]
    fn messages_follow_active_locale() {
        let mut model = PostFormModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            PostFormMsg::Submit,
            &Translator::new(Locale::Ja).unwrap(),
            TZ,
            &mut cmds,
        );
        assert_eq!(model.error("title"), Some("Titleは必須です"));
    }
}
