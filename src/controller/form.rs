use crate::dom::{Element, Window};
use crate::error::{RelayError, SubmitBlocked};
use crate::i18n::{Language, LanguageStrings};
use crate::relay::{ContactMessage, TemplateParams};
use crate::schedule::Scheduler;
use crate::validation::FieldRule;
use std::time::Duration;
use tracing::{info, warn};

/// One input of the contact form with its inline error message.
#[derive(Debug, Clone)]
pub struct ContactField<E> {
    /// Form name (`name`, `email`, `subject`, `message`)
    pub name: &'static str,
    pub input: E,
    pub error: Option<E>,
    pub rule: FieldRule,
}

impl<E: Element> ContactField<E> {
    pub fn new(name: &'static str, input: E, error: Option<E>) -> Self {
        Self {
            rule: FieldRule::for_input(&input),
            name,
            input,
            error,
        }
    }

    /// The platform's constraint validation decides when it exists; the
    /// markup-derived rule stands in for it otherwise.
    pub fn is_valid(&self) -> bool {
        self.input
            .native_validity()
            .unwrap_or_else(|| self.rule.check(&self.input.value()).is_ok())
    }

    fn show_validity(&self, valid: bool) {
        self.input.toggle_class("error", !valid);
        if let Some(error) = &self.error {
            error.set_style("display", if valid { "none" } else { "block" });
        }
    }
}

/// A submission that passed validation and is waiting on the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmit {
    pub params: TemplateParams,
    /// Submit control markup before it switched to "sending"
    original_label: String,
}

/// Contact form: inline validation and the submit control's lifecycle.
pub struct FormController<E> {
    fields: Vec<ContactField<E>>,
    submit: Option<E>,
    status: Option<E>,
}

impl<E: Element> FormController<E> {
    pub fn new(fields: Vec<ContactField<E>>, submit: Option<E>, status: Option<E>) -> Self {
        Self {
            fields,
            submit,
            status,
        }
    }

    pub fn fields(&self) -> &[ContactField<E>] {
        &self.fields
    }

    /// Re-check field `index` after an input or blur event.
    pub fn validate_field(&self, index: usize) -> bool {
        let Some(field) = self.fields.get(index) else {
            return true;
        };
        let valid = field.is_valid();
        field.show_validity(valid);
        valid
    }

    /// Check every field, returning the names of the invalid ones.
    pub fn validate_all(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|field| {
                let valid = field.is_valid();
                field.show_validity(valid);
                !valid
            })
            .map(|field| field.name)
            .collect()
    }

    fn value_of(&self, name: &str) -> String {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.input.value())
            .unwrap_or_default()
    }

    /// Validate and, if the form may be sent, switch the submit control to
    /// its "sending" state.
    pub fn begin_submit(&self, language: Language, to_email: &str) -> Result<PendingSubmit, SubmitBlocked> {
        if self.fields.is_empty() {
            return Err(SubmitBlocked::NoForm);
        }
        if self.submit.as_ref().is_some_and(|s| s.is_disabled()) {
            return Err(SubmitBlocked::InFlight);
        }

        let invalid = self.validate_all();
        if !invalid.is_empty() {
            info!("Contact form blocked, invalid fields: {:?}", invalid);
            return Err(SubmitBlocked::Invalid(invalid));
        }

        let message = ContactMessage {
            name: self.value_of("name"),
            email: self.value_of("email"),
            subject: self.value_of("subject"),
            message: self.value_of("message"),
        };

        let original_label = match &self.submit {
            Some(submit) => {
                let label = submit.inner_html();
                show_sending(submit, language);
                submit.set_disabled(true);
                label
            }
            None => String::new(),
        };

        Ok(PendingSubmit {
            params: TemplateParams::new(message, to_email),
            original_label,
        })
    }

    /// Report the relay outcome and restore the submit control.
    pub fn finish_submit(
        &self,
        pending: PendingSubmit,
        outcome: &Result<(), RelayError>,
        language: Language,
        window: &dyn Window,
        scheduler: &dyn Scheduler,
        status_hide: Duration,
    ) {
        let strings = LanguageStrings::for_language(language);
        match outcome {
            Ok(()) => {
                info!("Contact message sent");
                self.show_status("success", strings.send_success);
                window.alert(strings.send_success);
                self.reset();
                if let Some(status) = self.status.clone() {
                    scheduler.set_timeout(
                        status_hide,
                        Box::new(move || status.set_style("display", "none")),
                    );
                }
            }
            Err(e) => {
                warn!("Contact message failed: {}", e);
                self.show_status("error", strings.send_failure);
                window.alert(strings.send_failure);
            }
        }

        if let Some(submit) = &self.submit {
            submit.set_inner_html(&pending.original_label);
            submit.set_disabled(false);
        }
    }

    fn show_status(&self, kind: &str, text: &str) {
        if let Some(status) = &self.status {
            status.set_class_name(&format!("form-status {}", kind));
            status.set_text(text);
            status.set_style("display", "block");
        }
    }

    fn reset(&self) {
        for field in &self.fields {
            field.input.set_value("");
            field.show_validity(true);
        }
    }
}

/// Spinner plus a label carrying every translation, so a language switch
/// mid-flight retranslates it like the rest of the page.
fn show_sending<E: Element>(submit: &E, language: Language) {
    submit.set_text("");
    if let Some(spinner) = submit.append_new("i") {
        spinner.set_class_name("fas fa-spinner fa-spin");
    }
    if let Some(label) = submit.append_new("span") {
        for lang in Language::enabled() {
            label.set_attr(&lang.text_attr(), LanguageStrings::for_language(lang).sending);
        }
        label.set_text(LanguageStrings::for_language(language).sending);
    }
}
