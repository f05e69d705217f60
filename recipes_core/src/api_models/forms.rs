use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};


/// Name of the form field carrying a confirmation token on delete forms.
pub const CONFIRMATION_TOKEN_FIELD_NAME: &str = "_token";


#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct FormFieldError {
    /// Machine-readable error code, e.g. `length` or `not_blank`.
    pub code: String,

    pub message: Option<String>,
}

impl FormFieldError {
    pub fn new<C>(code: C) -> Self
    where
        C: Into<String>,
    {
        Self {
            code: code.into(),
            message: None,
        }
    }

    pub fn with_message<C, M>(code: C, message: M) -> Self
    where
        C: Into<String>,
        M: Into<String>,
    {
        Self {
            code: code.into(),
            message: Some(message.into()),
        }
    }
}

impl From<&ValidationError> for FormFieldError {
    fn from(value: &ValidationError) -> Self {
        Self {
            code: value.code.to_string(),
            message: value.message.as_ref().map(|message| message.to_string()),
        }
    }
}



/// Validation errors of a submitted form, keyed by field name.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[serde(transparent)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<FormFieldError>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_validation_errors(validation_errors: &ValidationErrors) -> Self {
        let mut errors = Self::new();

        for (field_name, field_errors) in validation_errors.field_errors() {
            for field_error in field_errors.iter() {
                errors.add(field_name.to_string(), FormFieldError::from(field_error));
            }
        }

        errors
    }

    pub fn add<F>(&mut self, field_name: F, error: FormFieldError)
    where
        F: Into<String>,
    {
        self.fields.entry(field_name.into()).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, field_name: &str) -> Option<&[FormFieldError]> {
        self.fields.get(field_name).map(Vec::as_slice)
    }
}



/// Everything a client needs to render a form: where and how to submit it,
/// the current values, and any validation errors from a previous submission.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct FormView<V> {
    pub name: String,

    /// HTTP method the form must be submitted with.
    pub method: String,

    /// Path the form must be submitted to.
    pub action: String,

    pub submitted: bool,

    pub values: V,

    pub errors: FormErrors,
}

impl<V> FormView<V> {
    pub fn new<N, M, A>(name: N, method: M, action: A, values: V) -> Self
    where
        N: Into<String>,
        M: Into<String>,
        A: Into<String>,
    {
        Self {
            name: name.into(),
            method: method.into(),
            action: action.into(),
            submitted: false,
            values,
            errors: FormErrors::new(),
        }
    }

    pub fn with_submission_errors(mut self, errors: FormErrors) -> Self {
        self.submitted = true;
        self.errors = errors;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}



/// Contents of a delete confirmation form. The form has no fields
/// other than the confirmation token.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct DeleteConfirmationFormData {
    #[serde(default, rename = "_token")]
    pub token: String,
}



/// Rejects values that are empty or contain only whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank")
            .with_message(Cow::from("This value should not be blank.")));
    }

    Ok(())
}



#[cfg(test)]
mod test {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct ExampleForm {
        #[validate(
            length(min = 3, max = 5, message = "between 3 and 5 characters"),
            custom(function = "not_blank")
        )]
        title: String,
    }

    #[test]
    fn collects_field_errors_from_validator() {
        let form = ExampleForm {
            title: "  ".to_string(),
        };

        let validation_errors = form.validate().unwrap_err();
        let errors = FormErrors::from_validation_errors(&validation_errors);

        let title_errors = errors.field("title").unwrap();
        let codes = title_errors
            .iter()
            .map(|error| error.code.as_str())
            .collect::<Vec<_>>();

        assert!(codes.contains(&"length"));
        assert!(codes.contains(&"not_blank"));
    }

    #[test]
    fn form_view_becomes_invalid_with_errors() {
        let view = FormView::new("category", "POST", "/category/create", ());
        assert!(view.is_valid());
        assert!(!view.submitted);

        let mut errors = FormErrors::new();
        errors.add("title", FormFieldError::new("length"));

        let view = view.with_submission_errors(errors);
        assert!(!view.is_valid());
        assert!(view.submitted);
    }

    #[test]
    fn confirmation_token_uses_underscored_field_name() {
        let form: DeleteConfirmationFormData =
            serde_json::from_str(r#"{ "_token": "abc" }"#).unwrap();
        assert_eq!(form.token, "abc");

        let empty_form: DeleteConfirmationFormData = serde_json::from_str("{}").unwrap();
        assert!(empty_form.token.is_empty());

        assert_eq!(CONFIRMATION_TOKEN_FIELD_NAME, "_token");
    }
}
