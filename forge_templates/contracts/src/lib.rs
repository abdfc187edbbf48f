use forge_models::{
    contact::{ContactField, ContactForm, ContactFormErrors},
    notification::Notification,
};
use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

/// A page template together with the data it is rendered with.
///
/// Template names end in `.html`, so every interpolated value is escaped.
pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE: (&str, &str) = ("base.html", include_str!("../templates/base.html"));

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    HomeTemplate("home.html"),
    AboutTemplate("about.html"),
    ProgramsTemplate("programs.html"),
    ContactTemplate("contact.html"),
    ErrorTemplate("error.html"),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HomeTemplate {
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AboutTemplate {
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgramsTemplate {
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactTemplate {
    pub notification: Option<Notification>,
    pub csrf_token: String,
    pub form: ContactFormView,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorTemplate {
    pub notification: Option<Notification>,
    pub title: String,
    pub message: String,
}

/// Values and error messages of the contact form as shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFormView {
    pub values: ContactFormFields<String>,
    pub errors: ContactFormFields<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFormFields<T> {
    pub name: T,
    pub email: T,
    pub subject: T,
    pub message: T,
}

impl ContactFormView {
    /// The submitted values echoed back together with the validation errors.
    pub fn rejected(form: &ContactForm, errors: &ContactFormErrors) -> Self {
        let value = |field| form.get(field).unwrap_or_default().to_owned();
        Self {
            values: ContactFormFields {
                name: value(ContactField::Name),
                email: value(ContactField::Email),
                subject: value(ContactField::Subject),
                message: value(ContactField::Message),
            },
            errors: ContactFormFields {
                name: errors.messages(ContactField::Name),
                email: errors.messages(ContactField::Email),
                subject: errors.messages(ContactField::Subject),
                message: errors.messages(ContactField::Message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rejected_form() {
        // Arrange
        let form = ContactForm {
            name: Some("  John ".into()),
            email: Some("john".into()),
            subject: None,
            message: Some("Hi".into()),
        };
        let errors = form.validate().unwrap_err();

        // Act
        let view = ContactFormView::rejected(&form, &errors);

        // Assert
        assert_eq!(
            view,
            ContactFormView {
                values: ContactFormFields {
                    name: "  John ".into(),
                    email: "john".into(),
                    subject: "".into(),
                    message: "Hi".into(),
                },
                errors: ContactFormFields {
                    name: vec![],
                    email: vec!["Enter a valid email address.".into()],
                    subject: vec!["This field is required.".into()],
                    message: vec![],
                },
            }
        );
    }
}
