use std::{collections::BTreeMap, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

#[nutype(
    validate(not_empty, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(not_empty, len_char_max = 200),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactSubject(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessage(String);

/// Raw, untrusted contact form input as submitted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactFieldError {
    #[error("This field is required.")]
    Required,
    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },
    #[error("Enter a valid email address.")]
    InvalidFormat,
}

/// Errors collected while validating a [`ContactForm`], grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormErrors(BTreeMap<ContactField, Vec<ContactFieldError>>);

pub const NAME_MAX_LEN: usize = 100;
pub const SUBJECT_MAX_LEN: usize = 200;

/// `local@domain` with at least one dot in the domain and no whitespace inside.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").unwrap());

#[derive(Debug, Clone, Copy)]
enum Check {
    MaxChars(usize),
    Email,
}

struct FieldRule {
    field: ContactField,
    checks: &'static [Check],
}

/// Every field is required; the remaining checks run on the raw value and only
/// values that passed all of them are trimmed.
const RULES: &[FieldRule] = &[
    FieldRule {
        field: ContactField::Name,
        checks: &[Check::MaxChars(NAME_MAX_LEN)],
    },
    FieldRule {
        field: ContactField::Email,
        checks: &[Check::Email],
    },
    FieldRule {
        field: ContactField::Subject,
        checks: &[Check::MaxChars(SUBJECT_MAX_LEN)],
    },
    FieldRule {
        field: ContactField::Message,
        checks: &[],
    },
];

impl ContactForm {
    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Name => self.name.as_deref(),
            ContactField::Email => self.email.as_deref(),
            ContactField::Subject => self.subject.as_deref(),
            ContactField::Message => self.message.as_deref(),
        }
    }

    /// Validate all fields and return either a normalized submission or every
    /// error that was found.
    pub fn validate(&self) -> Result<ContactSubmission, ContactFormErrors> {
        let mut errors = ContactFormErrors::default();
        let mut cleaned = BTreeMap::new();

        for rule in RULES {
            let Some(raw) = self.get(rule.field).filter(|x| !x.trim().is_empty()) else {
                errors.push(rule.field, ContactFieldError::Required);
                continue;
            };

            let field_errors = rule
                .checks
                .iter()
                .filter_map(|check| check.run(raw).err())
                .collect::<Vec<_>>();

            if field_errors.is_empty() {
                cleaned.insert(rule.field, raw.trim().to_owned());
            } else {
                field_errors
                    .into_iter()
                    .for_each(|err| errors.push(rule.field, err));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let mut take = |field| cleaned.remove(&field).unwrap_or_default();
        ContactSubmission::new(
            take(ContactField::Name),
            &take(ContactField::Email),
            take(ContactField::Subject),
            take(ContactField::Message),
        )
    }
}

impl ContactSubmission {
    /// Build a submission from already sanitized values.
    pub fn new(
        name: String,
        email: &str,
        subject: String,
        message: String,
    ) -> Result<Self, ContactFormErrors> {
        let mut errors = ContactFormErrors::default();

        let name_len = name.chars().count();
        let name = ContactName::try_new(name).map_err(|err| match err {
            ContactNameError::NotEmptyViolated => ContactFieldError::Required,
            ContactNameError::LenCharMaxViolated => ContactFieldError::TooLong {
                max: NAME_MAX_LEN,
                actual: name_len,
            },
        });
        let email = email
            .parse::<EmailAddress>()
            .map_err(|_| ContactFieldError::InvalidFormat);
        let subject_len = subject.chars().count();
        let subject = ContactSubject::try_new(subject).map_err(|err| match err {
            ContactSubjectError::NotEmptyViolated => ContactFieldError::Required,
            ContactSubjectError::LenCharMaxViolated => ContactFieldError::TooLong {
                max: SUBJECT_MAX_LEN,
                actual: subject_len,
            },
        });
        let message = ContactMessage::try_new(message).map_err(|err| match err {
            ContactMessageError::NotEmptyViolated => ContactFieldError::Required,
        });

        let name = errors.collect(ContactField::Name, name);
        let email = errors.collect(ContactField::Email, email);
        let subject = errors.collect(ContactField::Subject, subject);
        let message = errors.collect(ContactField::Message, message);

        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) => Ok(Self {
                name,
                email,
                subject,
                message,
            }),
            _ => Err(errors),
        }
    }
}

impl Check {
    fn run(self, raw: &str) -> Result<(), ContactFieldError> {
        match self {
            Check::MaxChars(max) => {
                let actual = raw.chars().count();
                if actual > max {
                    return Err(ContactFieldError::TooLong { max, actual });
                }
            }
            Check::Email => {
                let email = raw.trim();
                if !EMAIL_REGEX.is_match(email) || email.parse::<EmailAddress>().is_err() {
                    return Err(ContactFieldError::InvalidFormat);
                }
            }
        }
        Ok(())
    }
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContactFormErrors {
    fn collect<T>(&mut self, field: ContactField, result: Result<T, ContactFieldError>) -> Option<T> {
        result.map_err(|err| self.push(field, err)).ok()
    }

    pub fn push(&mut self, field: ContactField, error: ContactFieldError) {
        self.0.entry(field).or_default().push(error);
    }

    pub fn get(&self, field: ContactField) -> &[ContactFieldError] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.keys().copied()
    }

    /// The human readable messages for the given field.
    pub fn messages(&self, field: ContactField) -> Vec<String> {
        self.get(field).iter().map(ToString::to_string).collect()
    }
}
