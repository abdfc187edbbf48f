use serde::{ser::SerializeStruct, Serialize, Serializer};

/// A message shown exactly once on the next rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    ContactMessageSent,
    ContactMessageFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

impl Notification {
    const ALL: [Self; 2] = [Self::ContactMessageSent, Self::ContactMessageFailed];

    pub fn level(self) -> NotificationLevel {
        match self {
            Self::ContactMessageSent => NotificationLevel::Success,
            Self::ContactMessageFailed => NotificationLevel::Error,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::ContactMessageSent => "Your message has been sent successfully!",
            Self::ContactMessageFailed => "An error occurred. Please try again later.",
        }
    }

    /// Stable identifier used to carry the notification across requests.
    pub fn code(self) -> &'static str {
        match self {
            Self::ContactMessageSent => "contact_message_sent",
            Self::ContactMessageFailed => "contact_message_failed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|x| x.code() == code)
    }
}

impl Serialize for Notification {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Notification", 2)?;
        s.serialize_field("level", &self.level())?;
        s.serialize_field("message", self.message())?;
        s.end()
    }
}
