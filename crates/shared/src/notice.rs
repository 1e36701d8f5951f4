use strum::{AsRefStr, Display, EnumString};
use time::{Duration, OffsetDateTime};
use ulid::Ulid;

use crate::Error;

/// How long a notice stays on screen before it is dismissed automatically.
pub const NOTICE_TTL: Duration = Duration::milliseconds(2500);

#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Danger,
}

/// Transient, auto-dismissing message shown to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: String,
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: OffsetDateTime,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            level,
            message: message.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Danger, message)
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now - self.created_at >= NOTICE_TTL
    }
}

impl From<&Error> for Notice {
    fn from(error: &Error) -> Self {
        match error {
            Error::EmptySelection => Notice::warning("Please select at least one ingredient!"),
            Error::NoSafeIngredients => {
                Notice::warning("None of your pantry ingredients are safe for your allergies.")
            }
            Error::AllAllergenic => Notice::warning(
                "Recipes were found, but all of them contain your allergens.",
            ),
            Error::InvalidAssignment(reason) => {
                Notice::warning(format!("Could not schedule meal: {reason}"))
            }
            Error::Validate(errors) => Notice::warning(errors.to_string()),
            Error::NotFound(what) => Notice::warning(format!("{what} not found.")),
            Error::Provider(_) => {
                Notice::danger("Could not reach the server. Showing the last known data.")
            }
        }
    }
}

impl From<Error> for Notice {
    fn from(error: Error) -> Self {
        Notice::from(&error)
    }
}

/// Queue of notices currently on screen.
#[derive(Clone, Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.items.push(notice);
    }

    /// Converts an error into a notice at the component boundary.
    ///
    /// Returns the value on success and `None` once the error has been
    /// turned into a notice.
    pub fn report<T>(&mut self, result: crate::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                if error.is_provider() {
                    tracing::warn!(error = %error, "provider call failed");
                } else {
                    tracing::debug!(error = %error, "reported as notice");
                }
                self.push(Notice::from(&error));
                None
            }
        }
    }

    pub fn dismiss(&mut self, id: &str) {
        self.items.retain(|n| n.id != id);
    }

    pub fn dismiss_expired(&mut self, now: OffsetDateTime) {
        self.items.retain(|n| !n.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.items)
    }
}
