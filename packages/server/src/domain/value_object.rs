//! Validated value objects for the chat relay domain.

use uuid::Uuid;

/// Maximum length of a text message, in characters.
pub const MAX_TEXT_CHARS: usize = 4096;

/// Maximum size of a media message, in bytes.
pub const MAX_MEDIA_BYTES: usize = 1024 * 1024;

/// Maximum length of a room name, in characters.
const MAX_ROOM_NAME_CHARS: usize = 30;

/// Maximum length of a user id, in characters.
const MAX_USER_ID_CHARS: usize = 150;

/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("room name must not be empty")]
    EmptyRoomName,
    #[error("room name too long: {0} characters")]
    RoomNameTooLong(usize),
    #[error("room name contains an invalid character: {0:?}")]
    InvalidRoomNameChar(char),
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("user id too long: {0} characters")]
    UserIdTooLong(usize),
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("text message too long: {0} characters")]
    TextTooLong(usize),
    #[error("media message too large: {0} bytes")]
    MediaTooLarge(usize),
}

/// Name of a logical room. Unique per room, taken from the upgrade URL.
///
/// Valid names are 1 to 30 characters of ASCII alphanumerics, `-`, `_` or `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(name: String) -> Result<Self, DomainError> {
        if name.is_empty() {
            return Err(DomainError::EmptyRoomName);
        }
        let char_count = name.chars().count();
        if char_count > MAX_ROOM_NAME_CHARS {
            return Err(DomainError::RoomNameTooLong(char_count));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(DomainError::InvalidRoomNameChar(c));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = DomainError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl std::fmt::Display for RoomName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an authenticated user, taken from the token's subject claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: String) -> Result<Self, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::EmptyUserId);
        }
        let char_count = id.chars().count();
        if char_count > MAX_USER_ID_CHARS {
            return Err(DomainError::UserIdTooLong(char_count));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one live connection.
///
/// A user may hold several concurrent sessions; each gets its own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh session id for a new connection
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix timestamp in UTC milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Body of a chat message: either text or raw media bytes, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    Media(Vec<u8>),
}

impl MessageBody {
    /// Build a text body, rejecting empty and oversized content
    pub fn text(content: String) -> Result<Self, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        let char_count = content.chars().count();
        if char_count > MAX_TEXT_CHARS {
            return Err(DomainError::TextTooLong(char_count));
        }
        Ok(Self::Text(content))
    }

    /// Build a media body, rejecting empty and oversized content
    pub fn media(bytes: Vec<u8>) -> Result<Self, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        if bytes.len() > MAX_MEDIA_BYTES {
            return Err(DomainError::MediaTooLarge(bytes.len()));
        }
        Ok(Self::Media(bytes))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(content) => Some(content),
            Self::Media(_) => None,
        }
    }

    pub fn is_media(&self) -> bool {
        matches!(self, Self::Media(_))
    }
}
