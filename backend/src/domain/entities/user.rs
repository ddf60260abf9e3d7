use crate::domain::value_objects::*;

/// Platform account, owned by the user directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    email: Email,
    is_staff: bool,
}

impl User {
    pub fn new(username: impl Into<String>, email: Email) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            email,
            is_staff: false,
        }
    }

    pub fn from_persistence(id: UserId, username: String, email: Email, is_staff: bool) -> Self {
        Self {
            id,
            username,
            email,
            is_staff,
        }
    }

    #[cfg(test)]
    pub fn with_staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn is_staff(&self) -> bool {
        self.is_staff
    }
}
