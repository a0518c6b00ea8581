//! The caller identity attached to every authenticated request.

use engine::{Role, users};

/// Authenticated caller, inserted as a request extension by the auth layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: Role,
}

impl Principal {
    /// Whether the caller may use the expense endpoints.
    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }
}

impl TryFrom<users::Model> for Principal {
    type Error = engine::EngineError;

    fn try_from(value: users::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            role: Role::try_from(value.role.as_str())?,
            username: value.username,
        })
    }
}
