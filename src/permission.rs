use std::fmt;

/// Access level of a collaborator, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Admin,
    Push,
    Pull,
    /// No flag was set in the API response. Never sent back to the API.
    None,
}

impl Permission {
    /// Collapse GitHub's independent permission flags into the highest one set.
    pub fn from_flags(admin: bool, push: bool, pull: bool) -> Self {
        if admin {
            Permission::Admin
        } else if push {
            Permission::Push
        } else if pull {
            Permission::Pull
        } else {
            Permission::None
        }
    }

    /// Value accepted by the `permission` field of the collaborator write endpoint.
    pub fn as_api_str(&self) -> Option<&'static str> {
        match self {
            Permission::Admin => Some("admin"),
            Permission::Push => Some("push"),
            Permission::Pull => Some("pull"),
            Permission::None => None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str().unwrap_or("none"))
    }
}
