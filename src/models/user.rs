use mongodb::bson::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// The two fields of a user document this service cares about.
///
/// Everything else the client stored is left untouched in the raw document.
#[derive(Debug, Clone, Default)]
pub struct User {
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl User {
    pub fn from_document(document: &Document) -> Self {
        Self {
            email: document.get_str("email").ok().map(str::to_string),
            role: document.get_str("role").ok().and_then(Role::parse),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}
