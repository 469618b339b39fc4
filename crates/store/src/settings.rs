use serde::{Deserialize, Serialize};

use dukkan_core::UserId;

/// Access level of a shop user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Employee,
}

/// A login account managed from the settings screen.
///
/// Passwords are stored as given — this is a single-machine, single-shop
/// deployment and the login gate is a convenience, not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

/// Shop identity and print preferences, plus the user list.
///
/// Read-only for receipt/invoice renderers; replaced wholesale by the
/// settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSettings {
    pub name: String,
    /// Business description / traded goods, printed under the shop name.
    pub specialty: String,
    pub address: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub currency: String,
    pub footer_note: String,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            name: "Dukkan".to_string(),
            specialty: String::new(),
            address: String::new(),
            phone: String::new(),
            logo_url: None,
            currency: "IQD".to_string(),
            footer_note: String::new(),
            users: vec![User {
                id: UserId::new(),
                username: "admin".to_string(),
                password: "admin".to_string(),
                role: UserRole::Admin,
            }],
        }
    }
}

impl ShopSettings {
    pub fn add_user(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        role: UserRole,
    ) -> &User {
        self.users.push(User {
            id: UserId::new(),
            username: username.into(),
            password: password.into(),
            role,
        });
        &self.users[self.users.len() - 1]
    }

    pub fn remove_user(&mut self, id: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        self.users.len() != before
    }
}
