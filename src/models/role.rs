use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Роль пользователя. Строковые имена совпадают с тем, что лежит в колонке `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Admin")]
    Admin,
    #[serde(rename = "Tech Admin")]
    TechAdmin,
    #[serde(rename = "Customer")]
    Customer,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::TechAdmin, Role::Customer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::TechAdmin => "Tech Admin",
            Role::Customer => "Customer",
        }
    }

    // Куда отправлять пользователя после логина
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::TechAdmin => "/tech_admin/dashboard",
            Role::Customer => "/customer/home",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_stored_names() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Tech Admin".parse::<Role>(), Ok(Role::TechAdmin));
        assert_eq!("Customer".parse::<Role>(), Ok(Role::Customer));
    }

    #[test]
    fn role_names_are_case_sensitive() {
        assert!("admin".parse::<Role>().is_err());
        assert!("TechAdmin".parse::<Role>().is_err());
    }

    #[test]
    fn each_role_has_its_own_landing_page() {
        assert_eq!(Role::Admin.home_path(), "/admin/dashboard");
        assert_eq!(Role::TechAdmin.home_path(), "/tech_admin/dashboard");
        assert_eq!(Role::Customer.home_path(), "/customer/home");
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&Role::TechAdmin).unwrap();
        assert_eq!(json, "\"Tech Admin\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::TechAdmin);
    }

    proptest! {
        #[test]
        fn only_known_names_parse(s in "\\PC{0,16}") {
            let known = Role::ALL.iter().any(|r| r.as_str() == s);
            prop_assert_eq!(s.parse::<Role>().is_ok(), known);
        }
    }
}
