use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::CalendarError;

/// Dashboard role of whoever is looking at the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    #[default]
    Operations,
    Consultant,
    Incubatee,
    Funder,
    Investor,
    Director,
    Government,
    ProjectAdmin,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::Admin,
        Role::Operations,
        Role::Consultant,
        Role::Incubatee,
        Role::Funder,
        Role::Investor,
        Role::Director,
        Role::Government,
        Role::ProjectAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operations => "operations",
            Role::Consultant => "consultant",
            Role::Incubatee => "incubatee",
            Role::Funder => "funder",
            Role::Investor => "investor",
            Role::Director => "director",
            Role::Government => "government",
            Role::ProjectAdmin => "project-admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == wanted)
            .ok_or_else(|| CalendarError::UnknownRole(s.to_string()))
    }
}

/// Who a calendar request is made for.
///
/// Passed explicitly into every fetch so tenant scoping never depends on
/// ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// Tenant key (`companyCode`). `None` sees every tenant.
    pub tenant: Option<String>,
    pub role: Role,
}

impl Viewer {
    pub fn new(tenant: Option<String>, role: Role) -> Self {
        Self {
            tenant: tenant.filter(|t| !t.trim().is_empty()),
            role,
        }
    }

    /// Returns the tenant key, if any.
    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Project-Admin".parse::<Role>().unwrap(), Role::ProjectAdmin);
        assert_eq!("project_admin".parse::<Role>().unwrap(), Role::ProjectAdmin);
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_round_trips_through_display() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_serde_kebab_case() {
        let json = serde_json::to_string(&Role::ProjectAdmin).unwrap();
        assert_eq!(json, r#""project-admin""#);
    }

    #[test]
    fn test_viewer_blank_tenant_is_none() {
        let viewer = Viewer::new(Some("  ".to_string()), Role::Funder);
        assert_eq!(viewer.tenant(), None);

        let viewer = Viewer::new(Some("RCM".to_string()), Role::Funder);
        assert_eq!(viewer.tenant(), Some("RCM"));
    }
}
