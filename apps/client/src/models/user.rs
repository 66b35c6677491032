use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity record returned by the backend.
///
/// `role` is carried as the raw server string (`CANDIDATE`, `RECRUITER`,
/// `ADMIN`, `VIEWER`); normalization happens on demand via
/// [`PortalRole::from_raw`], never at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub account_tier: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn portal_role(&self) -> Option<PortalRole> {
        PortalRole::from_raw(&self.role)
    }
}

/// The portal-facing view of a user's role, derived from the raw server
/// string each time it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalRole {
    Candidate,
    Employer,
    /// Freshly registered account that has not picked a side yet.
    NeedsSelection,
}

impl PortalRole {
    /// Case-insensitive normalization of the server role string.
    ///
    /// `recruiter` and `admin` both land on the employer portal; `viewer`
    /// means the user still has to pick a role; anything unrecognized maps
    /// to `None` and the caller treats the account as roleless.
    pub fn from_raw(raw: &str) -> Option<PortalRole> {
        match raw.to_lowercase().as_str() {
            "candidate" => Some(PortalRole::Candidate),
            "recruiter" | "admin" => Some(PortalRole::Employer),
            "viewer" => Some(PortalRole::NeedsSelection),
            _ => None,
        }
    }
}

/// The two roles a user can actually select after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSelection {
    Candidate,
    Employer,
}

impl RoleSelection {
    /// Wire value for the role-update endpoint. The backend models the
    /// employer side as `RECRUITER`, not `EMPLOYER`.
    pub fn wire_value(self) -> &'static str {
        match self {
            RoleSelection::Candidate => "CANDIDATE",
            RoleSelection::Employer => "RECRUITER",
        }
    }
}

impl std::str::FromStr for RoleSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "candidate" => Ok(RoleSelection::Candidate),
            "employer" => Ok(RoleSelection::Employer),
            other => Err(format!("unknown role '{other}' (expected candidate or employer)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_normalizes_case_insensitively() {
        assert_eq!(PortalRole::from_raw("CANDIDATE"), Some(PortalRole::Candidate));
        assert_eq!(PortalRole::from_raw("candidate"), Some(PortalRole::Candidate));
        assert_eq!(PortalRole::from_raw("Candidate"), Some(PortalRole::Candidate));
    }

    #[test]
    fn test_recruiter_and_admin_map_to_employer() {
        assert_eq!(PortalRole::from_raw("RECRUITER"), Some(PortalRole::Employer));
        assert_eq!(PortalRole::from_raw("admin"), Some(PortalRole::Employer));
    }

    #[test]
    fn test_viewer_needs_selection() {
        assert_eq!(
            PortalRole::from_raw("VIEWER"),
            Some(PortalRole::NeedsSelection)
        );
    }

    #[test]
    fn test_unknown_role_is_none() {
        assert_eq!(PortalRole::from_raw("superuser"), None);
        assert_eq!(PortalRole::from_raw(""), None);
    }

    #[test]
    fn test_employer_selection_wires_as_recruiter() {
        // The backend has no EMPLOYER role; selecting employer must send RECRUITER.
        assert_eq!(RoleSelection::Employer.wire_value(), "RECRUITER");
        assert_eq!(RoleSelection::Candidate.wire_value(), "CANDIDATE");
    }

    #[test]
    fn test_role_selection_from_str() {
        assert_eq!(
            "employer".parse::<RoleSelection>().unwrap(),
            RoleSelection::Employer
        );
        assert!("viewer".parse::<RoleSelection>().is_err());
    }

    #[test]
    fn test_user_deserializes_from_api_shape() {
        let json = r#"{
            "id": "7f0c0e4e-3f3a-4f6e-9b1a-0a4f0d9b2c11",
            "email": "dev@example.com",
            "name": "Dev Example",
            "role": "VIEWER",
            "account_tier": "FREE",
            "is_active": true,
            "is_verified": false,
            "created_at": "2026-01-10T09:30:00Z",
            "updated_at": "2026-01-10T09:30:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.email, "dev@example.com");
        assert_eq!(user.portal_role(), Some(PortalRole::NeedsSelection));
        assert!(user.is_active);
        assert!(!user.is_verified);
    }
}
