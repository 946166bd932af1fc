//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
///
/// Roles are ordered by privilege level:
/// Admin > Manager > Receptionist > Guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full system administrator.
    Admin,
    /// Can manage rooms, users, and view reports.
    Manager,
    /// Front-desk staff: reservations, check-in/out, charges.
    Receptionist,
    /// A customer account; can manage only its own bookings.
    Guest,
}

impl UserRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 4,
            Self::Manager => 3,
            Self::Receptionist => 2,
            Self::Guest => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role is staff (receptionist or higher).
    pub fn is_staff(&self) -> bool {
        self.has_at_least(&Self::Receptionist)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Receptionist => "receptionist",
            Self::Guest => "guest",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = roomhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "receptionist" => Ok(Self::Receptionist),
            "guest" => Ok(Self::Guest),
            _ => Err(roomhub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, manager, receptionist, guest"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Admin.has_at_least(&UserRole::Guest));
        assert!(UserRole::Admin.has_at_least(&UserRole::Admin));
        assert!(UserRole::Manager.has_at_least(&UserRole::Receptionist));
        assert!(!UserRole::Guest.has_at_least(&UserRole::Receptionist));
    }

    #[test]
    fn test_staff_check() {
        assert!(UserRole::Receptionist.is_staff());
        assert!(UserRole::Manager.is_staff());
        assert!(!UserRole::Guest.is_staff());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("GUEST".parse::<UserRole>().unwrap(), UserRole::Guest);
        assert!("butler".parse::<UserRole>().is_err());
    }
}
