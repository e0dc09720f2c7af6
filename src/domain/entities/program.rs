//! Referral program and partner enrollment entities.

use serde::Serialize;
use std::fmt;

/// How a program pays its partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionType {
    Percentage,
    Flat,
}

impl CommissionType {
    /// Reads the stored column value.
    ///
    /// Only the exact value `percentage` selects a percentage commission;
    /// anything else is flat.
    pub fn from_db(value: &str) -> Self {
        if value == "percentage" {
            Self::Percentage
        } else {
            Self::Flat
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Flat => "flat",
        }
    }
}

impl fmt::Display for CommissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A referral program owned by a workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub slug: String,
    pub brand_color: Option<String>,
    pub logo: Option<String>,
    pub commission_type: CommissionType,
    /// Percentage points for [`CommissionType::Percentage`].
    pub commission_amount: i32,
}

/// The partner behind a link's program enrollment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrolledPartner {
    pub partner_id: String,
    pub user_ids: Vec<String>,
}

impl EnrolledPartner {
    /// Whether any user account is attached to the partner.
    pub fn has_users(&self) -> bool {
        !self.user_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_type_from_db() {
        assert_eq!(
            CommissionType::from_db("percentage"),
            CommissionType::Percentage
        );
        assert_eq!(CommissionType::from_db("Percentage"), CommissionType::Flat);
        assert_eq!(CommissionType::from_db("flat"), CommissionType::Flat);
        assert_eq!(CommissionType::from_db("unknown"), CommissionType::Flat);
    }

    #[test]
    fn test_commission_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(CommissionType::Percentage).unwrap(),
            "percentage"
        );
        assert_eq!(serde_json::to_value(CommissionType::Flat).unwrap(), "flat");
    }

    #[test]
    fn test_enrolled_partner_has_users() {
        let mut partner = EnrolledPartner {
            partner_id: "pn_1".to_string(),
            user_ids: vec![],
        };
        assert!(!partner.has_users());

        partner.user_ids.push("user_1".to_string());
        assert!(partner.has_users());
    }
}
