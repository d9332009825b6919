use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);
id_newtype!(FeedbackId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

/// The authenticated identity active in the client. Absent while signed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The five rating levels the input surface offers. Nothing outside this
/// enum can reach the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rating {
    Terrible,
    Poor,
    Average,
    Good,
    Excellent,
}

impl Rating {
    /// Highest first, matching the original selector order.
    pub const ALL: [Rating; 5] = [
        Rating::Excellent,
        Rating::Good,
        Rating::Average,
        Rating::Poor,
        Rating::Terrible,
    ];

    pub fn as_u8(self) -> u8 {
        match self {
            Rating::Terrible => 1,
            Rating::Poor => 2,
            Rating::Average => 3,
            Rating::Good => 4,
            Rating::Excellent => 5,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Rating::Terrible => "Terrible",
            Rating::Poor => "Poor",
            Rating::Average => "Average",
            Rating::Good => "Good",
            Rating::Excellent => "Excellent",
        }
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.as_u8()
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rating::Terrible),
            2 => Ok(Rating::Poor),
            3 => Ok(Rating::Average),
            4 => Ok(Rating::Good),
            5 => Ok(Rating::Excellent),
            other => Err(format!("rating out of range: {other}")),
        }
    }
}

/// Raw classifier output for one submission. The label is displayed
/// verbatim; only the derived category picks the icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentResult {
    pub label: String,
}

impl SentimentResult {
    pub fn category(&self) -> crate::sentiment::SentimentCategory {
        crate::sentiment::categorize(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    pub total: i64,
    pub avg_rating: f64,
    pub dominant_emotion: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub id: FeedbackId,
    pub username: String,
    pub comment: String,
    pub rating: i64,
    pub sentiment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// Full administrative dataset as of the last fetch. Always replaced
/// wholesale, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSnapshot {
    pub stats: AdminStats,
    pub reviews: Vec<ReviewRecord>,
    pub users: Vec<UserRecord>,
}

impl AdminSnapshot {
    pub fn contains_user(&self, id: UserId) -> bool {
        self.users.iter().any(|user| user.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_round_trips_through_wire_integer() {
        for rating in Rating::ALL {
            assert_eq!(Rating::try_from(rating.as_u8()), Ok(rating));
        }
    }

    #[test]
    fn rating_rejects_out_of_range_values() {
        assert!(Rating::try_from(0).is_err());
        assert!(Rating::try_from(6).is_err());
    }

    #[test]
    fn rating_serializes_as_bare_integer() {
        let encoded = serde_json::to_string(&Rating::Excellent).expect("encode");
        assert_eq!(encoded, "5");
    }

    #[test]
    fn only_admin_sessions_report_admin() {
        let admin = Session {
            username: "Admin".to_string(),
            role: Role::Admin,
        };
        let user = Session {
            username: "alice".to_string(),
            role: Role::User,
        };
        assert!(admin.is_admin());
        assert!(!user.is_admin());
    }
}
