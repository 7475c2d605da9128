use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    pub fn next(self) -> Self {
        UserId(self.0 + 1)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, name: String, email: String, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_id_next() {
        assert_eq!(UserId(0).next(), UserId(1));
        assert_eq!(UserId(41).next().to_string(), "42");
    }

    #[test]
    fn test_user_serializes_id_as_number() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let user = User::new(UserId(7), "Ana".to_string(), "ana@x.com".to_string(), at);
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "Ana");
        assert_eq!(value["registered_at"], "2024-03-01T09:30:00Z");
    }
}
