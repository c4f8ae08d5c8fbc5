use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Employee {
    pub id: u64,

    pub name: String,

    pub email: String,

    /// Argon2 PHC hash, never the plaintext. Skipped on serialization so
    /// the search endpoint cannot leak it.
    #[serde(skip_serializing)]
    pub password: String,

    pub phone: String,

    pub address: String,

    pub position: Option<String>,

    pub shift: Option<String>,

    /// Stamped server-side at creation, never changed afterwards.
    pub start_date: NaiveDateTime,

    pub salary: f64,

    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Employee {
        Employee {
            id: 7,
            name: "Jane Doe".into(),
            email: "jane@company.com".into(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            phone: "555-0100".into(),
            address: "1 Main St".into(),
            position: None,
            shift: None,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            salary: 100.0,
            role: "staff".into(),
        }
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "jane@company.com");
    }
}
