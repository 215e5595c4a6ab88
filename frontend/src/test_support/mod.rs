#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod fake;

#[cfg(test)]
pub mod helpers {
    use crate::api::{Tokens, User};
    use serde_json::json;

    pub fn sample_user() -> User {
        User {
            id: "u1".into(),
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            role: "user".into(),
        }
    }

    pub fn sample_tokens() -> Tokens {
        Tokens {
            access_token: "T1".into(),
            refresh_token: "T2".into(),
        }
    }

    pub fn user_json(id: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "firstname": "Ada",
            "lastname": "Lovelace",
            "username": "ada",
            "email": "ada@example.com",
            "role": "user"
        })
    }
}
