use std::ops::Add;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::TimestampSeconds;

use crate::token::{validation_for_subject, JWT_ISSUER};
use crate::{JWTCreationError, JsonWebTokenManager};


/// JSON Web Token subject for confirmation tokens.
const CONFIRMATION_TOKEN_SUBJECT: &str = "confirmation token";

/// How many hours a rendered confirmation form stays submittable.
pub const CONFIRMATION_TOKEN_VALIDITY_HOURS: i64 = 1;


/// Claims of a confirmation token, i.e. the `_token` field on delete forms.
///
/// The `intent` ties a token to a single action on a single resource,
/// e.g. `category_delete:4`, so a token issued for one form can't be replayed on another.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
struct ConfirmationClaims {
    iss: String,

    sub: String,

    #[serde_as(as = "TimestampSeconds<i64>")]
    iat: DateTime<Utc>,

    #[serde_as(as = "TimestampSeconds<i64>")]
    exp: DateTime<Utc>,

    intent: String,
}


impl JsonWebTokenManager {
    /// Create a confirmation token for the given intent.
    pub fn create_confirmation_token(&self, intent: &str) -> Result<String, JWTCreationError> {
        self.create_confirmation_token_issued_at(intent, Utc::now())
    }

    fn create_confirmation_token_issued_at(
        &self,
        intent: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JWTCreationError> {
        let issued_at = issued_at.trunc_subsecs(0);

        let claims = ConfirmationClaims {
            iss: JWT_ISSUER.to_string(),
            sub: CONFIRMATION_TOKEN_SUBJECT.to_string(),
            iat: issued_at,
            exp: issued_at.add(Duration::hours(CONFIRMATION_TOKEN_VALIDITY_HOURS)),
            intent: intent.to_string(),
        };

        Ok(jsonwebtoken::encode(
            &self.header,
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Returns `true` if `token` is an unexpired confirmation token
    /// issued by us for exactly this `intent`.
    pub fn verify_confirmation_token(&self, token: &str, intent: &str) -> bool {
        let Ok(token_data) = jsonwebtoken::decode::<ConfirmationClaims>(
            token,
            &self.decoding_key,
            &validation_for_subject(CONFIRMATION_TOKEN_SUBJECT),
        ) else {
            return false;
        };

        let current_time = Utc::now();

        token_data.claims.intent == intent
            && token_data.claims.iat <= current_time
            && token_data.claims.exp > current_time
    }
}


#[cfg(test)]
mod test {
    use recipes_core::ids::UserId;

    use super::*;
    use crate::{JWTClaims, JWTTokenType, Role};

    #[test]
    fn accepts_token_for_same_intent() {
        let manager = JsonWebTokenManager::new("secret");

        let token = manager
            .create_confirmation_token("category_delete:4")
            .unwrap();

        assert!(manager.verify_confirmation_token(&token, "category_delete:4"));
    }

    #[test]
    fn rejects_token_for_other_intent() {
        let manager = JsonWebTokenManager::new("secret");

        let token = manager
            .create_confirmation_token("category_delete:4")
            .unwrap();

        assert!(!manager.verify_confirmation_token(&token, "category_delete:5"));
        assert!(!manager.verify_confirmation_token(&token, "recipe_delete:4"));
    }

    #[test]
    fn rejects_expired_and_garbage_tokens() {
        let manager = JsonWebTokenManager::new("secret");

        let expired_token = manager
            .create_confirmation_token_issued_at(
                "recipe_delete:1",
                Utc::now() - Duration::hours(2),
            )
            .unwrap();

        assert!(!manager.verify_confirmation_token(&expired_token, "recipe_delete:1"));
        assert!(!manager.verify_confirmation_token("", "recipe_delete:1"));
        assert!(!manager.verify_confirmation_token("not-a-token", "recipe_delete:1"));
    }

    #[test]
    fn access_token_is_not_a_confirmation_token() {
        let manager = JsonWebTokenManager::new("secret");

        let access_token = manager
            .create_token(JWTClaims::create(
                UserId::new(1),
                vec![Role::Administrator],
                Utc::now(),
                Duration::hours(2),
                JWTTokenType::Access,
            ))
            .unwrap();

        assert!(!manager.verify_confirmation_token(&access_token, "category_delete:1"));
    }
}
