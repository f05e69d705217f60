use std::borrow::Cow;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use recipes_core::ids::UserId;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::TimestampSeconds;
use thiserror::Error;

use crate::Role;


pub(crate) const JWT_ISSUER: &str = "Recipes";

/// Subject of login tokens (access and refresh).
const LOGIN_TOKEN_SUBJECT: &str = "login";


#[derive(Error, Debug)]
pub enum JWTValidationError {
    /// The signature checks out, but the token is past its expiry time.
    /// The claims are kept so callers can log whose token it was.
    #[error("token has expired")]
    Expired { expired_token: Box<JWTClaims> },

    #[error("token is invalid: {}", .reason)]
    InvalidToken { reason: Cow<'static, str> },
}


/// Whether a login token authenticates requests (`access`)
/// or can only be exchanged for a new access token (`refresh`).
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum JWTTokenType {
    Access,
    Refresh,
}


/// Claims carried by access and refresh tokens.
///
/// Roles are copied into the token when it is issued, so checking them needs no database access.
/// A role change takes effect for a user on their next login or refresh.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JWTClaims {
    pub iss: String,

    pub sub: String,

    #[serde_as(as = "TimestampSeconds<i64>")]
    pub iat: DateTime<Utc>,

    #[serde_as(as = "TimestampSeconds<i64>")]
    pub exp: DateTime<Utc>,

    pub user_id: UserId,

    pub roles: Vec<Role>,

    pub token_type: JWTTokenType,
}

impl JWTClaims {
    /// `issued_at` is truncated to whole seconds, the precision tokens are encoded with.
    pub fn create(
        user_id: UserId,
        roles: Vec<Role>,
        issued_at: DateTime<Utc>,
        valid_for: Duration,
        token_type: JWTTokenType,
    ) -> Self {
        let issued_at = issued_at.trunc_subsecs(0);

        Self {
            iss: JWT_ISSUER.to_string(),
            sub: LOGIN_TOKEN_SUBJECT.to_string(),
            iat: issued_at,
            exp: issued_at + valid_for,
            user_id,
            roles,
            token_type,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}



#[derive(Debug, Error)]
pub enum JWTCreationError {
    #[error("failed to encode token")]
    JWTError {
        #[from]
        #[source]
        error: jsonwebtoken::errors::Error,
    },
}


/// Validation settings for tokens with the given subject.
///
/// Expiry is checked by the callers with `chrono` instead of by `jsonwebtoken`,
/// so an expired login token can be told apart from a forged one.
pub(crate) fn validation_for_subject(subject: &str) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);

    validation.set_issuer(&[JWT_ISSUER]);
    validation.sub = Some(subject.to_string());

    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.required_spec_claims.clear();

    validation
}


/// Signs and verifies all tokens the server hands out (HS256 with a shared secret).
pub struct JsonWebTokenManager {
    pub(crate) header: Header,

    pub(crate) encoding_key: EncodingKey,

    pub(crate) decoding_key: DecodingKey,

    login_validation: Validation,
}

impl JsonWebTokenManager {
    pub fn new(json_web_token_secret: &str) -> Self {
        let secret = json_web_token_secret.as_bytes();

        Self {
            header: Header::new(Algorithm::HS256),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            login_validation: validation_for_subject(LOGIN_TOKEN_SUBJECT),
        }
    }

    pub fn create_token(&self, claims: JWTClaims) -> Result<String, JWTCreationError> {
        Ok(jsonwebtoken::encode(
            &self.header,
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verifies the signature, issuer and subject of a login token, then its time bounds.
    pub fn decode_token(&self, token: &str) -> Result<JWTClaims, JWTValidationError> {
        let claims = jsonwebtoken::decode::<JWTClaims>(
            token,
            &self.decoding_key,
            &self.login_validation,
        )
        .map_err(|error| {
            let reason = match error.kind() {
                ErrorKind::InvalidIssuer => Cow::from("unexpected issuer"),
                ErrorKind::InvalidSubject => Cow::from("not a login token"),
                _ => Cow::from(format!("undecodable token: {}", error)),
            };

            JWTValidationError::InvalidToken { reason }
        })?
        .claims;

        let current_time = Utc::now();

        if claims.iat > current_time {
            return Err(JWTValidationError::InvalidToken {
                reason: Cow::from("issued in the future"),
            });
        }

        if claims.exp <= current_time {
            return Err(JWTValidationError::Expired {
                expired_token: Box::new(claims),
            });
        }

        Ok(claims)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn issued_token_decodes_to_the_same_claims() {
        let manager = JsonWebTokenManager::new("secret");

        let issued_at = Utc::now().trunc_subsecs(0);
        let valid_for = Duration::seconds(60);

        let claims = JWTClaims::create(
            UserId::new(1),
            vec![Role::User, Role::Administrator],
            issued_at,
            valid_for,
            JWTTokenType::Access,
        );

        let encoded_token = manager.create_token(claims).unwrap();
        let decoded_claims = manager.decode_token(&encoded_token).unwrap();

        assert_eq!(decoded_claims.iss, JWT_ISSUER);
        assert_eq!(decoded_claims.sub, LOGIN_TOKEN_SUBJECT);
        assert_eq!(decoded_claims.iat, issued_at);
        assert_eq!(decoded_claims.exp, issued_at + valid_for);
        assert_eq!(decoded_claims.user_id, UserId::new(1));
        assert_eq!(decoded_claims.token_type, JWTTokenType::Access);
        assert!(decoded_claims.has_role(Role::Administrator));
    }

    #[test]
    fn token_types_serialize_in_lowercase() {
        assert_eq!(
            serde_json::to_string(&JWTTokenType::Refresh).unwrap(),
            r#""refresh""#
        );
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let manager = JsonWebTokenManager::new("secret");

        let claims = JWTClaims::create(
            UserId::new(2),
            vec![Role::User],
            Utc::now() - Duration::hours(3),
            Duration::hours(2),
            JWTTokenType::Access,
        );

        let encoded_token = manager.create_token(claims).unwrap();

        assert!(matches!(
            manager.decode_token(&encoded_token),
            Err(JWTValidationError::Expired { .. })
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let manager = JsonWebTokenManager::new("secret");
        let other_manager = JsonWebTokenManager::new("another secret");

        let claims = JWTClaims::create(
            UserId::new(3),
            vec![Role::User],
            Utc::now(),
            Duration::hours(2),
            JWTTokenType::Access,
        );

        let encoded_token = other_manager.create_token(claims).unwrap();

        assert!(matches!(
            manager.decode_token(&encoded_token),
            Err(JWTValidationError::InvalidToken { .. })
        ));
    }

    #[test]
    fn confirmation_token_is_not_a_login_token() {
        let manager = JsonWebTokenManager::new("secret");

        let confirmation_token = manager.create_confirmation_token("category_delete:1").unwrap();

        assert!(matches!(
            manager.decode_token(&confirmation_token),
            Err(JWTValidationError::InvalidToken { .. })
        ));
    }
}
