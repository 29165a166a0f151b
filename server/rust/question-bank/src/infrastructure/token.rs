use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::service::{IssuedToken, TokenClaims, TokenIssuer};

/// JwtTokenIssuer は HS256 で署名したアクセストークンを発行・検証する。
pub struct JwtTokenIssuer {
    secret: SecretString,
    issuer: String,
    ttl_secs: u64,
}

impl JwtTokenIssuer {
    pub fn new(secret: SecretString, issuer: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            ttl_secs,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: i64, username: &str) -> anyhow::Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl_secs)?;
        let claims = TokenClaims {
            sub: username.to_string(),
            uid: user_id,
            iss: self.issuer.clone(),
            iat: now,
            exp: now + ttl,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| anyhow::anyhow!("failed to sign token: {e}"))?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_secs,
        })
    }

    fn verify(&self, token: &str) -> anyhow::Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| anyhow::anyhow!("JWT verification failed: {e}"))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str) -> JwtTokenIssuer {
        JwtTokenIssuer::new(SecretString::new(secret.to_string()), "question-bank", 3600)
    }

    #[test]
    fn test_issue_and_verify() {
        let jwt = issuer("test-secret");
        let issued = jwt.issue(7, "hanako").unwrap();
        assert_eq!(issued.expires_in, 3600);

        let claims = jwt.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "hanako");
        assert_eq!(claims.uid, 7);
        assert_eq!(claims.iss, "question-bank");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let issued = issuer("secret-a").issue(1, "taro").unwrap();
        assert!(issuer("secret-b").verify(&issued.token).is_err());
    }

    #[test]
    fn test_verify_rejects_other_issuer() {
        let other = JwtTokenIssuer::new(SecretString::new("s".to_string()), "someone-else", 60);
        let issued = other.issue(1, "taro").unwrap();
        assert!(issuer("s").verify(&issued.token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(issuer("s").verify("not.a.jwt").is_err());
    }
}
