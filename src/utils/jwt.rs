use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Deserialize, Serialize};
use chrono::{Utc, Duration};
use std::env;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,     // email de l'utilisateur
    pub role: String,    // STANDARD, TUTEUR ou ADMIN
    pub user_id: i32,
    pub exp: i64,        // expiration timestamp
}

/// Récupère la clé secrète JWT depuis les variables d'environnement
fn get_jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not found in .env, using default (INSECURE)");
        "default-insecure-key-change-this".to_string()
    })
}

/// Génère un JWT token pour un utilisateur (sujet = email, rôle et id embarqués)
pub fn generate_token(email: &str, role: &str, user_id: i32) -> Result<String, String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or("Failed to calculate expiration")?
        .timestamp();

    let claims = Claims {
        sub: email.to_string(),
        role: role.to_string(),
        user_id,
        exp: expiration,
    };

    let secret = get_jwt_secret();

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
        .map_err(|e| format!("Failed to generate token: {}", e))
}

/// Vérifie et décode un JWT token
/// Token malformé, signature invalide ou expiré : même erreur générique
pub fn verify_token(token: &str) -> Result<Claims, String> {
    let secret = get_jwt_secret();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
        .map(|data| data.claims)
        .map_err(|e| format!("Invalid token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_verify_token() {
        let token = generate_token("tuteur@exemple.sn", "TUTEUR", 7).unwrap();
        let claims = verify_token(&token).unwrap();

        assert_eq!(claims.sub, "tuteur@exemple.sn");
        assert_eq!(claims.role, "TUTEUR");
        assert_eq!(claims.user_id, 7);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token() {
        // Un token forgé avec exp dans le passé doit être rejeté
        let claims = Claims {
            sub: "user@exemple.sn".to_string(),
            role: "STANDARD".to_string(),
            user_id: 1,
            exp: Utc::now().timestamp() - 3600,
        };
        let secret = get_jwt_secret();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap();

        assert!(verify_token(&token).is_err());
    }
}
