use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::utilisateur::Role;

/// Identité vérifiée de l'utilisateur authentifié.
/// Attachée à la requête par le gate, extraite ici dans les routes protégées.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // L'identité n'existe que si le gate a vérifié un token valide
        match req.extensions().get::<AuthUser>() {
            Some(utilisateur) => ready(Ok(utilisateur.clone())),
            None => ready(Err(
                AppError::Unauthenticated("Authentification requise".to_string()).into(),
            )),
        }
    }
}
