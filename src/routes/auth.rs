use actix_web::{get, post, web, HttpResponse};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use validator::Validate;

use crate::errors::{AppError, SuccessResponse};
use crate::middleware::AuthUser;
use crate::models::dto::{LoginRequest, LoginResponse, MeResponse, RegisterRequest};
use crate::models::utilisateur::{self, Role};
use crate::utils::{jwt, password};

/// POST /auth/register - Créer un compte (PUBLIC)
#[post("/register")]
pub async fn register(
    body: web::Json<RegisterRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // 1. Le rôle vient de la requête et est immuable ensuite
    let role = Role::parse(&body.role.to_uppercase())
        .ok_or_else(|| AppError::Validation("Rôle invalide".to_string()))?;

    // 2. Email unique
    let existant = utilisateur::Entity::find()
        .filter(utilisateur::Column::Email.eq(&body.email))
        .one(db.get_ref())
        .await?;
    if existant.is_some() {
        return Err(AppError::Conflict("Email déjà utilisé".to_string()));
    }

    // 3. Hash du mot de passe
    let hash = password::hash_password(&body.mot_de_passe).map_err(AppError::Internal)?;

    // 4. Créer l'utilisateur
    let nouveau = utilisateur::ActiveModel {
        nom: Set(body.nom.clone()),
        prenom: Set(body.prenom.clone()),
        email: Set(body.email.clone()),
        mot_de_passe: Set(hash),
        role: Set(role),
        est_actif: Set(true),
        ..Default::default()
    };
    let utilisateur = nouveau.insert(db.get_ref()).await?;

    tracing::info!(
        "utilisateur {} inscrit avec le rôle {}",
        utilisateur.id_utilisateur,
        role.as_str()
    );
    Ok(HttpResponse::Ok().json(SuccessResponse::new("Utilisateur créé avec succès")))
}

/// POST /auth/login - Se connecter (PUBLIC)
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    // 1. Trouver l'utilisateur; message unique quelle que soit la cause
    let utilisateur = utilisateur::Entity::find()
        .filter(utilisateur::Column::Email.eq(&body.email))
        .one(db.get_ref())
        .await?
        .ok_or_else(|| AppError::Unauthenticated("Email ou mot de passe incorrect".to_string()))?;

    // 2. Vérifier le mot de passe
    let valide = password::verify_password(&body.mot_de_passe, &utilisateur.mot_de_passe)
        .map_err(AppError::Internal)?;
    if !valide {
        return Err(AppError::Unauthenticated(
            "Email ou mot de passe incorrect".to_string(),
        ));
    }

    // 3. Générer le JWT
    let token = jwt::generate_token(
        &utilisateur.email,
        utilisateur.role.as_str(),
        utilisateur.id_utilisateur,
    )
    .map_err(AppError::Internal)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        role: utilisateur.role.as_str().to_string(),
        user_id: utilisateur.id_utilisateur,
    }))
}

/// GET /auth/me - Vérifier le token (identité attachée par le gate si présente)
#[get("/me")]
pub async fn me(auth_user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        user_id: auth_user.user_id,
        email: auth_user.email,
        role: auth_user.role.as_str().to_string(),
    })
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(register)
            .service(login)
            .service(me),
    );
}
