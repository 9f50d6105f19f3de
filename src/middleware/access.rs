// Gate de contrôle d'accès : chaque requête entrante est confrontée à une
// table de règles (méthodes, motif de chemin, accès requis) évaluée de haut
// en bas, première règle correspondante gagne. La table est une donnée, pas
// du code : elle se teste indépendamment du serveur.

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{header, Method},
    middleware::Next,
    Error, HttpMessage,
};

use crate::errors::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::utilisateur::Role;
use crate::utils::jwt;

/// Accès requis pour une règle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acces {
    /// Aucune authentification requise
    Public,
    /// Token valide requis, quel que soit le rôle
    Authentifie,
    /// Token valide requis avec l'un de ces rôles
    Roles(&'static [Role]),
}

struct Regle {
    /// None = toutes les méthodes
    methodes: Option<&'static [&'static str]>,
    motif: &'static str,
    acces: Acces,
}

const ADMIN_SEUL: Acces = Acces::Roles(&[Role::Admin]);
const TUTEUR_SEUL: Acces = Acces::Roles(&[Role::Tuteur]);
const TOUT_ROLE: Acces = Acces::Roles(&[Role::Standard, Role::Tuteur, Role::Admin]);

/// Table des permissions, du plus spécifique au plus général.
const REGLES: &[Regle] = &[
    // Préflight CORS
    Regle { methodes: Some(&["OPTIONS"]), motif: "/**", acces: Acces::Public },
    // Inscription, connexion
    Regle { methodes: None, motif: "/auth/**", acces: Acces::Public },
    // Sonde de vie
    Regle { methodes: Some(&["GET"]), motif: "/health", acces: Acces::Public },
    // Documentation API
    Regle { methodes: None, motif: "/swagger-ui/**", acces: Acces::Public },
    Regle { methodes: None, motif: "/v3/api-docs/**", acces: Acces::Public },
    // File de modération exposée publiquement
    Regle { methodes: Some(&["GET"]), motif: "/etablissements/admin/en-attente", acces: Acces::Public },
    // Listing admin racine
    Regle { methodes: Some(&["GET"]), motif: "/etablissements/admin", acces: ADMIN_SEUL },
    // Catalogue des services
    Regle { methodes: Some(&["GET"]), motif: "/services", acces: Acces::Public },
    Regle { methodes: Some(&["GET"]), motif: "/services/{id}", acces: Acces::Public },
    Regle { methodes: Some(&["POST"]), motif: "/services/create", acces: ADMIN_SEUL },
    Regle { methodes: Some(&["DELETE"]), motif: "/services/{id}/delete", acces: ADMIN_SEUL },
    // Lectures publiques des établissements validés
    Regle { methodes: Some(&["GET"]), motif: "/etablissements", acces: Acces::Public },
    Regle { methodes: Some(&["GET"]), motif: "/etablissements/{id}", acces: Acces::Public },
    // Lectures publiques des avis
    Regle { methodes: Some(&["GET"]), motif: "/avis/etablissement/**", acces: Acces::Public },
    // Zones réservées aux admins
    Regle { methodes: None, motif: "/user/**", acces: ADMIN_SEUL },
    Regle { methodes: None, motif: "/etablissements/admin/**", acces: ADMIN_SEUL },
    Regle { methodes: None, motif: "/admin/**", acces: ADMIN_SEUL },
    // Zone tuteur
    Regle { methodes: None, motif: "/tuteur/**", acces: TUTEUR_SEUL },
    // Écritures d'avis : tout rôle authentifié
    // (PUT /avis/** est réservé dans la table mais aucun handler n'existe)
    Regle { methodes: Some(&["POST", "PUT", "DELETE"]), motif: "/avis/**", acces: TOUT_ROLE },
];

fn segments(chemin: &str) -> Vec<&str> {
    chemin.split('/').filter(|s| !s.is_empty()).collect()
}

/// Correspondance segment par segment : littéral, {x} (un segment),
/// ** terminal (zéro ou plusieurs segments)
fn motif_correspond(motif: &str, chemin: &str) -> bool {
    let motif_segs = segments(motif);
    let chemin_segs = segments(chemin);

    let (prefixe, ouvert) = match motif_segs.last() {
        Some(&"**") => (&motif_segs[..motif_segs.len() - 1], true),
        _ => (&motif_segs[..], false),
    };

    if ouvert {
        if chemin_segs.len() < prefixe.len() {
            return false;
        }
    } else if chemin_segs.len() != prefixe.len() {
        return false;
    }

    prefixe.iter().zip(chemin_segs.iter()).all(|(m, c)| {
        (m.starts_with('{') && m.ends_with('}')) || m == c
    })
}

/// Résout l'accès requis pour une requête. Aucune règle ne correspond :
/// tout rôle authentifié suffit.
pub fn acces_requis(methode: &Method, chemin: &str) -> Acces {
    for regle in REGLES {
        if let Some(methodes) = regle.methodes {
            if !methodes.contains(&methode.as_str()) {
                continue;
            }
        }
        if motif_correspond(regle.motif, chemin) {
            return regle.acces;
        }
    }
    Acces::Authentifie
}

/// Extrait et vérifie le bearer token; toutes les causes d'échec
/// (absent, malformé, signature, expiration) se confondent
fn extraire_identite(req: &ServiceRequest) -> Option<AuthUser> {
    let header = req.headers().get(header::AUTHORIZATION)?;
    let valeur = header.to_str().ok()?;
    let token = valeur.strip_prefix("Bearer ")?;
    let claims = jwt::verify_token(token).ok()?;
    let role = Role::parse(&claims.role)?;

    Some(AuthUser {
        user_id: claims.user_id,
        email: claims.sub,
        role,
    })
}

/// Middleware appliqué à toutes les routes : authentifie, autorise,
/// et attache l'identité vérifiée à la requête pour les handlers.
pub async fn access_gate(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let acces = acces_requis(req.method(), req.path());
    let identite = extraire_identite(&req);

    match acces {
        Acces::Public => {
            // Identité attachée si un token valide est présent, jamais exigée
            if let Some(utilisateur) = identite {
                req.extensions_mut().insert(utilisateur);
            }
        }
        Acces::Authentifie => match identite {
            Some(utilisateur) => {
                req.extensions_mut().insert(utilisateur);
            }
            None => {
                return Err(AppError::Unauthenticated("Authentification requise".to_string()).into());
            }
        },
        Acces::Roles(roles) => match identite {
            Some(utilisateur) if roles.contains(&utilisateur.role) => {
                req.extensions_mut().insert(utilisateur);
            }
            Some(utilisateur) => {
                tracing::debug!(
                    "accès refusé: rôle {} sur {} {}",
                    utilisateur.role.as_str(),
                    req.method(),
                    req.path()
                );
                return Err(AppError::Unauthorized("Accès refusé pour ce rôle".to_string()).into());
            }
            None => {
                return Err(AppError::Unauthenticated("Authentification requise".to_string()).into());
            }
        },
    }

    next.call(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{middleware::from_fn, test as actix_test, web, App, HttpResponse};

    #[test]
    fn test_motif_correspond() {
        assert!(motif_correspond("/etablissements", "/etablissements"));
        assert!(motif_correspond("/etablissements/{id}", "/etablissements/3"));
        assert!(!motif_correspond("/etablissements/{id}", "/etablissements/3/avis"));
        assert!(motif_correspond("/avis/etablissement/**", "/avis/etablissement"));
        assert!(motif_correspond("/avis/etablissement/**", "/avis/etablissement/3"));
        assert!(motif_correspond("/tuteur/**", "/tuteur"));
        assert!(motif_correspond("/tuteur/**", "/tuteur/etablissement/5"));
        assert!(!motif_correspond("/tuteur/**", "/tuteurs"));
        assert!(motif_correspond("/**", "/n/importe/quoi"));
    }

    #[test]
    fn test_lectures_publiques() {
        assert_eq!(acces_requis(&Method::GET, "/etablissements"), Acces::Public);
        assert_eq!(acces_requis(&Method::GET, "/etablissements/3"), Acces::Public);
        assert_eq!(acces_requis(&Method::GET, "/services"), Acces::Public);
        assert_eq!(acces_requis(&Method::GET, "/services/2"), Acces::Public);
        assert_eq!(acces_requis(&Method::GET, "/avis/etablissement/3"), Acces::Public);
        assert_eq!(acces_requis(&Method::POST, "/auth/login"), Acces::Public);
        assert_eq!(
            acces_requis(&Method::GET, "/etablissements/admin/en-attente"),
            Acces::Public
        );
    }

    #[test]
    fn test_zones_admin() {
        assert_eq!(acces_requis(&Method::GET, "/etablissements/admin"), ADMIN_SEUL);
        assert_eq!(acces_requis(&Method::GET, "/etablissements/admin/3"), ADMIN_SEUL);
        assert_eq!(
            acces_requis(&Method::PUT, "/etablissements/admin/3/valider"),
            ADMIN_SEUL
        );
        assert_eq!(acces_requis(&Method::DELETE, "/admin/avis/4"), ADMIN_SEUL);
        assert_eq!(acces_requis(&Method::GET, "/user/all"), ADMIN_SEUL);
        assert_eq!(acces_requis(&Method::POST, "/services/create"), ADMIN_SEUL);
        assert_eq!(acces_requis(&Method::DELETE, "/services/2/delete"), ADMIN_SEUL);
    }

    #[test]
    fn test_zone_tuteur() {
        assert_eq!(acces_requis(&Method::POST, "/tuteur/etablissement"), TUTEUR_SEUL);
        assert_eq!(acces_requis(&Method::GET, "/tuteur/etablissement"), TUTEUR_SEUL);
        assert_eq!(
            acces_requis(&Method::PUT, "/tuteur/etablissement/3"),
            TUTEUR_SEUL
        );
    }

    #[test]
    fn test_ecritures_avis_tout_role() {
        assert_eq!(acces_requis(&Method::POST, "/avis"), TOUT_ROLE);
        assert_eq!(acces_requis(&Method::PUT, "/avis/9"), TOUT_ROLE);
        assert_eq!(acces_requis(&Method::DELETE, "/avis/9"), TOUT_ROLE);
    }

    #[test]
    fn test_defaut_authentifie() {
        // Chemin hors table : n'importe quel rôle authentifié
        assert_eq!(acces_requis(&Method::GET, "/avis/utilisateur/5"), Acces::Authentifie);
        assert_eq!(acces_requis(&Method::GET, "/inconnu"), Acces::Authentifie);
    }

    async fn ok_handler() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_gate_bloque_sans_token() {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(access_gate))
                .route("/etablissements/admin", web::get().to(ok_handler)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/etablissements/admin")
            .to_request();
        let resp = match actix_test::try_call_service(&app, req).await {
            Ok(_) => panic!("attendu une erreur du gate"),
            Err(err) => err.error_response(),
        };
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_gate_refuse_mauvais_role() {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(access_gate))
                .route("/etablissements/admin", web::get().to(ok_handler)),
        )
        .await;

        let token = jwt::generate_token("tuteur@exemple.sn", "TUTEUR", 7).unwrap();
        let req = actix_test::TestRequest::get()
            .uri("/etablissements/admin")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = match actix_test::try_call_service(&app, req).await {
            Ok(_) => panic!("attendu une erreur du gate"),
            Err(err) => err.error_response(),
        };
        assert_eq!(resp.status(), 403);
    }

    #[actix_web::test]
    async fn test_gate_laisse_passer_admin() {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(access_gate))
                .route("/etablissements/admin", web::get().to(ok_handler)),
        )
        .await;

        let token = jwt::generate_token("admin@exemple.sn", "ADMIN", 1).unwrap();
        let req = actix_test::TestRequest::get()
            .uri("/etablissements/admin")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn test_gate_public_sans_token() {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(access_gate))
                .route("/etablissements", web::get().to(ok_handler)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/etablissements").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn test_gate_token_invalide() {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(access_gate))
                .route("/tuteur/etablissement", web::get().to(ok_handler)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/tuteur/etablissement")
            .insert_header((header::AUTHORIZATION, "Bearer pas.un.token"))
            .to_request();
        let resp = match actix_test::try_call_service(&app, req).await {
            Ok(_) => panic!("attendu une erreur du gate"),
            Err(err) => err.error_response(),
        };
        assert_eq!(resp.status(), 401);
    }
}
