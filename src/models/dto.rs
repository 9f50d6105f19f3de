// DTOs pour les requêtes entrantes et les réponses structurées
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================
// Requêtes
// ============================================================

/// POST /auth/register
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Le nom est obligatoire"))]
    pub nom: String,
    #[validate(length(min = 1, message = "Le prénom est obligatoire"))]
    pub prenom: String,
    #[validate(email(message = "Email invalide"))]
    pub email: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères"))]
    pub mot_de_passe: String,
    pub role: String, // STANDARD, TUTEUR ou ADMIN
}

/// POST /auth/login
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Email invalide"))]
    pub email: String,
    pub mot_de_passe: String,
}

/// POST /tuteur/etablissement et PUT /tuteur/etablissement/{id}
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEtablissementRequest {
    #[validate(length(min = 1, message = "Le nom est obligatoire"))]
    pub nom: String,
    pub adresse: Option<String>,
    pub localisation: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_etablissement: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub service_ids: Option<Vec<i32>>,
}

/// POST /avis
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvisRequest {
    pub etablissement_id: i32,
    pub service_id: i32,
    #[validate(range(min = 1, max = 5, message = "La note doit être comprise entre 1 et 5"))]
    pub note: i32,
    pub commentaire: Option<String>,
}

/// POST /services/create
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    #[validate(length(min = 2, max = 100, message = "Le nom doit contenir entre 2 et 100 caractères"))]
    pub nom: String,
    #[validate(length(max = 500, message = "La description ne peut pas dépasser 500 caractères"))]
    pub description: Option<String>,
}

// ============================================================
// Réponses
// ============================================================

/// Réponse après login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub user_id: i32,
}

/// Réponse pour /auth/me
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: i32,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDTO {
    pub id: i32,
    pub nom: String,
    pub description: Option<String>,
}

impl From<crate::models::service::Model> for ServiceDTO {
    fn from(s: crate::models::service::Model) -> Self {
        Self {
            id: s.id_service,
            nom: s.nom,
            description: s.description,
        }
    }
}

/// Utilisateur aplati (tuteur/admin : est_actif porte le drapeau des sous-types)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilisateurDTO {
    pub id: i32,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub role: String,
    pub est_actif: bool,
}

impl From<crate::models::utilisateur::Model> for UtilisateurDTO {
    fn from(u: crate::models::utilisateur::Model) -> Self {
        Self {
            id: u.id_utilisateur,
            nom: u.nom,
            prenom: u.prenom,
            email: u.email,
            role: u.role.as_str().to_string(),
            est_actif: u.est_actif,
        }
    }
}

/// Vue publique d'un établissement (statut VALIDE uniquement)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EtablissementPublicDTO {
    pub id: i32,
    pub nom: String,
    pub localisation: String,
    pub statut: String,
    pub tuteur_nom: Option<String>,
    pub tuteur_prenom: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub services: Vec<ServiceDTO>,
}

/// Vue admin : tous statuts, tuteur complet et administrateurs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EtablissementAdminDTO {
    pub id: i32,
    pub nom: String,
    pub localisation: String,
    pub statut: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub tuteur: Option<UtilisateurDTO>,
    pub administrateurs: Vec<UtilisateurDTO>,
    pub services: Vec<ServiceDTO>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvisDTO {
    pub id_avis: i32,
    pub commentaire: Option<String>,
    pub date_creation: chrono::NaiveDateTime,
    pub id_etablissement: i32,
    pub note: i32,
    pub id_service: i32,
    // "nom prenom", absent si l'auteur a été supprimé
    pub nom_utilisateur: Option<String>,
}

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub time: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_hors_bornes_rejetee() {
        let req = CreateAvisRequest {
            etablissement_id: 1,
            service_id: 1,
            note: 6,
            commentaire: None,
        };
        assert!(req.validate().is_err());

        let req = CreateAvisRequest {
            etablissement_id: 1,
            service_id: 1,
            note: 0,
            commentaire: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_note_dans_bornes_acceptee() {
        for note in 1..=5 {
            let req = CreateAvisRequest {
                etablissement_id: 1,
                service_id: 1,
                note,
                commentaire: Some("Très bon accueil".to_string()),
            };
            assert!(req.validate().is_ok());
        }
    }

    #[test]
    fn test_nom_service_bornes() {
        let req = CreateServiceRequest {
            nom: "P".to_string(),
            description: None,
        };
        assert!(req.validate().is_err());

        let req = CreateServiceRequest {
            nom: "Pédiatrie".to_string(),
            description: Some("x".repeat(501)),
        };
        assert!(req.validate().is_err());

        let req = CreateServiceRequest {
            nom: "Pédiatrie".to_string(),
            description: Some("Soins des enfants".to_string()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_type_renomme_depuis_json() {
        let json = r#"{
            "nom": "Clinique A",
            "type": "CLINIQUE",
            "localisation": "Dakar",
            "serviceIds": [1]
        }"#;
        let req: CreateEtablissementRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.type_etablissement, "CLINIQUE");
        assert_eq!(req.service_ids, Some(vec![1]));
        assert_eq!(req.localisation.as_deref(), Some("Dakar"));
    }
}
