use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use std::collections::{HashMap, HashSet};

use crate::errors::AppError;
use crate::models::dto::{AvisDTO, CreateAvisRequest};
use crate::models::{avis, etablissement, service, utilisateur};

/// CRUD des avis : pas de machine à états, uniquement des contraintes
/// référentielles. Un avis est immuable une fois créé (pas de mise à jour).
pub struct AvisService;

impl AvisService {
    /// La note est déjà bornée [1,5] à la frontière; ici on résout
    /// l'utilisateur, l'établissement et le service, dans cet ordre
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i32,
        request: CreateAvisRequest,
    ) -> Result<avis::Model, AppError> {
        let utilisateur = utilisateur::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Utilisateur non trouvé".to_string()))?;

        let etablissement = etablissement::Entity::find_by_id(request.etablissement_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Établissement non trouvé".to_string()))?;

        let service = service::Entity::find_by_id(request.service_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Service non trouvé".to_string()))?;

        let nouvel_avis = avis::ActiveModel {
            note: Set(request.note),
            commentaire: Set(request.commentaire.clone()),
            date_creation: Set(Utc::now().naive_utc()),
            id_utilisateur: Set(Some(utilisateur.id_utilisateur)),
            id_service: Set(service.id_service),
            id_etablissement: Set(etablissement.id_etablissement),
            ..Default::default()
        };

        Ok(nouvel_avis.insert(db).await?)
    }

    /// Avis d'un établissement, dans l'ordre du stockage
    pub async fn get_by_etablissement(
        db: &DatabaseConnection,
        etablissement_id: i32,
    ) -> Result<Vec<AvisDTO>, AppError> {
        let avis_liste = avis::Entity::find()
            .filter(avis::Column::IdEtablissement.eq(etablissement_id))
            .all(db)
            .await?;

        Self::vers_dtos(db, avis_liste).await
    }

    /// Avis laissés par un utilisateur
    pub async fn get_by_utilisateur(
        db: &DatabaseConnection,
        utilisateur_id: i32,
    ) -> Result<Vec<AvisDTO>, AppError> {
        let avis_liste = avis::Entity::find()
            .filter(avis::Column::IdUtilisateur.eq(utilisateur_id))
            .all(db)
            .await?;

        Self::vers_dtos(db, avis_liste).await
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
        let existe = avis::Entity::find_by_id(id).one(db).await?;
        if existe.is_none() {
            return Err(AppError::NotFound(format!("Avis non trouvé avec l'ID: {}", id)));
        }

        avis::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    /// Suppression en bloc lors de la suppression d'un établissement.
    /// Prend une connexion générique pour s'inscrire dans la transaction
    /// du cycle de vie. No-op s'il n'existe aucun avis.
    pub async fn delete_by_etablissement<C: ConnectionTrait>(
        conn: &C,
        etablissement_id: i32,
    ) -> Result<u64, AppError> {
        let supprimes = avis::Entity::delete_many()
            .filter(avis::Column::IdEtablissement.eq(etablissement_id))
            .exec(conn)
            .await?;

        Ok(supprimes.rows_affected)
    }

    /// Le nom affiché de l'auteur est joint en une requête;
    /// absent si l'auteur a été supprimé entre temps
    async fn vers_dtos(
        db: &DatabaseConnection,
        avis_liste: Vec<avis::Model>,
    ) -> Result<Vec<AvisDTO>, AppError> {
        if avis_liste.is_empty() {
            return Ok(Vec::new());
        }

        let auteur_ids: Vec<i32> = avis_liste
            .iter()
            .filter_map(|a| a.id_utilisateur)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let auteurs: HashMap<i32, utilisateur::Model> = utilisateur::Entity::find()
            .filter(utilisateur::Column::IdUtilisateur.is_in(auteur_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id_utilisateur, u))
            .collect();

        Ok(avis_liste
            .into_iter()
            .map(|a| {
                let nom_utilisateur = a
                    .id_utilisateur
                    .and_then(|id| auteurs.get(&id))
                    .map(|u| format!("{} {}", u.nom, u.prenom));

                AvisDTO {
                    id_avis: a.id_avis,
                    commentaire: a.commentaire,
                    date_creation: a.date_creation,
                    id_etablissement: a.id_etablissement,
                    note: a.note,
                    id_service: a.id_service,
                    nom_utilisateur,
                }
            })
            .collect())
    }
}
