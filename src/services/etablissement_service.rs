use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::collections::{HashMap, HashSet};

use crate::errors::AppError;
use crate::models::dto::{
    CreateEtablissementRequest, EtablissementAdminDTO, EtablissementPublicDTO, ServiceDTO,
    UtilisateurDTO,
};
use crate::models::{
    admin_etablissement, etablissement,
    etablissement::{Statut, TypeEtablissement},
    etablissement_service, service, utilisateur,
    utilisateur::Role,
};
use crate::services::avis_service::AvisService;

/// Cycle de vie d'un établissement : EN_ATTENTE à la création par un tuteur,
/// VALIDE ou REJETE par un admin, re-soumission possible après rejet.
/// Invariant tenu ici : au plus un établissement par tuteur.
pub struct EtablissementService;

/// Champs communs validés pour create/update
struct ChampsValides {
    type_etablissement: TypeEtablissement,
    adresse: String,
    service_ids: Vec<i32>,
}

impl EtablissementService {
    /// Crée l'établissement d'un tuteur, ou re-soumet l'existant s'il a été rejeté.
    /// Un établissement EN_ATTENTE ou VALIDE existant fait échouer l'appel.
    pub async fn create(
        db: &DatabaseConnection,
        tuteur_id: i32,
        request: CreateEtablissementRequest,
    ) -> Result<etablissement::Model, AppError> {
        // 1. Le tuteur doit exister avec le rôle TUTEUR
        let tuteur = utilisateur::Entity::find_by_id(tuteur_id)
            .one(db)
            .await?
            .filter(|u| u.role == Role::Tuteur)
            .ok_or_else(|| AppError::NotFound("Tuteur non trouvé".to_string()))?;

        // 2. Au plus un établissement par tuteur
        let existant = etablissement::Entity::find()
            .filter(etablissement::Column::IdTuteur.eq(tuteur_id))
            .one(db)
            .await?;

        if let Some(ref etab) = existant {
            if etab.statut != Statut::Rejete {
                return Err(AppError::Conflict(format!(
                    "Ce tuteur a déjà un établissement {}. Utilisez la mise à jour pour modifier l'établissement existant.",
                    etab.statut.as_str()
                )));
            }
        }

        // 3. Validation des champs et résolution des services référencés
        let champs = Self::valider_champs(db, &request).await?;

        match existant {
            // 4a. Re-soumission : tout est écrasé, statut de retour à EN_ATTENTE
            Some(etab) => {
                let txn = db.begin().await?;

                let id = etab.id_etablissement;
                let mut actif: etablissement::ActiveModel = etab.into();
                actif.nom = Set(request.nom.clone());
                actif.adresse = Set(champs.adresse.clone());
                actif.localisation = Set(champs.adresse.clone());
                actif.telephone = Set(request.telephone.clone());
                actif.email = Set(request.email.clone());
                actif.description = Set(request.description.clone());
                actif.type_etablissement = Set(champs.type_etablissement);
                actif.latitude = Set(request.latitude);
                actif.longitude = Set(request.longitude);
                actif.statut = Set(Statut::EnAttente);
                let mis_a_jour = actif.update(&txn).await?;

                Self::remplacer_services(&txn, id, &champs.service_ids).await?;

                txn.commit().await?;
                tracing::info!("établissement {} re-soumis par le tuteur {}", id, tuteur_id);
                Ok(mis_a_jour)
            }
            // 4b. Première soumission
            None => {
                let txn = db.begin().await?;

                let nouveau = etablissement::ActiveModel {
                    nom: Set(request.nom.clone()),
                    adresse: Set(champs.adresse.clone()),
                    localisation: Set(champs.adresse.clone()),
                    telephone: Set(request.telephone.clone()),
                    email: Set(request.email.clone()),
                    description: Set(request.description.clone()),
                    type_etablissement: Set(champs.type_etablissement),
                    latitude: Set(request.latitude),
                    longitude: Set(request.longitude),
                    statut: Set(Statut::EnAttente),
                    id_tuteur: Set(Some(tuteur.id_utilisateur)),
                    ..Default::default()
                };
                let insere = nouveau.insert(&txn).await?;

                if !champs.service_ids.is_empty() {
                    let liens: Vec<etablissement_service::ActiveModel> = champs
                        .service_ids
                        .iter()
                        .map(|&sid| etablissement_service::ActiveModel {
                            id_etablissement: Set(insere.id_etablissement),
                            id_service: Set(sid),
                        })
                        .collect();
                    etablissement_service::Entity::insert_many(liens)
                        .exec(&txn)
                        .await?;
                }

                txn.commit().await?;
                tracing::info!(
                    "établissement {} créé par le tuteur {}, en attente de validation",
                    insere.id_etablissement,
                    tuteur_id
                );
                Ok(insere)
            }
        }
    }

    /// Mise à jour par le tuteur propriétaire. Le statut n'est pas touché :
    /// seules les transitions admin et la re-soumission le modifient.
    pub async fn update(
        db: &DatabaseConnection,
        etablissement_id: i32,
        tuteur_id: i32,
        request: CreateEtablissementRequest,
    ) -> Result<etablissement::Model, AppError> {
        let etab = etablissement::Entity::find_by_id(etablissement_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Établissement non trouvé".to_string()))?;

        // Contrôle de propriété, indépendant du contrôle de rôle du gate
        if etab.id_tuteur != Some(tuteur_id) {
            return Err(AppError::Unauthorized(
                "Non autorisé à modifier cet établissement".to_string(),
            ));
        }

        let champs = Self::valider_champs(db, &request).await?;

        let txn = db.begin().await?;

        let id = etab.id_etablissement;
        let mut actif: etablissement::ActiveModel = etab.into();
        actif.nom = Set(request.nom.clone());
        actif.adresse = Set(champs.adresse.clone());
        actif.localisation = Set(champs.adresse.clone());
        actif.telephone = Set(request.telephone.clone());
        actif.email = Set(request.email.clone());
        actif.description = Set(request.description.clone());
        actif.type_etablissement = Set(champs.type_etablissement);
        actif.latitude = Set(request.latitude);
        actif.longitude = Set(request.longitude);
        let mis_a_jour = actif.update(&txn).await?;

        Self::remplacer_services(&txn, id, &champs.service_ids).await?;

        txn.commit().await?;
        Ok(mis_a_jour)
    }

    /// Transition admin EN_ATTENTE/REJETE -> VALIDE (idempotente si déjà VALIDE)
    pub async fn valider(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
        Self::changer_statut(db, id, Statut::Valide).await
    }

    /// Transition admin -> REJETE (idempotente si déjà REJETE)
    pub async fn rejeter(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
        Self::changer_statut(db, id, Statut::Rejete).await
    }

    async fn changer_statut(
        db: &DatabaseConnection,
        id: i32,
        statut: Statut,
    ) -> Result<(), AppError> {
        let etab = etablissement::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Établissement non trouvé".to_string()))?;

        let txn = db.begin().await?;
        let mut actif: etablissement::ActiveModel = etab.into();
        actif.statut = Set(statut);
        actif.update(&txn).await?;
        txn.commit().await?;

        tracing::info!("établissement {} passé au statut {}", id, statut.as_str());
        Ok(())
    }

    /// Suppression inconditionnelle : avis, liens de services et liens
    /// d'administrateurs partent avec la ligne, dans la même transaction.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
        let txn = db.begin().await?;

        AvisService::delete_by_etablissement(&txn, id).await?;

        etablissement_service::Entity::delete_many()
            .filter(etablissement_service::Column::IdEtablissement.eq(id))
            .exec(&txn)
            .await?;

        admin_etablissement::Entity::delete_many()
            .filter(admin_etablissement::Column::IdEtablissement.eq(id))
            .exec(&txn)
            .await?;

        etablissement::Entity::delete_many()
            .filter(etablissement::Column::IdEtablissement.eq(id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        tracing::info!("établissement {} supprimé avec ses avis", id);
        Ok(())
    }

    /// Listing public : seuls les établissements VALIDE sont visibles
    pub async fn get_all_public(
        db: &DatabaseConnection,
    ) -> Result<Vec<EtablissementPublicDTO>, AppError> {
        let etabs = etablissement::Entity::find()
            .filter(etablissement::Column::Statut.eq(Statut::Valide))
            .all(db)
            .await?;

        if etabs.is_empty() {
            return Ok(Vec::new());
        }

        let services = Self::charger_services(db, &etabs).await?;
        let tuteurs = Self::charger_tuteurs(db, &etabs).await?;

        Ok(etabs
            .into_iter()
            .map(|e| Self::vers_public_dto(e, &services, &tuteurs))
            .collect())
    }

    /// Détail public : un établissement non VALIDE existe mais n'est pas accessible
    pub async fn get_public_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<EtablissementPublicDTO, AppError> {
        let etab = etablissement::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Établissement non trouvé".to_string()))?;

        if etab.statut != Statut::Valide {
            return Err(AppError::NotFound("Établissement non accessible".to_string()));
        }

        let services = Self::charger_services(db, std::slice::from_ref(&etab)).await?;
        let tuteurs = Self::charger_tuteurs(db, std::slice::from_ref(&etab)).await?;

        Ok(Self::vers_public_dto(etab, &services, &tuteurs))
    }

    /// Listing admin : tous les statuts
    pub async fn get_all_admin(
        db: &DatabaseConnection,
    ) -> Result<Vec<EtablissementAdminDTO>, AppError> {
        let etabs = etablissement::Entity::find().all(db).await?;
        Self::vers_admin_dtos(db, etabs).await
    }

    /// Détail admin, tous statuts confondus
    pub async fn get_admin_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<EtablissementAdminDTO, AppError> {
        let etab = etablissement::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Établissement non trouvé".to_string()))?;

        let mut dtos = Self::vers_admin_dtos(db, vec![etab]).await?;
        Ok(dtos.remove(0))
    }

    /// File de modération : uniquement les EN_ATTENTE
    pub async fn get_en_attente(
        db: &DatabaseConnection,
    ) -> Result<Vec<EtablissementAdminDTO>, AppError> {
        let etabs = etablissement::Entity::find()
            .filter(etablissement::Column::Statut.eq(Statut::EnAttente))
            .all(db)
            .await?;
        Self::vers_admin_dtos(db, etabs).await
    }

    /// L'établissement du tuteur, quel que soit son statut
    pub async fn get_my_etablissement(
        db: &DatabaseConnection,
        tuteur_id: i32,
    ) -> Result<EtablissementPublicDTO, AppError> {
        let etab = etablissement::Entity::find()
            .filter(etablissement::Column::IdTuteur.eq(tuteur_id))
            .one(db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Aucun établissement trouvé pour ce tuteur".to_string())
            })?;

        let services = Self::charger_services(db, std::slice::from_ref(&etab)).await?;
        let tuteurs = Self::charger_tuteurs(db, std::slice::from_ref(&etab)).await?;

        Ok(Self::vers_public_dto(etab, &services, &tuteurs))
    }

    // ------------------------------------------------------------------
    // Validation et assemblage
    // ------------------------------------------------------------------

    /// Type connu, adresse/localisation non vide, services référencés existants
    async fn valider_champs(
        db: &DatabaseConnection,
        request: &CreateEtablissementRequest,
    ) -> Result<ChampsValides, AppError> {
        let type_etablissement = TypeEtablissement::parse(&request.type_etablissement)
            .ok_or_else(|| AppError::Validation("Type d'établissement invalide".to_string()))?;

        // La localisation prime sur l'adresse; l'une des deux est obligatoire
        let adresse = request
            .localisation
            .clone()
            .or_else(|| request.adresse.clone())
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation("L'adresse ou la localisation est obligatoire".to_string())
            })?;

        let service_ids = request.service_ids.clone().unwrap_or_default();
        for sid in &service_ids {
            service::Entity::find_by_id(*sid)
                .one(db)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Service non trouvé: {}", sid)))?;
        }

        Ok(ChampsValides {
            type_etablissement,
            adresse,
            service_ids,
        })
    }

    /// Remplacement en bloc de l'ensemble des services (clear puis re-add)
    async fn remplacer_services<C: sea_orm::ConnectionTrait>(
        conn: &C,
        etablissement_id: i32,
        service_ids: &[i32],
    ) -> Result<(), AppError> {
        etablissement_service::Entity::delete_many()
            .filter(etablissement_service::Column::IdEtablissement.eq(etablissement_id))
            .exec(conn)
            .await?;

        if !service_ids.is_empty() {
            let liens: Vec<etablissement_service::ActiveModel> = service_ids
                .iter()
                .map(|&sid| etablissement_service::ActiveModel {
                    id_etablissement: Set(etablissement_id),
                    id_service: Set(sid),
                })
                .collect();
            etablissement_service::Entity::insert_many(liens)
                .exec(conn)
                .await?;
        }

        Ok(())
    }

    /// Services de chaque établissement, dérivés de la table de jonction
    async fn charger_services(
        db: &DatabaseConnection,
        etabs: &[etablissement::Model],
    ) -> Result<HashMap<i32, Vec<ServiceDTO>>, AppError> {
        let ids: Vec<i32> = etabs.iter().map(|e| e.id_etablissement).collect();

        let liens = etablissement_service::Entity::find()
            .filter(etablissement_service::Column::IdEtablissement.is_in(ids))
            .all(db)
            .await?;

        let service_ids: Vec<i32> = liens
            .iter()
            .map(|l| l.id_service)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let services: HashMap<i32, service::Model> = service::Entity::find()
            .filter(service::Column::IdService.is_in(service_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id_service, s))
            .collect();

        let mut par_etablissement: HashMap<i32, Vec<ServiceDTO>> = HashMap::new();
        for lien in liens {
            if let Some(s) = services.get(&lien.id_service) {
                par_etablissement
                    .entry(lien.id_etablissement)
                    .or_default()
                    .push(ServiceDTO {
                        id: s.id_service,
                        nom: s.nom.clone(),
                        description: s.description.clone(),
                    });
            }
        }

        Ok(par_etablissement)
    }

    /// Tuteurs propriétaires, chargés en une requête
    async fn charger_tuteurs(
        db: &DatabaseConnection,
        etabs: &[etablissement::Model],
    ) -> Result<HashMap<i32, utilisateur::Model>, AppError> {
        let ids: Vec<i32> = etabs.iter().filter_map(|e| e.id_tuteur).collect();

        let tuteurs = utilisateur::Entity::find()
            .filter(utilisateur::Column::IdUtilisateur.is_in(ids))
            .all(db)
            .await?;

        Ok(tuteurs.into_iter().map(|t| (t.id_utilisateur, t)).collect())
    }

    /// Administrateurs rattachés, dérivés de la table de jonction
    async fn charger_administrateurs(
        db: &DatabaseConnection,
        etabs: &[etablissement::Model],
    ) -> Result<HashMap<i32, Vec<UtilisateurDTO>>, AppError> {
        let ids: Vec<i32> = etabs.iter().map(|e| e.id_etablissement).collect();

        let liens = admin_etablissement::Entity::find()
            .filter(admin_etablissement::Column::IdEtablissement.is_in(ids))
            .all(db)
            .await?;

        let admin_ids: Vec<i32> = liens
            .iter()
            .map(|l| l.id_admin)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let admins: HashMap<i32, utilisateur::Model> = utilisateur::Entity::find()
            .filter(utilisateur::Column::IdUtilisateur.is_in(admin_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|a| (a.id_utilisateur, a))
            .collect();

        let mut par_etablissement: HashMap<i32, Vec<UtilisateurDTO>> = HashMap::new();
        for lien in liens {
            if let Some(a) = admins.get(&lien.id_admin) {
                par_etablissement
                    .entry(lien.id_etablissement)
                    .or_default()
                    .push(UtilisateurDTO::from(a.clone()));
            }
        }

        Ok(par_etablissement)
    }

    fn vers_public_dto(
        etab: etablissement::Model,
        services: &HashMap<i32, Vec<ServiceDTO>>,
        tuteurs: &HashMap<i32, utilisateur::Model>,
    ) -> EtablissementPublicDTO {
        let tuteur = etab.id_tuteur.and_then(|id| tuteurs.get(&id));

        EtablissementPublicDTO {
            id: etab.id_etablissement,
            nom: etab.nom,
            localisation: etab.localisation,
            statut: etab.statut.as_str().to_string(),
            tuteur_nom: tuteur.map(|t| t.nom.clone()),
            tuteur_prenom: tuteur.map(|t| t.prenom.clone()),
            latitude: etab.latitude,
            longitude: etab.longitude,
            services: services
                .get(&etab.id_etablissement)
                .cloned()
                .unwrap_or_default(),
        }
    }

    async fn vers_admin_dtos(
        db: &DatabaseConnection,
        etabs: Vec<etablissement::Model>,
    ) -> Result<Vec<EtablissementAdminDTO>, AppError> {
        if etabs.is_empty() {
            return Ok(Vec::new());
        }

        let services = Self::charger_services(db, &etabs).await?;
        let tuteurs = Self::charger_tuteurs(db, &etabs).await?;
        let administrateurs = Self::charger_administrateurs(db, &etabs).await?;

        Ok(etabs
            .into_iter()
            .map(|etab| {
                let tuteur = etab
                    .id_tuteur
                    .and_then(|id| tuteurs.get(&id))
                    .map(|t| UtilisateurDTO::from(t.clone()));

                EtablissementAdminDTO {
                    id: etab.id_etablissement,
                    nom: etab.nom,
                    localisation: etab.localisation,
                    statut: etab.statut.as_str().to_string(),
                    latitude: etab.latitude,
                    longitude: etab.longitude,
                    tuteur,
                    administrateurs: administrateurs
                        .get(&etab.id_etablissement)
                        .cloned()
                        .unwrap_or_default(),
                    services: services
                        .get(&etab.id_etablissement)
                        .cloned()
                        .unwrap_or_default(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn tuteur(id: i32) -> utilisateur::Model {
        utilisateur::Model {
            id_utilisateur: id,
            nom: "Diop".to_string(),
            prenom: "Awa".to_string(),
            email: format!("tuteur{}@exemple.sn", id),
            mot_de_passe: "pbkdf2:sha256:260000$s$h".to_string(),
            role: Role::Tuteur,
            est_actif: true,
        }
    }

    fn etab(id: i32, tuteur_id: i32, statut: Statut) -> etablissement::Model {
        etablissement::Model {
            id_etablissement: id,
            nom: "Clinique A".to_string(),
            adresse: "Dakar".to_string(),
            localisation: "Dakar".to_string(),
            telephone: None,
            email: None,
            description: None,
            type_etablissement: TypeEtablissement::Clinique,
            latitude: None,
            longitude: None,
            statut,
            id_tuteur: Some(tuteur_id),
        }
    }

    fn svc(id: i32) -> service::Model {
        service::Model {
            id_service: id,
            nom: "Pédiatrie".to_string(),
            description: None,
        }
    }

    fn requete() -> CreateEtablissementRequest {
        CreateEtablissementRequest {
            nom: "Clinique A".to_string(),
            adresse: None,
            localisation: Some("Dakar".to_string()),
            telephone: None,
            email: None,
            description: None,
            type_etablissement: "CLINIQUE".to_string(),
            latitude: None,
            longitude: None,
            service_ids: Some(vec![1]),
        }
    }

    #[tokio::test]
    async fn test_create_premiere_soumission() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![tuteur(7)]])
            .append_query_results([Vec::<etablissement::Model>::new()])
            .append_query_results([vec![svc(1)]])
            .append_query_results([vec![etab(10, 7, Statut::EnAttente)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let cree = EtablissementService::create(&db, 7, requete()).await.unwrap();
        assert_eq!(cree.statut, Statut::EnAttente);
        assert_eq!(cree.id_tuteur, Some(7));
    }

    #[tokio::test]
    async fn test_create_conflit_si_deja_en_attente() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![tuteur(7)]])
            .append_query_results([vec![etab(10, 7, Statut::EnAttente)]])
            .into_connection();

        let err = EtablissementService::create(&db, 7, requete()).await.unwrap_err();
        match err {
            AppError::Conflict(msg) => assert!(msg.contains("EN_ATTENTE")),
            autre => panic!("attendu Conflict, obtenu {:?}", autre),
        }
    }

    #[tokio::test]
    async fn test_create_resoumission_apres_rejet() {
        let mut resoumis = etab(10, 7, Statut::EnAttente);
        resoumis.nom = "Clinique B".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![tuteur(7)]])
            .append_query_results([vec![etab(10, 7, Statut::Rejete)]])
            .append_query_results([vec![svc(1)]])
            .append_query_results([vec![resoumis]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let mut req = requete();
        req.nom = "Clinique B".to_string();
        let resultat = EtablissementService::create(&db, 7, req).await.unwrap();
        assert_eq!(resultat.statut, Statut::EnAttente);
        assert_eq!(resultat.nom, "Clinique B");
    }

    #[tokio::test]
    async fn test_create_tuteur_inconnu() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<utilisateur::Model>::new()])
            .into_connection();

        let err = EtablissementService::create(&db, 99, requete()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_type_invalide() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![tuteur(7)]])
            .append_query_results([Vec::<etablissement::Model>::new()])
            .into_connection();

        let mut req = requete();
        req.type_etablissement = "ECOLE".to_string();
        let err = EtablissementService::create(&db, 7, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_sans_adresse_ni_localisation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![tuteur(7)]])
            .append_query_results([Vec::<etablissement::Model>::new()])
            .into_connection();

        let mut req = requete();
        req.localisation = None;
        req.adresse = Some("   ".to_string());
        let err = EtablissementService::create(&db, 7, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_service_reference_inconnu() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![tuteur(7)]])
            .append_query_results([Vec::<etablissement::Model>::new()])
            .append_query_results([Vec::<service::Model>::new()])
            .into_connection();

        let err = EtablissementService::create(&db, 7, requete()).await.unwrap_err();
        match err {
            AppError::NotFound(msg) => assert!(msg.contains("Service non trouvé: 1")),
            autre => panic!("attendu NotFound, obtenu {:?}", autre),
        }
    }

    #[tokio::test]
    async fn test_update_refuse_non_proprietaire() {
        // L'établissement 3 appartient au tuteur 7, le tuteur 9 est refusé
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![etab(3, 7, Statut::Valide)]])
            .into_connection();

        let err = EtablissementService::update(&db, 3, 9, requete())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_valider_etablissement_inconnu() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<etablissement::Model>::new()])
            .into_connection();

        let err = EtablissementService::valider(&db, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_valider_passe_au_statut_valide() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![etab(3, 7, Statut::EnAttente)]])
            .append_query_results([vec![etab(3, 7, Statut::Valide)]])
            .into_connection();

        EtablissementService::valider(&db, 3).await.unwrap();
    }

    #[tokio::test]
    async fn test_detail_public_refuse_non_valide() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![etab(3, 7, Statut::EnAttente)]])
            .into_connection();

        let err = EtablissementService::get_public_by_id(&db, 3).await.unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Établissement non accessible"),
            autre => panic!("attendu NotFound, obtenu {:?}", autre),
        }
    }

    #[tokio::test]
    async fn test_listing_public_assemble_services_et_tuteur() {
        let lien = etablissement_service::Model {
            id_etablissement: 3,
            id_service: 1,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![etab(3, 7, Statut::Valide)]])
            .append_query_results([vec![lien]])
            .append_query_results([vec![svc(1)]])
            .append_query_results([vec![tuteur(7)]])
            .into_connection();

        let dtos = EtablissementService::get_all_public(&db).await.unwrap();
        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].statut, "VALIDE");
        assert_eq!(dtos[0].tuteur_nom.as_deref(), Some("Diop"));
        assert_eq!(dtos[0].services.len(), 1);
        assert_eq!(dtos[0].services[0].nom, "Pédiatrie");
    }

    #[tokio::test]
    async fn test_delete_cascade_avis_et_liens() {
        let exec = MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec.clone(), exec.clone(), exec.clone(), exec])
            .into_connection();

        EtablissementService::delete(&db, 3).await.unwrap();
    }

    #[tokio::test]
    async fn test_my_etablissement_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<etablissement::Model>::new()])
            .into_connection();

        let err = EtablissementService::get_my_etablissement(&db, 7).await.unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Aucun établissement trouvé pour ce tuteur"),
            autre => panic!("attendu NotFound, obtenu {:?}", autre),
        }
    }
}
