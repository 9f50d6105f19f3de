use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "etablissement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_etablissement: i32,
    pub nom: String,
    pub adresse: String,
    pub localisation: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub type_etablissement: TypeEtablissement,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub statut: Statut,
    // Tuteur propriétaire : au plus un établissement par tuteur,
    // invariant tenu par le service de cycle de vie
    pub id_tuteur: Option<i32>,
}

/// Statut de modération : EN_ATTENTE à la création, VALIDE/REJETE par un admin,
/// retour à EN_ATTENTE lors d'une re-soumission après rejet
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Statut {
    #[sea_orm(string_value = "EN_ATTENTE")]
    EnAttente,
    #[sea_orm(string_value = "VALIDE")]
    Valide,
    #[sea_orm(string_value = "REJETE")]
    Rejete,
}

impl Statut {
    pub fn as_str(&self) -> &'static str {
        match self {
            Statut::EnAttente => "EN_ATTENTE",
            Statut::Valide => "VALIDE",
            Statut::Rejete => "REJETE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeEtablissement {
    #[sea_orm(string_value = "HOPITAL")]
    Hopital,
    #[sea_orm(string_value = "CLINIQUE")]
    Clinique,
    #[sea_orm(string_value = "CENTRE_SANTE")]
    CentreSante,
    #[sea_orm(string_value = "PHARMACIE")]
    Pharmacie,
    #[sea_orm(string_value = "LABORATOIRE")]
    Laboratoire,
    #[sea_orm(string_value = "CABINET_MEDICAL")]
    CabinetMedical,
}

impl TypeEtablissement {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "HOPITAL" => Some(Self::Hopital),
            "CLINIQUE" => Some(Self::Clinique),
            "CENTRE_SANTE" => Some(Self::CentreSante),
            "PHARMACIE" => Some(Self::Pharmacie),
            "LABORATOIRE" => Some(Self::Laboratoire),
            "CABINET_MEDICAL" => Some(Self::CabinetMedical),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::utilisateur::Entity",
        from = "Column::IdTuteur",
        to = "super::utilisateur::Column::IdUtilisateur"
    )]
    Tuteur,

    #[sea_orm(has_many = "super::avis::Entity")]
    Avis,
}

impl Related<super::utilisateur::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tuteur.def()
    }
}

impl Related<super::avis::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Avis.def()
    }
}

// Many-to-many etablissement <-> service via la table de jonction
impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        super::etablissement_service::Relation::Service.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::etablissement_service::Relation::Etablissement.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
