use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "utilisateur")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_utilisateur: i32,
    pub nom: String,
    pub prenom: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)] // Ne jamais exposer le hash en JSON
    pub mot_de_passe: String, // Format: pbkdf2:sha256:iterations$salt$hash
    pub role: Role,
    pub est_actif: bool,
}

/// Rôle unique par utilisateur, immuable après l'inscription.
/// Un TUTEUR possède au plus un établissement, un ADMIN modère.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "STANDARD")]
    Standard,
    #[sea_orm(string_value = "TUTEUR")]
    Tuteur,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "STANDARD" => Some(Role::Standard),
            "TUTEUR" => Some(Role::Tuteur),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Standard => "STANDARD",
            Role::Tuteur => "TUTEUR",
            Role::Admin => "ADMIN",
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::etablissement::Entity")]
    Etablissement,

    #[sea_orm(has_many = "super::avis::Entity")]
    Avis,
}

impl Related<super::etablissement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Etablissement.def()
    }
}

impl Related<super::avis::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Avis.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("TUTEUR"), Some(Role::Tuteur));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("tuteur"), None);
        assert_eq!(Role::parse("SUPERADMIN"), None);
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Standard, Role::Tuteur, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }
}
