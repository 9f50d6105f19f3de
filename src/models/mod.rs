// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table PostgreSQL avec SeaORM.
//
// Liste des modules:
//   - utilisateur : Utilisateurs (STANDARD, TUTEUR, ADMIN) avec rôle aplati
//   - etablissement : Établissements de santé et leur statut de modération
//   - service : Catalogue des services offerts (Pédiatrie, etc.)
//   - etablissement_service : Jonction établissement <-> service
//   - admin_etablissement : Jonction administrateur <-> établissement
//   - avis : Avis notés laissés par les utilisateurs
//   - dto : Data Transfer Objects pour les requêtes/réponses API
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut)
//   - Les enums (role, statut, type) sont stockés en chaînes
//   - Les relations many-to-many passent par des entités de jonction
//
// ============================================================================

pub mod utilisateur;
pub mod etablissement;
pub mod service;
pub mod etablissement_service;
pub mod admin_etablissement;
pub mod avis;
pub mod dto;
