// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table PostgreSQL avec SeaORM.
//
// Liste des modules:
//   - deal : Ventes (client, montant, profit, statut)
//   - trading_deal : Opérations de trading avec champs dérivés par plateforme
//   - users : Utilisateurs (created_by des deux tables pointe ici)
//   - dto : Data Transfer Objects pour les requêtes/réponses API
//
// Points d'attention:
//   - Les montants sont des Decimal (jamais de f64 côté BD)
//   - created_at est assigné par la BD (DEFAULT CURRENT_TIMESTAMP)
//   - Les champs dérivés de trading_deal ne viennent JAMAIS du client,
//     ils sortent toujours de services::formula
//
// ============================================================================

pub mod deal;
pub mod dto;
pub mod trading_deal;
pub mod users;
