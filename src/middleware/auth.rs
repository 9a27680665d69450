use actix_web::{Error, FromRequest, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

/// Identité par défaut d'un déploiement mono-utilisateur.
pub const DEFAULT_USER_ID: i32 = 1;

/// Structure qui contient l'identité de l'utilisateur agissant.
/// Utilisée comme extracteur dans les routes qui créent/modifient des
/// enregistrements : les services reçoivent toujours un user_id explicite,
/// jamais une constante en dur.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Implémentation de FromRequest pour AuthUser.
/// Il n'y a pas encore d'authentification réelle devant ce service : on lit
/// le header X-User-Id si un proxy amont l'a posé, sinon on retombe sur
/// l'utilisateur par défaut.
impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get("X-User-Id")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<i32>().ok())
            .unwrap_or(DEFAULT_USER_ID);

        ready(Ok(AuthUser { user_id }))
    }
}
