use serde::de::DeserializeOwned;

use crate::error::Error;

/// Claims carried by an access token. Tokens are issued elsewhere; this service only checks them.
pub trait Payload: DeserializeOwned {
    /// Id of the authenticated user, as written by the issuer.
    fn user(&self) -> &str;
}

pub trait Tokener<P: Payload> {
    fn verify_token(&self, token: &str) -> Result<P, Error>;
}
