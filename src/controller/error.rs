use thiserror::Error;

use crate::routing::UrlError;

#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("cannot redirect to an empty URL")]
    InvalidDestination,
    #[error(transparent)]
    Url(#[from] UrlError),
}
