//! Request-scoped access to matched path parameters.
//!
//! The middleware inserts the captured [`Params`] into the request's
//! extensions before the bound handler runs. Extensions belong to a single
//! request, so parameters never leak between concurrent requests.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Extensions;

use crate::routing::Params;

/// Read the parameter `name` from a request's extensions.
///
/// Returns an empty string when the parameter does not exist, including
/// when the request was never routed.
pub fn param<'a>(extensions: &'a Extensions, name: &str) -> &'a str {
    extensions
        .get::<Params>()
        .map_or("", |params| params.by_name(name))
}

/// Extractor for the parameters captured by the router.
///
/// Never rejects: an unrouted request yields an empty set.
#[derive(Debug, Clone, Default)]
pub struct RouteParams(pub Params);

impl<S> FromRequestParts<S> for RouteParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RouteParams(
            parts.extensions.get::<Params>().cloned().unwrap_or_default(),
        ))
    }
}
