//! Custom extractors
//!
//! Provides a JSON body extractor that runs DTO validation before the
//! handler sees the record.

use crate::error::ServerError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use vehicletype_core::{KindAttrs, Vehicle, VehicleDraft};

/// JSON body parsed as a draft of kind `A` and validated into a record
pub struct ValidatedJson<A>(pub Vehicle<A>);

#[axum::async_trait]
impl<S, A> FromRequest<S> for ValidatedJson<A>
where
    A: KindAttrs,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(draft) = Json::<VehicleDraft<A>>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        draft.validate().map(Self).map_err(ServerError::Validation)
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ServerError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        _ => format!("Failed to parse JSON: {}", rejection.body_text()),
    };
    ServerError::MalformedBody(message)
}
