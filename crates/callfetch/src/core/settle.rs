use serde_json::Value;

use crate::data::callbacks::BodyHook;
use crate::data::{ErrorResponse, FetchOutcome, Response, Stage, SuccessResponse};
use crate::error::{Error, Result};

/// Branch stage: pick the outcome from `response.ok()` and run exactly one
/// body hook.
///
/// `after_data` is carried into whichever outcome is built, unchanged.
pub(crate) fn settle<T, E, A>(
    response: Response,
    json: Value,
    after_data: Option<A>,
    on_success: BodyHook<T>,
    on_error: BodyHook<E>,
) -> Result<FetchOutcome<T, E, A>> {
    if response.ok() {
        let data = on_success(&response, json).map_err(Error::hook(Stage::OnSuccess))?;
        Ok(FetchOutcome::Success(SuccessResponse {
            response,
            data,
            after_data,
        }))
    } else {
        let data = on_error(&response, json).map_err(Error::hook(Stage::OnError))?;
        Ok(FetchOutcome::Error(ErrorResponse {
            response,
            data,
            after_data,
        }))
    }
}
