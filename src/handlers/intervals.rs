use super::{AppState, blocking};
use crate::{Result, reader::VariantReader, types::IntervalsQuery};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};

/// Serve a dataset as a Picard interval list
pub async fn get_intervals(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<IntervalsQuery>,
) -> Result<Response> {
    let locator = state.storage.resolve(&id)?;
    let include_filtered = query.include_filtered;

    let list = blocking(move || VariantReader::interval_list(&locator, include_filtered)).await?;

    let mut body = Vec::new();
    list.write_to(&mut body)?;

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response())
}
