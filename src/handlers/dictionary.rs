use super::{AppState, blocking};
use crate::{Result, dictionary::SequenceDictionary, reader::VariantReader};
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn get_dictionary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SequenceDictionary>> {
    let locator = state.storage.resolve(&id)?;
    let dictionary = blocking(move || VariantReader::read_sequence_dictionary(&locator)).await?;
    Ok(Json(dictionary))
}
