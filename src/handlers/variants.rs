use super::{AppState, blocking};
use crate::{
    Error, Result,
    reader::VariantReader,
    record::VariantRecord,
    types::{VariantsQuery, VariantsResponse},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use noodles::core::{Position, Region};

pub async fn get_variants(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<VariantsQuery>,
) -> Result<Json<VariantsResponse>> {
    let locator = state.storage.resolve(&id)?;
    let region = query_region(&query)?;

    let response = blocking(move || {
        // A region query needs an index; a whole-file scan does not.
        let mut reader = VariantReader::builder(locator)
            .require_index(region.is_some())
            .open()?;

        let records = match &region {
            Some(region) => reader.query(region)?.collect::<Result<Vec<VariantRecord>>>()?,
            None => reader.records()?.collect::<Result<Vec<VariantRecord>>>()?,
        };
        let format = reader.strategy();
        reader.close()?;

        Ok(VariantsResponse { format, records })
    })
    .await?;

    Ok(Json(response))
}

/// Convert htsget-style coordinates (0-based start, exclusive end) into a
/// noodles region.
fn query_region(query: &VariantsQuery) -> Result<Option<Region>> {
    let Some(reference_name) = &query.reference_name else {
        if query.start.is_some() || query.end.is_some() {
            return Err(Error::InvalidInput(
                "start and end require referenceName".to_string(),
            ));
        }
        return Ok(None);
    };

    let start = query
        .start
        .map(|s| {
            usize::try_from(s)
                .ok()
                .and_then(|s| s.checked_add(1))
                .and_then(|s| Position::try_from(s).ok())
                .ok_or_else(|| Error::InvalidRegion(format!("invalid start position: {}", s)))
        })
        .transpose()?
        .unwrap_or(Position::MIN);

    let end = query
        .end
        .map(|e| {
            usize::try_from(e)
                .ok()
                .and_then(|e| Position::try_from(e).ok())
                .ok_or_else(|| Error::InvalidRegion(format!("invalid end position: {}", e)))
        })
        .transpose()?
        .unwrap_or(Position::MAX);

    if end < start {
        return Err(Error::InvalidRegion(format!(
            "{}:{}-{} ends before it starts",
            reference_name, start, end
        )));
    }

    Ok(Some(Region::new(reference_name.as_str(), start..=end)))
}
