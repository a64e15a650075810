use crate::formats::DecodingStrategy;
use crate::record::VariantRecord;
use serde::{Deserialize, Serialize};

/// Query parameters for `GET /intervals/{id}`
#[derive(Debug, Deserialize, Default)]
pub struct IntervalsQuery {
    #[serde(rename = "includeFiltered", default)]
    pub include_filtered: bool,
}

/// Query parameters for `GET /variants/{id}`.
///
/// `start` is 0-based and `end` exclusive, as in htsget. Without a
/// `referenceName` the whole file is returned.
#[derive(Debug, Deserialize, Default)]
pub struct VariantsQuery {
    #[serde(rename = "referenceName")]
    pub reference_name: Option<String>,
    pub start: Option<u64>,
    pub end: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct VariantsResponse {
    pub format: DecodingStrategy,
    pub records: Vec<VariantRecord>,
}

/// Service info response (GA4GH service-info spec)
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub id: String,
    pub name: String,
    pub r#type: ServiceType,
    pub description: Option<String>,
    pub organization: Organization,
    pub version: String,
    pub formats: Vec<DecodingStrategy>,
}

#[derive(Debug, Serialize)]
pub struct ServiceType {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct Organization {
    pub name: String,
    pub url: String,
}
