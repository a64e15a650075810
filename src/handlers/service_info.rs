use crate::formats::DecodingStrategy;
use crate::types::{Organization, ServiceInfo, ServiceType};
use axum::Json;

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        id: "org.example.vcf-intervals".to_string(),
        name: "vcf-intervals".to_string(),
        r#type: ServiceType {
            group: "org.example".to_string(),
            artifact: "vcf-intervals".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        description: Some(env!("CARGO_PKG_DESCRIPTION").to_string()),
        organization: Organization {
            name: "Example Organization".to_string(),
            url: "https://example.org".to_string(),
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        formats: vec![DecodingStrategy::Textual, DecodingStrategy::Binary],
    })
}
