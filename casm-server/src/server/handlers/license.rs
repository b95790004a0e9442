use axum::Json;

use crate::types::{LicenseRequest, LicenseResponse};

/// POST /register_license - Acknowledge a license key
///
/// Keys are not checked against anything; any non-blank key is accepted.
pub async fn register_license(Json(request): Json<LicenseRequest>) -> Json<LicenseResponse> {
    let key = request.license_key.as_deref().unwrap_or_default().trim();

    let response = if key.is_empty() {
        LicenseResponse {
            ok: false,
            message: "License key required.".to_string(),
        }
    } else {
        LicenseResponse {
            ok: true,
            message: "License accepted.".to_string(),
        }
    };

    Json(response)
}
