//! JSON bodies exchanged with the playground front end.

use serde::{Deserialize, Serialize};

/// Body of `/compile`, `/normalize` and `/emit`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeRequest {
    #[serde(default)]
    pub code: String,
}

/// Response of `/compile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompileResponse {
    Compiled {
        ok: bool,
        compiled_output: String,
    },
    Failed {
        ok: bool,
        errors: Vec<String>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        limit_reached: bool,
    },
}

impl CompileResponse {
    pub fn compiled(compiled_output: String) -> Self {
        Self::Compiled {
            ok: true,
            compiled_output,
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        Self::Failed {
            ok: false,
            errors,
            limit_reached: false,
        }
    }

    pub fn limit_reached(limit: u64) -> Self {
        Self::Failed {
            ok: false,
            errors: vec![format!(
                "Free compile limit reached ({limit} compiles). Please register to continue."
            )],
            limit_reached: true,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Compiled { .. })
    }
}

/// Response of `/normalize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeResponse {
    pub normalized: String,
}

/// Response of `/emit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitResponse {
    pub emission: String,
}

/// Body of `/register_license`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseRequest {
    #[serde(default)]
    pub license_key: Option<String>,
}

/// Response of `/register_license`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseResponse {
    pub ok: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compile_response_shapes() {
        assert_eq!(
            serde_json::to_value(CompileResponse::compiled("01 │ X Q0".to_string())).unwrap(),
            json!({ "ok": true, "compiled_output": "01 │ X Q0" })
        );
        assert_eq!(
            serde_json::to_value(CompileResponse::failed(vec!["Empty line".to_string()])).unwrap(),
            json!({ "ok": false, "errors": ["Empty line"] })
        );
        assert_eq!(
            serde_json::to_value(CompileResponse::limit_reached(5)).unwrap(),
            json!({
                "ok": false,
                "errors": ["Free compile limit reached (5 compiles). Please register to continue."],
                "limit_reached": true,
            })
        );
    }

    #[test]
    fn missing_code_is_empty() {
        let request: CodeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.code, "");
    }
}
