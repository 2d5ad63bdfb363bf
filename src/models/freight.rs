use serde::{Deserialize, Serialize};

/// Body of `GET /api/ufs`. A body without `ok` is read as successful; only an
/// explicit `ok: false` rejects the list.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RegionsResponse {
    #[serde(default = "assume_ok")]
    pub ok: bool,
    #[serde(default)]
    pub ufs: Vec<String>,
}

fn assume_ok() -> bool {
    true
}

/// Body of `GET /api/frete?uf=..`. The upstream answers 400/404 with the same
/// shape and `ok: false`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct FreightResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub frete: Option<f64>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
