use serde::Deserialize;

/// Query parameters shared by /search and /browse. Missing values fall back
/// to the defaults; unparseable `from`/`size` are rejected by the extractor
/// before the handler runs.
#[derive(Deserialize)]
pub struct PageParams {
    pub q: Option<String>,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default = "default_sort")]
    pub sort: String,
}

fn default_size() -> i64 {
    30
}

fn default_sort() -> String {
    "asc".to_string()
}

/// Query parameters for /admin/ips.
#[derive(Deserialize)]
pub struct AdminParams {
    pub key: Option<String>,
}
