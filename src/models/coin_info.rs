use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CoinInfo {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub rank: u32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(rename = "type", default)]
    pub coin_type: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub open_source: bool,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub development_status: Option<String>,
    #[serde(default)]
    pub hardware_wallet: bool,
    #[serde(default)]
    pub proof_type: Option<String>,
    #[serde(default)]
    pub org_structure: Option<String>,
    #[serde(default)]
    pub hash_algorithm: Option<String>,
    #[serde(default)]
    pub first_data_at: Option<String>,
    #[serde(default)]
    pub last_data_at: Option<String>,
}
