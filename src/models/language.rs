use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub size: u64,
    pub percentage: f64,
    pub color: String,
}
