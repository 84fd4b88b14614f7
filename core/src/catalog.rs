use serde::{Deserialize, Serialize};

pub const DEFAULT_CATALOG_URL: &str = "data.json";

pub const CREATION_LABEL_PREFIX: &str = "Criado em:";
pub const LINK_TEXT: &str = "Saiba mais";
pub const LOAD_ERROR_TEXT: &str = "Erro ao carregar informações. Tente novamente mais tarde.";
pub const NO_RESULTS_TEXT: &str = "Nenhum resultado encontrado.";

/// One entry of the catalog document. The position of an item in the loaded
/// sequence is its identity for cards and particles alike.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "logo", default)]
    pub logo_url: String,
    #[serde(rename = "data_criacao", default)]
    pub creation_date: String,
    pub link: String,
}

impl CatalogItem {
    pub fn creation_label(&self) -> String {
        format!("{CREATION_LABEL_PREFIX} {}", self.creation_date)
    }

    pub fn logo_alt(&self) -> String {
        format!("Logo {}", self.name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(String),
    #[error("catalog request returned status {0}")]
    Status(u16),
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn parse_catalog(text: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    let items: Vec<CatalogItem> = serde_json::from_str(text)?;
    Ok(items)
}
