use serde::{Deserialize, Serialize};

/// Embedded category reference, as the backend nests it inside a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Catalog entry. Identity is `id`; the cache keeps at most one entry per id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "img", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Page envelope for `GET /productos`. Extra fields (totals) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsPage {
    #[serde(rename = "productos")]
    pub products: Vec<Product>,
}

/// Create/update request body, `{ nombre, categoria }`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
}

/// One picked image, ready to become the `archivo` multipart field.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}
