use kernel::model::{category::Category, id::CategoryId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    /// Always empty; kept for clients that expect the key.
    pub resources: Vec<serde_json::Value>,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        let Category { id, name } = value;
        Self {
            id,
            name,
            resources: vec![],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCategoriesRequest {
    pub category_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategoryQuery {
    pub category_name: String,
}
