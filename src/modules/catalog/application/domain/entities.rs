use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    #[schema(example = "Electronics")]
    pub name: String,
    #[schema(example = "https://cdn.example.com/electronics.png")]
    pub image: String,
    #[schema(example = "electronics")]
    pub url: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: Uuid,
    #[schema(example = "Laptops")]
    pub name: String,
    pub image: String,
    #[schema(example = "laptops")]
    pub url: String,
    pub featured: bool,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A subcategory listed together with its parent.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SubCategoryWithCategory {
    #[serde(flatten)]
    pub sub_category: SubCategory,
    pub category: Option<Category>,
}
