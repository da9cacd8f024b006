use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::validation::{FieldError, Rule, Validator};

static NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s]+$").unwrap());
static URL_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());
static URL_REPEATED_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]{2,}").unwrap());

const URL_CHARS_MESSAGE: &str = "Only letters, numbers, hyphens, and underscores are allowed in the url, and consecutive hyphens or underscores are not permitted";

fn name_rules() -> [Rule; 3] {
    [
        Rule::MinChars(2, "Name must be at least 2 characters long"),
        Rule::MaxChars(50, "Name must be at most 50 characters long"),
        Rule::Matches(&NAME_CHARS, "Only letters, numbers, and spaces are allowed in the name"),
    ]
}

fn url_rules() -> [Rule; 4] {
    [
        Rule::MinChars(2, "Url must be at least 2 characters long"),
        Rule::MaxChars(50, "Url can not exceed 50 characters"),
        Rule::Matches(&URL_CHARS, URL_CHARS_MESSAGE),
        Rule::NotMatches(&URL_REPEATED_SEPARATOR, URL_CHARS_MESSAGE),
    ]
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImageRef {
    #[schema(example = "https://cdn.example.com/electronics.png")]
    pub url: String,
}

/// Admin form for creating or updating a category. A known `id` updates.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CategoryForm {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[schema(example = "Electronics")]
    pub name: String,
    pub image: Vec<ImageRef>,
    #[schema(example = "electronics")]
    pub url: String,
    #[serde(default)]
    pub featured: bool,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .field("name", &self.name, &name_rules())
            .fail_if(self.image.len() != 1, "image", "Choose only one category image")
            .field("url", &self.url, &url_rules())
            .finish()
    }

    /// The single image, once validated.
    pub fn image_url(&self) -> String {
        self.image.first().map(|i| i.url.clone()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryForm {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[schema(example = "Laptops")]
    pub name: String,
    pub image: Vec<ImageRef>,
    #[schema(example = "laptops")]
    pub url: String,
    #[serde(default)]
    pub featured: bool,
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub category_id: String,
}

impl SubCategoryForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .field("name", &self.name, &name_rules())
            .fail_if(self.image.len() != 1, "image", "Choose only one category image")
            .field("url", &self.url, &url_rules())
            .fail_if(
                Uuid::parse_str(&self.category_id).is_err(),
                "categoryId",
                "Category id must be a valid UUID",
            )
            .finish()
    }

    pub fn image_url(&self) -> String {
        self.image.first().map(|i| i.url.clone()).unwrap_or_default()
    }

    pub fn category_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.category_id).ok()
    }
}
