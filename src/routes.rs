//! Typed table of the server-rendered pages the controller navigates between.

use crate::errors::AppError;
use std::fmt;

pub type Id = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Archive,
    Categories,
    Category(Id),
    Documents,
    Document(Id),
    Axes,
    Axis(Id),
    Elements(Id),
    AddCategoryPage,
    AddDocumentPage,
    AddOrderPage(Id),
    AddOrderRulePage(Id),
    AddDescriptionPage(Id),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Archive => "/archive".to_string(),
            Route::Categories => "/categories".to_string(),
            Route::Category(id) => format!("/category/{id}"),
            Route::Documents => "/documents".to_string(),
            Route::Document(id) => format!("/document/{id}"),
            Route::Axes => "/axes".to_string(),
            Route::Axis(id) => format!("/axis/{id}"),
            Route::Elements(id) => format!("/elements/{id}"),
            Route::AddCategoryPage => "/add-category-page".to_string(),
            Route::AddDocumentPage => "/add-document-page".to_string(),
            Route::AddOrderPage(id) => format!("/add-order-page/{id}"),
            Route::AddOrderRulePage(id) => format!("/add-order-rule-page/{id}"),
            Route::AddDescriptionPage(id) => format!("/add-description-page/{id}"),
        }
    }

    /// Resolves a location path. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let mut segments = trimmed.split('/').skip(1);
        let head = segments.next().unwrap_or("");
        let param = segments.next();
        if segments.next().is_some() {
            return None;
        }

        let id = || param.and_then(|value| value.parse::<Id>().ok());
        let route = match (head, param.is_some()) {
            ("", false) => Route::Index,
            ("archive", false) => Route::Archive,
            ("categories", false) => Route::Categories,
            ("documents", false) => Route::Documents,
            ("axes", false) => Route::Axes,
            ("add-category-page", false) => Route::AddCategoryPage,
            ("add-document-page", false) => Route::AddDocumentPage,
            ("category", true) => Route::Category(id()?),
            ("document", true) => Route::Document(id()?),
            ("axis", true) => Route::Axis(id()?),
            ("elements", true) => Route::Elements(id()?),
            ("add-order-page", true) => Route::AddOrderPage(id()?),
            ("add-order-rule-page", true) => Route::AddOrderRulePage(id()?),
            ("add-description-page", true) => Route::AddDescriptionPage(id()?),
            _ => return None,
        };
        Some(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Last non-empty segment of a location path.
pub fn last_segment(path: &str) -> Option<&str> {
    path.rsplit('/').find(|segment| !segment.is_empty())
}

pub fn parse_id(value: &str) -> Result<Id, AppError> {
    value
        .trim()
        .parse::<Id>()
        .map_err(|_| AppError::new(format!("'{value}' is not a valid identifier")))
}
