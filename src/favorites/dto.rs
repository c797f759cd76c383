use serde::{Deserialize, Serialize};

use crate::favorites::repo_types::{Favorite, NewFavorite};

/// Request body for saving a favorite. Required fields are optional here so
/// that absence is reported as a validation failure, not a decode error.
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub repo_id: Option<i64>,
    pub repo_name: Option<String>,
    pub repo_url: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars_count: Option<i32>,
}

impl AddFavoriteRequest {
    /// Check required fields and apply defaults; returns the names of the
    /// missing fields otherwise.
    pub fn into_new_favorite(self) -> Result<NewFavorite, Vec<&'static str>> {
        let mut missing = Vec::new();
        if self.repo_id.is_none() {
            missing.push("repo_id");
        }
        if self.repo_name.as_deref().map_or(true, str::is_empty) {
            missing.push("repo_name");
        }
        if self.repo_url.as_deref().map_or(true, str::is_empty) {
            missing.push("repo_url");
        }

        match (self.repo_id, self.repo_name, self.repo_url) {
            (Some(repo_id), Some(repo_name), Some(repo_url)) if missing.is_empty() => {
                Ok(NewFavorite {
                    repo_id,
                    repo_name,
                    repo_url,
                    description: self.description,
                    language: self.language,
                    stars_count: self.stars_count.unwrap_or(0),
                })
            }
            _ => Err(missing),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub favorite: Favorite,
}

#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> AddFavoriteRequest {
        AddFavoriteRequest {
            repo_id: Some(42),
            repo_name: Some("demo".into()),
            repo_url: Some("https://x/demo".into()),
            description: None,
            language: None,
            stars_count: None,
        }
    }

    #[test]
    fn applies_defaults_for_optional_fields() {
        let new = full_request().into_new_favorite().expect("valid");
        assert_eq!(new.repo_id, 42);
        assert_eq!(new.stars_count, 0);
        assert!(new.description.is_none());
        assert!(new.language.is_none());
    }

    #[test]
    fn keeps_provided_optional_fields() {
        let mut req = full_request();
        req.description = Some("a demo repo".into());
        req.language = Some("Rust".into());
        req.stars_count = Some(7);
        let new = req.into_new_favorite().expect("valid");
        assert_eq!(new.description.as_deref(), Some("a demo repo"));
        assert_eq!(new.language.as_deref(), Some("Rust"));
        assert_eq!(new.stars_count, 7);
    }

    #[test]
    fn reports_all_missing_fields() {
        let req = AddFavoriteRequest {
            repo_id: None,
            repo_name: None,
            repo_url: None,
            description: None,
            language: None,
            stars_count: None,
        };
        let missing = req.into_new_favorite().unwrap_err();
        assert_eq!(missing, vec!["repo_id", "repo_name", "repo_url"]);
    }

    #[test]
    fn reports_only_the_missing_fields() {
        let mut req = full_request();
        req.repo_url = None;
        let missing = req.into_new_favorite().unwrap_err();
        assert_eq!(missing, vec!["repo_url"]);
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let mut req = full_request();
        req.repo_name = Some(String::new());
        let missing = req.into_new_favorite().unwrap_err();
        assert_eq!(missing, vec!["repo_name"]);
    }
}
