//! Data models for the myFlix catalog
//!
//! Field names follow the PascalCase JSON layout existing clients
//! expect (`Title`, `Genre`, `FavoriteMovies`, ...), with `_id` for ids.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Movie genre, embedded in each movie document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Genre {
    pub name: String,
    pub description: String,
}

/// Movie director, embedded in each movie document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Director {
    pub name: String,
    pub bio: String,
    /// Birth year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<i32>,
    /// Death year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death: Option<i32>,
}

/// A catalog entry. Read-only through the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: Genre,
    pub director: Director,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Public view of a user account
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Movie ids in insertion order; duplicates are kept
    #[serde(default)]
    pub favorite_movies: Vec<String>,
}
