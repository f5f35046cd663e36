// src/models/category.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Content category a run is played in.
/// Parsed at the HTTP boundary; nothing past the handlers sees a raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Movie,
    Drama,
    Song,
    TvProgram,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Movie,
        Category::Drama,
        Category::Song,
        Category::TvProgram,
    ];

    /// Slug used in URLs, data file names and the `results.category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Drama => "drama",
            Category::Song => "song",
            Category::TvProgram => "tv_program",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::InvalidCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_slugs() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "anime".parse::<Category>(),
            Err(AppError::InvalidCategory(s)) if s == "anime"
        ));
        // Slugs are exact, no case folding at the boundary.
        assert!("Movie".parse::<Category>().is_err());
        assert!("tv-program".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_matches_slug() {
        let json = serde_json::to_string(&Category::TvProgram).unwrap();
        assert_eq!(json, "\"tv_program\"");
    }
}
