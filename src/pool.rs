use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static POOL_DIR: Dir = include_dir!("src/pools");

/// Languages with embedded candidate pools. The display name doubles as the
/// pool file name (lowercased).
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum PracticeLanguage {
    Korean,
    English,
}

/// One drill category: the jamo/letter pool for the position stage and the
/// word pool for the word stage. Both lists are static, non-empty constants;
/// the engine relies on that and does not re-validate.
#[derive(Deserialize, Clone, Debug)]
pub struct CategoryPool {
    pub name: String,
    pub positions: Vec<String>,
    pub words: Vec<String>,
}

/// All categories bundled for one language.
#[derive(Deserialize, Clone, Debug)]
pub struct PoolSet {
    pub name: String,
    pub categories: Vec<CategoryPool>,
}

impl PoolSet {
    /// Comma-separated category names, for CLI listings and error messages.
    pub fn category_names(&self) -> String {
        self.categories.iter().map(|c| c.name.as_str()).join(", ")
    }
}

impl PracticeLanguage {
    pub fn pools(&self) -> PoolSet {
        read_pools_from_file(format!("{}.json", self.to_string().to_lowercase())).unwrap()
    }

    /// Look up a category by name, or the first category when `name` is None.
    pub fn category(&self, name: Option<&str>) -> Option<CategoryPool> {
        let set = self.pools();
        match name {
            Some(n) => set.categories.into_iter().find(|c| c.name == n),
            None => set.categories.into_iter().next(),
        }
    }
}

fn read_pools_from_file(file_name: String) -> Result<PoolSet, Box<dyn Error>> {
    let file = POOL_DIR.get_file(file_name).expect("Pool file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let set = from_str(file_as_str).expect("Unable to deserialize pool json");

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_korean_pools_load() {
        let set = PracticeLanguage::Korean.pools();
        assert_eq!(set.name, "korean");
        assert!(!set.categories.is_empty());
    }

    #[test]
    fn test_english_pools_load() {
        let set = PracticeLanguage::English.pools();
        assert_eq!(set.name, "english");
        assert!(!set.categories.is_empty());
    }

    #[test]
    fn test_every_category_is_non_empty() {
        for lang in [PracticeLanguage::Korean, PracticeLanguage::English] {
            for cat in lang.pools().categories {
                assert!(!cat.positions.is_empty(), "{lang} {} positions", cat.name);
                assert!(!cat.words.is_empty(), "{lang} {} words", cat.name);
            }
        }
    }

    #[test]
    fn test_category_lookup_by_name() {
        let cat = PracticeLanguage::Korean.category(Some("home-row"));
        assert!(cat.is_some());
        assert_eq!(cat.unwrap().name, "home-row");
    }

    #[test]
    fn test_category_lookup_default_is_first() {
        let set = PracticeLanguage::English.pools();
        let first = set.categories[0].name.clone();
        assert_eq!(PracticeLanguage::English.category(None).unwrap().name, first);
    }

    #[test]
    fn test_unknown_category_is_none() {
        assert!(PracticeLanguage::Korean.category(Some("no-such")).is_none());
    }

    #[test]
    fn test_category_names_listing() {
        let names = PracticeLanguage::Korean.pools().category_names();
        assert!(names.contains("home-row"));
        assert!(names.contains(", "));
    }

    #[test]
    fn test_pool_set_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "categories": [
                { "name": "tiny", "positions": ["a"], "words": ["ab"] }
            ]
        }
        "#;

        let set: PoolSet = from_str(json_data).expect("Failed to deserialize test pool");

        assert_eq!(set.name, "test");
        assert_eq!(set.categories.len(), 1);
        assert_eq!(set.categories[0].positions, vec!["a"]);
        assert_eq!(set.categories[0].words, vec!["ab"]);
    }

    #[test]
    #[should_panic(expected = "Pool file not found")]
    fn test_read_nonexistent_pool_file() {
        let _ = read_pools_from_file("nonexistent.json".to_string());
    }
}
