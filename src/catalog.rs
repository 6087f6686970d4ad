use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static CATALOG_DIR: Dir = include_dir!("src/catalogs");

/// Ground-truth label attached to every headline.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Truth {
    Real,
    Fake,
}

/// A single headline and whether it is genuine.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct QuizItem {
    pub text: String,
    pub truth: Truth,
}

/// The two fixed test versions a participant can pick from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Variant {
    #[strum(serialize = "MIST-20 (20 headlines)")]
    Mist20,
    #[strum(serialize = "MIST-16 (16 headlines)")]
    Mist16,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Mist20, Variant::Mist16];

    pub fn item_count(&self) -> usize {
        match self {
            Variant::Mist20 => 20,
            Variant::Mist16 => 16,
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            Variant::Mist20 => "mist20.json",
            Variant::Mist16 => "mist16.json",
        }
    }
}

/// A fixed, ordered headline list. New test versions are new JSON assets,
/// not new code paths.
#[derive(Deserialize, Clone, Debug)]
pub struct Catalog {
    pub name: String,
    pub size: usize,
    pub items: Vec<QuizItem>,
}

impl Catalog {
    pub fn load(variant: Variant) -> Self {
        read_catalog_from_file(variant.file_name()).unwrap()
    }
}

fn read_catalog_from_file(file_name: &str) -> Result<Catalog, Box<dyn Error>> {
    let file = CATALOG_DIR
        .get_file(file_name)
        .expect("Catalog file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let catalog = from_str(file_as_str).expect("Unable to deserialize catalog json");

    Ok(catalog)
}
