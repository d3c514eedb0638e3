use serde::Serialize;

pub type Year = i32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Album {
    pub name: String,
    pub year: Year,
}

impl Album {
    pub fn new(name: impl Into<String>, year: Year) -> Self {
        Album {
            name: name.into(),
            year,
        }
    }
}
