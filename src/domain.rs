use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// OMDb's placeholder for data it doesn't have.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Rating {
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// One title's metadata as OMDb returns it.  Every scalar may be "N/A".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Movie {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rated: String,
    #[serde(deserialize_with = "null_as_default")]
    pub released: String,
    #[serde(deserialize_with = "null_as_default")]
    pub director: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub poster: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ratings: Vec<Rating>,

    /// Only set when the lookup failed, OMDb still answers with a 200.
    #[serde(deserialize_with = "null_as_default")]
    pub error: String,
}

// A JSON null decodes to the empty value, like a missing field does.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Movie {
    pub fn has_poster(&self) -> bool {
        let poster = self.poster.trim();
        !poster.is_empty() && poster != NOT_AVAILABLE
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("Title", &self.title),
            ("Year", &self.year),
            ("Rated", &self.rated),
            ("Released", &self.released),
            ("Director", &self.director),
            ("Language", &self.language),
            ("Country", &self.country),
            ("Poster", &self.poster),
        ];

        for (label, value) in fields {
            writeln!(f, "{:<10}{}", format!("{label}:"), value)?;
        }

        if !self.ratings.is_empty() {
            writeln!(f, "Ratings:")?;
            for rating in &self.ratings {
                writeln!(f, "  {}: {}", rating.source, rating.value)?;
            }
        }

        Ok(())
    }
}
