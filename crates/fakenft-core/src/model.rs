//! Marketplace wire model.
//!
//! All types decode straight from the API's JSON. They are immutable values;
//! services hand them to callers and never keep a copy beyond the NFT cache.

use serde::{Deserialize, Deserializer, Serialize};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nft {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Rating bucket, 0..=5.
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub author: String,
    /// ISO-8601 timestamp as served by the API.
    #[serde(default)]
    pub created_at: String,
}

/// A curated group of NFTs shown in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftCollection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cover: String,
    /// NFT ids in display order.
    #[serde(default)]
    pub nfts: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub created_at: String,
}

/// A marketplace participant, as listed on the statistics screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub nfts: Vec<String>,
    /// Served as a string ("42"); decoded leniently.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub rating: u32,
}

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub nfts: Vec<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub likes: Vec<String>,
}

impl Profile {
    pub fn likes(&self, nft_id: &str) -> bool {
        self.likes.iter().any(|id| id == nft_id)
    }
}

/// The basket as stored server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub nfts: Vec<String>,
}

/// A payment currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: String,
    pub title: String,
    /// Ticker, e.g. "BTC".
    pub name: String,
    #[serde(default)]
    pub image: String,
}

/// Server response to a payment attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub success: bool,
    #[serde(default)]
    pub order_id: String,
    /// Currency the server charged.
    #[serde(default)]
    pub id: String,
}

fn lenient_u32<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Str(String),
    }
    match Raw::deserialize(de)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn nullable_vec<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(de)?.unwrap_or_default())
}
