//! Serde helpers for child lists whose element type is fixed.
//!
//! `Document` only holds blocks and `Inline` only holds text leaves, but on the wire every node
//! still carries its `object` discriminant. These helpers wrap each element in a one-variant
//! internally tagged enum so the discriminant is written and checked.

use super::nodes::{Block, Text};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
#[serde(tag = "object", rename_all = "lowercase")]
enum BlockRef<'a> {
    Block(&'a Block),
}

#[derive(Deserialize)]
#[serde(tag = "object", rename_all = "lowercase")]
enum OwnedBlock {
    Block(Block),
}

#[derive(Serialize)]
#[serde(tag = "object", rename_all = "lowercase")]
enum TextRef<'a> {
    Text(&'a Text),
}

#[derive(Deserialize)]
#[serde(tag = "object", rename_all = "lowercase")]
enum OwnedText {
    Text(Text),
}

pub(super) mod blocks {
    use super::*;

    pub fn serialize<S: Serializer>(blocks: &[Block], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(blocks.iter().map(BlockRef::Block))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Block>, D::Error> {
        let tagged = Vec::<OwnedBlock>::deserialize(deserializer)?;
        Ok(tagged
            .into_iter()
            .map(|OwnedBlock::Block(block)| block)
            .collect())
    }
}

pub(super) mod texts {
    use super::*;

    pub fn serialize<S: Serializer>(texts: &[Text], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(texts.iter().map(TextRef::Text))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Text>, D::Error> {
        let tagged = Vec::<OwnedText>::deserialize(deserializer)?;
        Ok(tagged.into_iter().map(|OwnedText::Text(text)| text).collect())
    }
}
