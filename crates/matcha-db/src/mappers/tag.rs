//! Tag mappers

use matcha_core::entities::{Tag, TagUsage};
use matcha_core::value_objects::TagId;

use crate::models::{TagModel, TagUsageModel};

impl From<TagModel> for Tag {
    fn from(model: TagModel) -> Self {
        Tag {
            id: TagId::new(model.tag_id),
            name: model.name,
        }
    }
}

impl From<TagUsageModel> for TagUsage {
    fn from(model: TagUsageModel) -> Self {
        TagUsage {
            id: TagId::new(model.tag_id),
            name: model.name,
            usage_count: model.usage_count,
        }
    }
}
