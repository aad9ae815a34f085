use crate::model::id::ResourceId;
use crate::model::resource::ResourceStatus;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct CreateResources {
    pub category: String,
    pub quantity: u32,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub notes: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub is_accessory: bool,
    pub related_accessories: Vec<ResourceId>,
    pub compatible_with: Vec<ResourceId>,
}

#[derive(Debug, Default)]
pub struct UpdateResource {
    pub resource_id: ResourceId,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub notes: Option<String>,
    pub attributes: Option<BTreeMap<String, String>>,
}

#[derive(Debug)]
pub struct UpdateResourceStatus {
    pub resource_id: ResourceId,
    pub status: ResourceStatus,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct DeleteResource {
    pub resource_id: ResourceId,
}
