use super::category::AddCategoriesRequest;
use garde::Validate;
use kernel::model::{
    id::ResourceId,
    resource::{
        event::{CreateResources, UpdateResource, UpdateResourceStatus},
        Resource, ResourceStatus,
    },
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::VariantNames;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: ResourceId,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub status: ResourceStatus,
    pub stock: i32,
    pub damage_notes: Option<String>,
    pub category: String,
    pub attributes: BTreeMap<String, String>,
    pub notes: Option<String>,
    pub related_accessories: Vec<ResourceId>,
    pub is_accessory: bool,
    pub compatible_with: Vec<ResourceId>,
}

impl From<Resource> for ResourceResponse {
    fn from(value: Resource) -> Self {
        let category = value.category_name().to_string();
        let Resource {
            id,
            name,
            brand,
            model,
            status,
            stock,
            damage_notes,
            category: _,
            attributes,
            notes,
            related_accessories,
            is_accessory,
            compatible_with,
        } = value;
        Self {
            id,
            name,
            brand,
            model,
            status,
            stock,
            damage_notes,
            category,
            attributes,
            notes,
            related_accessories,
            is_accessory,
            compatible_with,
        }
    }
}

#[derive(Debug, Deserialize, VariantNames)]
#[serde(tag = "action", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ResourceAction {
    Add(AddResourcesRequest),
    UpdateStatus(UpdateResourceStatusRequest),
    AddCategories(AddCategoriesRequest),
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddResourcesRequest {
    #[garde(length(min = 1))]
    pub category: String,
    #[garde(range(min = 1, max = 100))]
    pub quantity: u32,
    #[garde(skip)]
    #[serde(default)]
    pub brand: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    pub model: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    pub notes: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[garde(skip)]
    #[serde(default)]
    pub is_accessory: bool,
    #[garde(skip)]
    #[serde(default)]
    pub related_accessories: Vec<ResourceId>,
    #[garde(skip)]
    #[serde(default)]
    pub compatible_with: Vec<ResourceId>,
}

impl From<AddResourcesRequest> for CreateResources {
    fn from(value: AddResourcesRequest) -> Self {
        let AddResourcesRequest {
            category,
            quantity,
            brand,
            model,
            notes,
            attributes,
            is_accessory,
            related_accessories,
            compatible_with,
        } = value;
        Self {
            category: category.trim().to_string(),
            quantity,
            brand,
            model,
            notes,
            attributes,
            is_accessory,
            related_accessories,
            compatible_with,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceStatusRequest {
    pub resource_id: ResourceId,
    pub status: ResourceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<UpdateResourceStatusRequest> for UpdateResourceStatus {
    fn from(value: UpdateResourceStatusRequest) -> Self {
        let UpdateResourceStatusRequest {
            resource_id,
            status,
            notes,
        } = value;
        Self {
            resource_id,
            status,
            notes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    pub resource_id: ResourceId,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub attributes: Option<BTreeMap<String, String>>,
}

impl From<UpdateResourceRequest> for UpdateResource {
    fn from(value: UpdateResourceRequest) -> Self {
        let UpdateResourceRequest {
            resource_id,
            brand,
            model,
            notes,
            attributes,
        } = value;
        Self {
            resource_id,
            brand,
            model,
            notes,
            attributes,
        }
    }
}

/// `?resourceId=` or `?action=deleteCategory&categoryName=`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResourceQuery {
    pub action: Option<String>,
    pub resource_id: Option<ResourceId>,
    pub category_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn add_request(quantity: u64) -> AddResourcesRequest {
        let action: ResourceAction = serde_json::from_value(serde_json::json!({
            "action": "add",
            "category": "Laptops",
            "quantity": quantity
        }))
        .unwrap();
        let ResourceAction::Add(req) = action else {
            panic!("expected an add action");
        };
        req
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(100, true)]
    #[case(101, false)]
    #[case(u32::MAX as u64, false)]
    fn quantity_is_bounded(#[case] quantity: u64, #[case] valid: bool) {
        assert_eq!(add_request(quantity).validate(&()).is_ok(), valid);
    }

    #[test]
    fn missing_category_is_labelled() {
        let resource = Resource {
            id: ResourceId::new(),
            name: "Parlante 1".into(),
            brand: None,
            model: None,
            status: ResourceStatus::Available,
            stock: 1,
            damage_notes: None,
            category: None,
            attributes: BTreeMap::new(),
            notes: None,
            related_accessories: vec![],
            is_accessory: false,
            compatible_with: vec![],
        };
        let json = serde_json::to_value(ResourceResponse::from(resource)).unwrap();
        assert_eq!(json["category"], "Sin categoría");
        assert_eq!(json["status"], "disponible");
        assert_eq!(json["isAccessory"], false);
    }
}
