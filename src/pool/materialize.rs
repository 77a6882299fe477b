//! Name-keyed property lookup and record construction.
//!
//! Records are built from finished property lists only. Every field is
//! looked up by name *and* type; a field that is absent, or present with a
//! different type, takes its kind's default instead of failing the decode.

use std::collections::BTreeMap;

use super::{
    AppearanceInfoStruct, AutoManageUniform, CharacterPoolDataElement, CharacterPoolLoadoutStruct,
    CosmeticOptionStruct, ExtraDataEntry, UniformSettingsStruct, UniformStatus,
};
use crate::property::{Property, PropertyType};

/// Borrowed lookup view over one property list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Properties<'a>(&'a [Property]);

impl<'a> Properties<'a> {
    pub fn new(properties: &'a [Property]) -> Self {
        Self(properties)
    }

    /// First property called `name` with type `ty`.
    pub fn find(&self, name: &str, ty: PropertyType) -> Option<&'a Property> {
        self.0.iter().find(|p| p.ty() == ty && p.name() == name)
    }

    /// Integer value, or `0`.
    pub fn int(&self, name: &str) -> i32 {
        match self.find(name, PropertyType::Int) {
            Some(Property::Int { value, .. }) => *value,
            _ => 0,
        }
    }

    /// Boolean value, or `false`.
    pub fn bool(&self, name: &str) -> bool {
        match self.find(name, PropertyType::Bool) {
            Some(Property::Bool { value, .. }) => *value,
            _ => false,
        }
    }

    /// Name value, or `""`.
    pub fn name(&self, name: &str) -> &'a str {
        match self.find(name, PropertyType::Name) {
            Some(Property::Name { value, .. }) => value,
            _ => "",
        }
    }

    /// String value, or `""`.
    pub fn string(&self, name: &str) -> &'a str {
        match self.find(name, PropertyType::Str) {
            Some(Property::Str { value, .. }) => value,
            _ => "",
        }
    }

    /// Name value, falling back to a string property of the same name.
    pub fn text(&self, name: &str) -> &'a str {
        match self.find(name, PropertyType::Name) {
            Some(Property::Name { value, .. }) => value,
            _ => self.string(name),
        }
    }

    /// Selected enum member name, or `""`.
    pub fn byte(&self, name: &str) -> &'a str {
        match self.find(name, PropertyType::Byte) {
            Some(Property::Byte { value, .. }) => value,
            _ => "",
        }
    }

    /// Struct content, or an empty view.
    pub fn structure(&self, name: &str) -> Properties<'a> {
        match self.find(name, PropertyType::Struct) {
            Some(Property::Struct { properties, .. }) => Properties(properties),
            _ => Properties::default(),
        }
    }

    /// Array entries, or an empty slice.
    pub fn array(&self, name: &str) -> &'a [Vec<Property>] {
        match self.find(name, PropertyType::Array) {
            Some(Property::Array { entries, .. }) => entries,
            _ => &[],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Property> {
        self.0.iter()
    }
}

fn each<'a, T>(entries: &'a [Vec<Property>], f: impl Fn(Properties<'a>) -> T) -> Vec<T> {
    entries.iter().map(|e| f(Properties::new(e))).collect()
}

/// Display text of a leaf property; `None` for structs, arrays and `None`.
fn leaf_text(property: &Property) -> Option<String> {
    match property {
        Property::Int { value, .. } => Some(value.to_string()),
        Property::Bool { value, .. } => Some(value.to_string()),
        Property::Name { value, .. }
        | Property::Str { value, .. }
        | Property::Byte { value, .. } => Some(value.clone()),
        Property::Struct { .. } | Property::Array { .. } | Property::None => None,
    }
}

impl CharacterPoolDataElement {
    pub fn from_properties(p: Properties<'_>) -> Self {
        Self {
            first_name: p.string("strFirstName").to_owned(),
            last_name: p.string("strLastName").to_owned(),
            nick_name: p.string("strNickName").to_owned(),
            soldier_class_template: p.text("m_SoldierClassTemplateName").to_owned(),
            character_template: p.text("CharacterTemplateName").to_owned(),
            country: p.text("Country").to_owned(),
            allowed_type_soldier: p.bool("AllowedTypeSoldier"),
            allowed_type_vip: p.bool("AllowedTypeVIP"),
            allowed_type_dark_vip: p.bool("AllowedTypeDarkVIP"),
            pool_timestamp: p.string("PoolTimestamp").to_owned(),
            background_text: p.string("BackgroundText").to_owned(),
        }
    }
}

impl AppearanceInfoStruct {
    pub fn from_properties(p: Properties<'_>) -> Self {
        let appearance: BTreeMap<String, String> = p
            .structure("Appearance")
            .iter()
            .filter_map(|prop| leaf_text(prop).map(|text| (prop.name().to_owned(), text)))
            .collect();
        Self {
            gender_armor_template: p.text("GenderArmorTemplate").to_owned(),
            appearance,
        }
    }
}

impl CosmeticOptionStruct {
    pub fn from_properties(p: Properties<'_>) -> Self {
        Self {
            name: p.text("OptionName").to_owned(),
            checked: p.bool("bChecked"),
        }
    }
}

impl UniformSettingsStruct {
    pub fn from_properties(p: Properties<'_>) -> Self {
        Self {
            gender_armor_template: p.text("GenderArmorTemplate").to_owned(),
            cosmetic_options: each(
                p.array("CosmeticOptions"),
                CosmeticOptionStruct::from_properties,
            ),
        }
    }
}

impl CharacterPoolLoadoutStruct {
    pub fn from_properties(p: Properties<'_>) -> Self {
        Self {
            template_name: p.text("TemplateName").to_owned(),
            inventory_slot: p.byte("InventorySlot").to_owned(),
        }
    }
}

impl ExtraDataEntry {
    pub fn from_properties(p: Properties<'_>) -> Self {
        // each entry carries a single template name
        let non_soldier_uniform_templates = p
            .array("NonSoldierUniformTemplates")
            .iter()
            .filter_map(|entry| {
                entry.iter().find_map(|prop| match prop {
                    Property::Name { value, .. } | Property::Str { value, .. } => {
                        Some(value.clone())
                    }
                    _ => None,
                })
            })
            .collect();

        Self {
            object_id: p.int("ObjectID"),
            character: CharacterPoolDataElement::from_properties(p.structure("CharacterPoolData")),
            appearances: each(p.array("AppearanceStore"), AppearanceInfoStruct::from_properties),
            uniform_settings: each(
                p.array("UniformSettings"),
                UniformSettingsStruct::from_properties,
            ),
            uniform_status: UniformStatus::from_member(p.byte("UniformStatus")),
            auto_manage_uniform: AutoManageUniform::from_member(p.byte("AutoManageUniformForUnit")),
            non_soldier_uniform_templates,
            loadout: each(
                p.array("CharacterPoolLoadout"),
                CharacterPoolLoadoutStruct::from_properties,
            ),
        }
    }
}
