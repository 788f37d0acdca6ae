//! # Inventory
//!
//! Stocked items and their restock levels.
//!
//! Items keep the order they were loaded in, the same way a cart keeps the
//! order lines were added. Lookups are by exact name.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};

/// One slot in the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    /// Unique name, also what the customer types to select it.
    pub name: String,

    /// Units currently in the slot.
    pub available: u32,

    /// Units the slot is filled back up to on reload.
    ///
    /// `available <= restock_level` is expected but not enforced.
    pub restock_level: u32,
}

impl ItemRecord {
    pub fn new(name: impl Into<String>, available: u32, restock_level: u32) -> Self {
        ItemRecord {
            name: name.into(),
            available,
            restock_level,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.available > 0
    }

    /// The `[available, restock_level]` pair used in config files.
    pub fn levels(&self) -> [u32; 2] {
        [self.available, self.restock_level]
    }
}

/// All items in the machine.
///
/// Serializes as `{ "name": [available, restock_level], ... }` and loads
/// back in the order the entries appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<ItemRecord>,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory::default()
    }

    /// chocolate:[20,200], soda:[10,100], crisps:[15,150]
    pub fn standard() -> Self {
        [
            ("chocolate", [20, 200]),
            ("soda", [10, 100]),
            ("crisps", [15, 150]),
        ]
        .into_iter()
        .collect()
    }

    /// Adds an item, or replaces the levels of an existing one.
    pub fn insert(&mut self, record: ItemRecord) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.name == record.name) {
            *existing = record;
            return;
        }
        self.items.push(record);
    }

    pub fn get(&self, name: &str) -> Option<&ItemRecord> {
        self.items.iter().find(|i| i.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut ItemRecord> {
        self.items.iter_mut().find(|i| i.name == name)
    }

    /// `[available, restock_level]` for `name`.
    pub fn levels(&self, name: &str) -> Option<[u32; 2]> {
        self.get(name).map(ItemRecord::levels)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemRecord> {
        self.items.iter()
    }

    /// Total units across all slots.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.available)).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, [u32; 2])> for Inventory {
    fn from_iter<I: IntoIterator<Item = (S, [u32; 2])>>(iter: I) -> Self {
        let mut inventory = Inventory::new();
        for (name, [available, restock_level]) in iter {
            inventory.insert(ItemRecord::new(name, available, restock_level));
        }
        inventory
    }
}

impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.items.iter().map(|i| (&i.name, i.levels())))
    }
}

struct InventoryVisitor;

impl<'de> Visitor<'de> for InventoryVisitor {
    type Value = Inventory;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of item name to [available, restock_level]")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Inventory, A::Error> {
        let mut inventory = Inventory::new();
        while let Some((name, levels)) = map.next_entry::<String, [u32; 2]>()? {
            let [available, restock_level] = levels;
            inventory.insert(ItemRecord::new(name, available, restock_level));
        }
        Ok(inventory)
    }
}

impl<'de> Deserialize<'de> for Inventory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(InventoryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_inventory() {
        let inventory = Inventory::standard();
        assert_eq!(inventory.levels("chocolate"), Some([20, 200]));
        assert_eq!(inventory.levels("soda"), Some([10, 100]));
        assert_eq!(inventory.levels("crisps"), Some([15, 150]));
        assert_eq!(inventory.len(), 3);
        assert_eq!(inventory.total_units(), 45);
    }

    #[test]
    fn test_keeps_load_order() {
        let inventory = Inventory::standard();
        let names: Vec<_> = inventory.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["chocolate", "soda", "crisps"]);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut inventory = Inventory::standard();
        inventory.insert(ItemRecord::new("soda", 1, 5));
        assert_eq!(inventory.levels("soda"), Some([1, 5]));
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn test_serializes_as_level_pairs() {
        let inventory: Inventory = [("haribo", [0, 200]), ("water", [10, 100])]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&inventory).unwrap();
        assert_eq!(json, r#"{"haribo":[0,200],"water":[10,100]}"#);

        let back: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inventory);
        assert!(!back.get("haribo").unwrap().in_stock());
    }

    #[test]
    fn test_loads_in_document_order() {
        let json = r#"{"water":[10,100],"hariboo":[0,200],"mints":[15,150]}"#;
        let inventory: Inventory = serde_json::from_str(json).unwrap();
        let names: Vec<_> = inventory.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["water", "hariboo", "mints"]);

        let inventory: Inventory = toml::from_str(
            r#"
            water = [10, 100]
            hariboo = [0, 200]
            mints = [15, 150]
            "#,
        )
        .unwrap();
        let names: Vec<_> = inventory.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["water", "hariboo", "mints"]);
        assert_eq!(inventory.levels("hariboo"), Some([0, 200]));
    }

    #[test]
    fn test_rejects_malformed_levels() {
        assert!(serde_json::from_str::<Inventory>(r#"{"water":[10]}"#).is_err());
        assert!(serde_json::from_str::<Inventory>(r#"["water"]"#).is_err());
    }
}
