//! Table Inventory
//!
//! The catalog of bookable tables with capacity and preference ordering.

use crate::db::models::DiningTable;

pub struct TableInventory {
    tables: Vec<DiningTable>,
}

impl TableInventory {
    /// Keeps active tables only, ordered smallest-sufficient-first:
    /// ascending priority, then ascending max_seats
    pub fn new(tables: Vec<DiningTable>) -> Self {
        let mut tables: Vec<DiningTable> = tables.into_iter().filter(|t| t.active).collect();
        tables.sort_by_key(|t| (t.priority, t.max_seats));
        Self { tables }
    }

    /// Tables whose capacity range admits the party, preference ordered
    pub fn eligible(&self, party_size: i32) -> Vec<&DiningTable> {
        self.tables
            .iter()
            .filter(|t| t.min_seats <= party_size && party_size <= t.max_seats)
            .collect()
    }

    pub fn all(&self) -> &[DiningTable] {
        &self.tables
    }

    pub fn total_seats(&self) -> i32 {
        self.tables.iter().map(|t| t.max_seats).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, min: i32, max: i32, priority: i32) -> DiningTable {
        DiningTable {
            id: None,
            venue: "v".into(),
            name: name.into(),
            zone: "interior".into(),
            min_seats: min,
            max_seats: max,
            priority,
            combinable: false,
            combine_with: None,
            active: true,
            notes: None,
        }
    }

    #[test]
    fn capacity_boundaries_are_inclusive() {
        let inventory = TableInventory::new(vec![table("T1", 2, 4, 1)]);
        assert!(inventory.eligible(1).is_empty());
        assert_eq!(inventory.eligible(2).len(), 1);
        assert_eq!(inventory.eligible(4).len(), 1);
        assert!(inventory.eligible(5).is_empty());
    }

    #[test]
    fn ordering_is_priority_then_size() {
        let inventory = TableInventory::new(vec![
            table("Big", 2, 8, 2),
            table("Small", 2, 4, 2),
            table("Preferred", 2, 6, 1),
        ]);
        let names: Vec<&str> = inventory
            .eligible(2)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Preferred", "Small", "Big"]);
    }

    #[test]
    fn inactive_tables_never_surface() {
        let mut t = table("Gone", 2, 4, 1);
        t.active = false;
        let inventory = TableInventory::new(vec![t]);
        assert!(inventory.eligible(2).is_empty());
        assert_eq!(inventory.total_seats(), 0);
    }
}
