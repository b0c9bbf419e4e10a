//! Deterministic grouping by (LOT, date code, device)
//!
//! Groups come out in ascending key order (LOT, then onlyDate, then
//! Device, each compared as strings). Members keep their input order.
//! Grouping borrows records, so filtered views can be grouped without
//! touching the dataset.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::record::Record;

/// Composite grouping key
///
/// Field order matters: the derived `Ord` gives the report ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupKey {
    pub lot: String,
    pub only_date: String,
    pub device: String,
}

impl GroupKey {
    pub fn of(record: &Record) -> Self {
        Self {
            lot: record.lot.clone(),
            only_date: record.only_date.clone(),
            device: record.device.clone(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}    ( date {}   device {} )", self.lot, self.only_date, self.device)
    }
}

/// All records sharing one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub key: GroupKey,
    pub members: Vec<&'a Record>,
}

impl<'a> Group<'a> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Source row indices of the members
    pub fn rows(&self) -> Vec<usize> {
        self.members.iter().map(|r| r.row).collect()
    }
}

/// Partition records into key-ordered groups
pub fn group_records<'a, I>(records: I) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buckets: BTreeMap<GroupKey, Vec<&'a Record>> = BTreeMap::new();
    for record in records {
        buckets.entry(GroupKey::of(record)).or_default().push(record);
    }

    buckets
        .into_iter()
        .map(|(key, members)| Group { key, members })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row: usize, chip: &str, date: &str, device: &str) -> Record {
        Record::new(row, chip.into(), date.into(), "kim".into(), device.into(), row.to_string(), None).unwrap()
    }

    #[test]
    fn test_groups_sorted_by_key_fields() {
        let records = vec![
            record(0, "D02A01X0011", "20240102", "dev1"),
            record(1, "D01A01X0011", "20240103", "dev1"),
            record(2, "D01A01X0012", "20240101", "dev2"),
            record(3, "D01A01X0013", "20240101", "dev1"),
        ];

        let groups = group_records(&records);
        let keys: Vec<(String, String, String)> = groups
            .iter()
            .map(|g| (g.key.lot.clone(), g.key.only_date.clone(), g.key.device.clone()))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("D01A01X001".into(), "20240101".into(), "dev1".into()),
                ("D01A01X001".into(), "20240101".into(), "dev2".into()),
                ("D01A01X001".into(), "20240103".into(), "dev1".into()),
                ("D02A01X001".into(), "20240102".into(), "dev1".into()),
            ]
        );
    }

    #[test]
    fn test_member_order_preserved() {
        let records = vec![
            record(0, "D01A01X0013", "20240101", "dev1"),
            record(1, "D09A01X0011", "20240101", "dev1"),
            record(2, "D01A01X0011", "20240101", "dev1"),
            record(3, "D01A01X0012", "20240101", "dev1"),
        ];

        let groups = group_records(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].rows(), vec![0, 2, 3]);
        assert_eq!(groups[1].rows(), vec![1]);
    }

    #[test]
    fn test_grouping_is_stable() {
        let records = vec![
            record(0, "D01A01X0013", "20240101", "dev1"),
            record(1, "D01A01X0011", "20240102", "dev1"),
            record(2, "D01A01X0012", "20240101", "dev1"),
        ];
        assert_eq!(group_records(&records), group_records(&records));
    }

    #[test]
    fn test_filtered_view() {
        let records = vec![
            record(0, "D01A01X0011", "20240101", "dev1"),
            record(1, "D01A01X0012", "20240101", "dev1"),
        ];
        let groups = group_records(records.iter().filter(|r| r.position == '2'));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].rows(), vec![1]);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<Record> = Vec::new();
        assert!(group_records(&records).is_empty());
    }
}
