use popcorn_models::{UserRating, WatchedRecord, WatchedSummary};

/// The user's watched movies, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchedList {
    records: Vec<WatchedRecord>,
}

impl WatchedList {
    pub fn new(records: Vec<WatchedRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[WatchedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&WatchedRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn user_rating(&self, id: &str) -> Option<UserRating> {
        self.get(id).map(|r| r.user_rating)
    }

    /// Append without checking for duplicates.
    pub fn push(&mut self, record: WatchedRecord) {
        self.records.push(record);
    }

    /// Drop every record with `id`. Returns how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before - self.records.len()
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_records(&self.records)
    }
}
