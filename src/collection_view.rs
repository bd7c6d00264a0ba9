use crate::model::Record;
use log::error;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
}

/// One screen's copy of a collection plus its load flag.
///
/// A failed load keeps whatever was shown before. Loads are not
/// deduplicated; whichever response arrives last is kept.
#[derive(Debug, Clone)]
pub struct CollectionView<T> {
    records: Vec<Record<T>>,
    state: LoadState,
}

impl<T> Default for CollectionView<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            state: LoadState::Loading,
        }
    }
}

impl<T> CollectionView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    pub fn finish_load<E: Display>(&mut self, result: Result<Vec<Record<T>>, E>) {
        match result {
            Ok(records) => {
                self.records = records;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                error!("collection load failed: {}", e);
                self.state = LoadState::Loaded;
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn records(&self) -> &[Record<T>] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&Record<T>> {
        self.records.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[&str]) -> Vec<Record<()>> {
        ids.iter().map(|id| Record::new(*id, ())).collect()
    }

    #[test]
    fn starts_loading_and_empty() {
        let v: CollectionView<()> = CollectionView::new();
        assert!(v.is_loading());
        assert!(v.records().is_empty());
    }

    #[test]
    fn successful_load_replaces_records() {
        let mut v = CollectionView::new();
        v.finish_load::<String>(Ok(rows(&["a", "b"])));
        assert_eq!(v.state(), LoadState::Loaded);
        assert!(v.find("b").is_some());

        v.begin_load();
        assert!(v.is_loading());
        v.finish_load::<String>(Ok(rows(&["c"])));
        assert_eq!(v.records().len(), 1);
        assert!(v.find("a").is_none());
    }

    #[test]
    fn failed_load_keeps_previous_records_and_clears_flag() {
        let mut v = CollectionView::new();
        v.finish_load::<String>(Ok(rows(&["a"])));
        v.begin_load();
        v.finish_load(Err("connection refused"));
        assert!(!v.is_loading());
        assert_eq!(v.records().len(), 1);
    }

    #[test]
    fn failed_first_load_leaves_an_empty_view() {
        let mut v: CollectionView<()> = CollectionView::new();
        v.finish_load(Err("timeout"));
        assert_eq!(v.state(), LoadState::Loaded);
        assert!(v.records().is_empty());
    }
}
