// ── Resource state slices ──
//
// Each slice publishes an immutable `Arc` snapshot through a `watch`
// channel. All mutations are reducer methods applied with `send_modify`,
// so every transition is atomic per slice and observed by subscribers in
// order. Views never mutate a snapshot.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::model::{Entity, EntityId};

/// Where a newly created entity lands in `items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    Prepend,
}

/// Marks one outstanding list request. Only the newest ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ListTicket(u64);

// ── SliceState ───────────────────────────────────────────────────────

/// Snapshot of one resource collection.
#[derive(Debug)]
pub struct SliceState<T> {
    pub items: Vec<Arc<T>>,
    /// Result of the last single-entity fetch. Independent of `items`.
    pub selected: Option<Arc<T>>,
    /// `true` while any operation on this slice is outstanding.
    pub loading: bool,
    /// Message of the most recent failure; cleared when an operation starts.
    pub error: Option<String>,
    in_flight: usize,
    list_seq: u64,
}

// Entities sit behind `Arc`, so cloning a snapshot never needs `T: Clone`.
impl<T> Clone for SliceState<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            selected: self.selected.clone(),
            loading: self.loading,
            error: self.error.clone(),
            in_flight: self.in_flight,
            list_seq: self.list_seq,
        }
    }
}

impl<T> Default for SliceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            loading: false,
            error: None,
            in_flight: 0,
            list_seq: 0,
        }
    }
}

impl<T: Entity> SliceState<T> {
    pub fn get(&self, id: &EntityId) -> Option<&Arc<T>> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }
}

impl<T> SliceState<T> {
    fn start(&mut self) {
        self.in_flight += 1;
        self.loading = true;
        self.error = None;
    }

    fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }
}

// ── ResourceSlice ────────────────────────────────────────────────────

/// Reactive state for one entity collection.
pub struct ResourceSlice<T: Send + Sync + 'static> {
    name: &'static str,
    state: watch::Sender<Arc<SliceState<T>>>,
}

impl<T: Entity + Send + Sync + 'static> ResourceSlice<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(Arc::new(SliceState::default()));
        Self { name, state }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<SliceState<T>> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<SliceState<T>>> {
        self.state.subscribe()
    }

    fn apply(&self, reduce: impl FnOnce(&mut SliceState<T>)) {
        self.state.send_modify(|current| {
            let mut next = SliceState::clone(&**current);
            reduce(&mut next);
            *current = Arc::new(next);
        });
    }

    // ── Pending ──────────────────────────────────────────────────────

    pub(crate) fn begin(&self) {
        self.apply(SliceState::start);
    }

    pub(crate) fn begin_list(&self) -> ListTicket {
        let mut ticket = ListTicket(0);
        self.apply(|s| {
            s.start();
            s.list_seq += 1;
            ticket = ListTicket(s.list_seq);
        });
        ticket
    }

    // ── Fulfilled ────────────────────────────────────────────────────

    /// Replace `items` wholesale, unless a newer list request was issued
    /// after `ticket`. Returns whether the result was committed.
    pub(crate) fn fulfil_list<I>(&self, ticket: ListTicket, items: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Arc<T>>,
    {
        let mut committed = false;
        self.apply(|s| {
            s.finish();
            if ticket.0 == s.list_seq {
                s.items = items.into_iter().map(Into::into).collect();
                committed = true;
            }
        });
        if !committed {
            debug!(slice = self.name, "discarding stale list response");
        }
        committed
    }

    pub(crate) fn fulfil_one(&self, entity: T) -> Arc<T> {
        let entity = Arc::new(entity);
        self.apply(|s| {
            s.finish();
            s.selected = Some(Arc::clone(&entity));
        });
        entity
    }

    pub(crate) fn fulfil_create(&self, entity: T, placement: Placement) -> Arc<T> {
        let entity = Arc::new(entity);
        self.apply(|s| {
            s.finish();
            match placement {
                Placement::Append => s.items.push(Arc::clone(&entity)),
                Placement::Prepend => s.items.insert(0, Arc::clone(&entity)),
            }
        });
        entity
    }

    /// Replace the entity with the same id. Absent ids leave `items` alone.
    pub(crate) fn fulfil_update(&self, entity: T) -> Arc<T> {
        let entity = Arc::new(entity);
        let mut found = false;
        self.apply(|s| {
            s.finish();
            if let Some(slot) = s.items.iter_mut().find(|e| e.id() == entity.id()) {
                *slot = Arc::clone(&entity);
                found = true;
            }
        });
        if !found {
            debug!(slice = self.name, id = %entity.id(), "updated entity not in local list");
        }
        entity
    }

    /// Drop the first entity with `id`. Absent ids leave `items` alone.
    pub(crate) fn fulfil_remove(&self, id: &EntityId) {
        let mut found = false;
        self.apply(|s| {
            s.finish();
            if let Some(pos) = s.items.iter().position(|e| e.id() == id) {
                s.items.remove(pos);
                found = true;
            }
        });
        if !found {
            debug!(slice = self.name, %id, "removed entity not in local list");
        }
    }

    // ── Rejected ─────────────────────────────────────────────────────

    pub(crate) fn reject(&self, message: String) {
        self.apply(|s| {
            s.finish();
            s.error = Some(message);
        });
    }

    /// Reject a list request. A stale ticket's failure is not recorded.
    pub(crate) fn reject_list(&self, ticket: ListTicket, message: String) {
        self.apply(|s| {
            s.finish();
            if ticket.0 == s.list_seq {
                s.error = Some(message);
            }
        });
    }
}

// ── ValueSlot ────────────────────────────────────────────────────────

/// Snapshot of a single fetched value (dashboard, stats, salary report).
#[derive(Debug)]
pub struct ValueState<V> {
    pub value: Option<Arc<V>>,
    pub loading: bool,
    pub error: Option<String>,
    in_flight: usize,
    seq: u64,
}

impl<V> Clone for ValueState<V> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            loading: self.loading,
            error: self.error.clone(),
            in_flight: self.in_flight,
            seq: self.seq,
        }
    }
}

impl<V> Default for ValueState<V> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
            in_flight: 0,
            seq: 0,
        }
    }
}

/// Reactive state for one auxiliary value. Latest request wins.
pub struct ValueSlot<V: Send + Sync + 'static> {
    name: &'static str,
    state: watch::Sender<Arc<ValueState<V>>>,
}

impl<V: Send + Sync + 'static> ValueSlot<V> {
    pub(crate) fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(Arc::new(ValueState::default()));
        Self { name, state }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn snapshot(&self) -> Arc<ValueState<V>> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ValueState<V>>> {
        self.state.subscribe()
    }

    fn apply(&self, reduce: impl FnOnce(&mut ValueState<V>)) {
        self.state.send_modify(|current| {
            let mut next = ValueState::clone(&**current);
            reduce(&mut next);
            *current = Arc::new(next);
        });
    }

    pub(crate) fn begin(&self) -> ListTicket {
        let mut ticket = ListTicket(0);
        self.apply(|s| {
            s.in_flight += 1;
            s.loading = true;
            s.error = None;
            s.seq += 1;
            ticket = ListTicket(s.seq);
        });
        ticket
    }

    pub(crate) fn fulfil(&self, ticket: ListTicket, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.apply(|s| {
            s.in_flight = s.in_flight.saturating_sub(1);
            s.loading = s.in_flight > 0;
            if ticket.0 == s.seq {
                s.value = Some(Arc::clone(&value));
            }
        });
        value
    }

    pub(crate) fn reject(&self, ticket: ListTicket, message: String) {
        self.apply(|s| {
            s.in_flight = s.in_flight.saturating_sub(1);
            s.loading = s.in_flight > 0;
            if ticket.0 == s.seq {
                s.error = Some(message);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: EntityId,
        label: &'static str,
    }

    impl Entity for Item {
        fn id(&self) -> &EntityId {
            &self.id
        }
    }

    fn item(id: &str, label: &'static str) -> Item {
        Item {
            id: EntityId::from(id),
            label,
        }
    }

    fn ids(slice: &ResourceSlice<Item>) -> Vec<String> {
        slice
            .snapshot()
            .items
            .iter()
            .map(|e| e.id.to_string())
            .collect()
    }

    fn seeded(items: &[&str]) -> ResourceSlice<Item> {
        let slice = ResourceSlice::new("items");
        let ticket = slice.begin_list();
        slice.fulfil_list(ticket, items.iter().map(|id| item(id, "seed")).collect::<Vec<_>>());
        slice
    }

    #[test]
    fn list_replaces_items_and_clears_loading() {
        let slice = seeded(&["a", "b"]);
        let ticket = slice.begin_list();
        assert!(slice.snapshot().loading);
        assert!(slice.fulfil_list(ticket, vec![item("c", "new")]));
        let snap = slice.snapshot();
        assert_eq!(ids(&slice), vec!["c"]);
        assert!(!snap.loading);
        assert_eq!(snap.error, None);
    }

    #[test]
    fn stale_list_response_is_discarded() {
        let slice = seeded(&["a"]);
        let older = slice.begin_list();
        let newer = slice.begin_list();
        assert!(slice.fulfil_list(newer, vec![item("new", "x")]));
        assert!(slice.snapshot().loading);
        assert!(!slice.fulfil_list(older, vec![item("old", "x")]));
        assert_eq!(ids(&slice), vec!["new"]);
        assert!(!slice.snapshot().loading);
    }

    #[test]
    fn create_respects_placement() {
        let slice = seeded(&["a"]);
        slice.begin();
        slice.fulfil_create(item("b", "x"), Placement::Append);
        slice.begin();
        slice.fulfil_create(item("z", "x"), Placement::Prepend);
        assert_eq!(ids(&slice), vec!["z", "a", "b"]);
    }

    #[test]
    fn update_replaces_by_id() {
        let slice = seeded(&["a", "b"]);
        slice.begin();
        slice.fulfil_update(item("b", "changed"));
        let snap = slice.snapshot();
        assert_eq!(snap.items[1].label, "changed");
        assert_eq!(snap.items.len(), 2);
    }

    #[test]
    fn update_of_absent_id_is_noop() {
        let slice = seeded(&["a", "b"]);
        let before = slice.snapshot();
        slice.begin();
        slice.fulfil_update(item("zzz", "ghost"));
        let after = slice.snapshot();
        assert_eq!(after.items, before.items);
        assert_eq!(after.error, None);
        assert!(!after.loading);
    }

    #[test]
    fn remove_drops_single_match() {
        let slice = seeded(&["r1", "r2"]);
        slice.begin();
        slice.fulfil_remove(&EntityId::from("r1"));
        assert_eq!(ids(&slice), vec!["r2"]);

        slice.begin();
        slice.fulfil_remove(&EntityId::from("missing"));
        assert_eq!(ids(&slice), vec!["r2"]);
    }

    #[test]
    fn reject_keeps_items() {
        let slice = seeded(&["a"]);
        let ticket = slice.begin_list();
        slice.reject_list(ticket, "Failed to load items".into());
        let snap = slice.snapshot();
        assert_eq!(ids(&slice), vec!["a"]);
        assert_eq!(snap.error.as_deref(), Some("Failed to load items"));
        assert!(!snap.loading);
    }

    #[test]
    fn loading_tracks_overlapping_operations() {
        let slice = seeded(&[]);
        slice.begin();
        slice.begin();
        slice.fulfil_create(item("a", "x"), Placement::Append);
        assert!(slice.snapshot().loading);
        slice.reject("boom".into());
        assert!(!slice.snapshot().loading);
    }

    #[test]
    fn get_one_fills_selected_only() {
        let slice = seeded(&["a"]);
        slice.begin();
        slice.fulfil_one(item("b", "detail"));
        let snap = slice.snapshot();
        assert_eq!(snap.selected.as_deref(), Some(&item("b", "detail")));
        assert_eq!(ids(&slice), vec!["a"]);
    }

    #[test]
    fn value_slot_latest_wins() {
        let slot: ValueSlot<u32> = ValueSlot::new("stats");
        let first = slot.begin();
        let second = slot.begin();
        slot.fulfil(second, 2);
        slot.fulfil(first, 1);
        let snap = slot.snapshot();
        assert_eq!(snap.value.as_deref(), Some(&2));
        assert!(!snap.loading);
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let slice = seeded(&[]);
        let mut rx = slice.subscribe();
        rx.mark_unchanged();
        slice.begin();
        slice.fulfil_create(item("a", "x"), Placement::Append);
        rx.changed().await.expect("slice dropped");
        assert_eq!(rx.borrow().items.len(), 1);
    }

    #[test]
    fn snapshots_clone_without_cloning_entities() {
        #[derive(Debug)]
        struct Opaque(EntityId);

        impl Entity for Opaque {
            fn id(&self) -> &EntityId {
                &self.0
            }
        }

        let slice = ResourceSlice::<Opaque>::new("opaque");
        let ticket = slice.begin_list();
        assert!(slice.fulfil_list(ticket, vec![Opaque(EntityId::from("o1"))]));

        let snapshot = slice.snapshot();
        let copy = SliceState::clone(&*snapshot);
        assert!(Arc::ptr_eq(&snapshot.items[0], &copy.items[0]));

        let value = ValueSlot::<Opaque>::new("value");
        let copy = ValueState::clone(&*value.snapshot());
        assert!(copy.value.is_none());
    }
}
