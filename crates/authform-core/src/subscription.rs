use crate::event::InputEvent;
use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

type Listener<Msg> = Arc<dyn Fn(&InputEvent) -> Option<Msg> + Send + Sync>;

/// A long-lived input listener managed by the runtime.
///
/// Subscriptions are declared in [`Model::subscriptions`](crate::Model::subscriptions)
/// and reconciled after every update by [`SubscriptionId`]: a new id is
/// attached once, a missing id is detached once, and an unchanged id keeps
/// running untouched no matter how often the model re-renders.
///
/// Because an unchanged id keeps its *first* listener, listeners should only
/// translate events into messages and leave state-dependent decisions to
/// `update`.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) listener: Listener<Msg>,
}

/// Identity for diffing subscriptions between update cycles.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
    label: String,
}

impl SubscriptionId {
    /// Create an ID from a type alone (for singletons).
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant: 0,
            label: short_type_name::<T>().to_string(),
        }
    }

    /// Create an ID from a type and a string discriminant, typically the
    /// instance name of the control that owns the listener.
    pub fn with_str<T: 'static>(s: &str) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        s.hash(&mut hasher);
        Self {
            type_id: TypeId::of::<T>(),
            discriminant: hasher.finish(),
            label: format!("{}:{s}", short_type_name::<T>()),
        }
    }

    /// Human-readable form used in logs.
    pub fn label(&self) -> &str {
        &self.label
    }
}

fn short_type_name<T: 'static>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Create a subscription from an id and a listener.
    pub fn new(
        id: SubscriptionId,
        listener: impl Fn(&InputEvent) -> Option<Msg> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            listener: Arc::new(listener),
        }
    }

    /// This subscription's identity.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Run the listener against one event.
    pub fn deliver(&self, event: &InputEvent) -> Option<Msg> {
        (self.listener)(event)
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let inner = self.listener;
        Subscription {
            id: self.id,
            listener: Arc::new(move |event| inner(event).map(&f)),
        }
    }
}

/// Marker type naming the screen-wide input listener.
pub struct InputEvents;

/// Marker type naming per-instance pointer-down listeners.
pub struct PointerListener;

/// Listen to every input event. There is one such listener per program.
pub fn input_events<Msg: Send + 'static>(
    map: impl Fn(&InputEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    Subscription::new(SubscriptionId::of::<InputEvents>(), map)
}

/// Listen to pointer-down events on behalf of one control instance.
///
/// `owner` must be unique per instance so that two controls never share, and
/// never tear down, each other's listener.
pub fn pointer_down<Msg: Send + 'static>(
    owner: &str,
    map: impl Fn(u16, u16) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    Subscription::new(
        SubscriptionId::with_str::<PointerListener>(owner),
        move |event| match *event {
            InputEvent::PointerDown { column, row } => map(column, row),
            _ => None,
        },
    )
}

/// Split the declared subscriptions into the ones to attach and the ids to
/// detach, given the currently active ids.
pub(crate) fn diff<Msg: Send + 'static>(
    active: impl Iterator<Item = SubscriptionId>,
    declared: Vec<Subscription<Msg>>,
) -> (Vec<Subscription<Msg>>, Vec<SubscriptionId>) {
    let mut declared_by_id: HashMap<SubscriptionId, Subscription<Msg>> = HashMap::new();
    for sub in declared {
        declared_by_id.entry(sub.id.clone()).or_insert(sub);
    }

    let mut detach = Vec::new();
    for id in active {
        if declared_by_id.remove(&id).is_none() {
            detach.push(id);
        }
    }

    let attach = declared_by_id.into_values().collect();
    (attach, detach)
}

/// Holds the attached subscriptions and delivers input to them.
///
/// Listeners run inline on the update task: [`dispatch`](Self::dispatch)
/// walks every attached listener for one event before the next event is
/// read, so messages reach `update` in the order their events arrived.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: BTreeMap<SubscriptionId, Subscription<Msg>>,
    attached: usize,
    detached: usize,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new() -> Self {
        Self {
            active: BTreeMap::new(),
            attached: 0,
            detached: 0,
        }
    }

    /// Attach new subscriptions, detach removed ones, keep unchanged ones.
    pub fn reconcile(&mut self, declared: Vec<Subscription<Msg>>) {
        let (attach, detach) = diff(self.active.keys().cloned(), declared);

        for id in detach {
            if self.active.remove(&id).is_some() {
                self.detached += 1;
                tracing::debug!(listener = id.label(), "listener detached");
            }
        }

        for sub in attach {
            tracing::debug!(listener = sub.id.label(), "listener attached");
            self.attached += 1;
            self.active.insert(sub.id.clone(), sub);
        }
    }

    /// Run one event through every attached listener, in id order.
    pub fn dispatch(&self, event: &InputEvent) -> Vec<Msg> {
        self.active
            .values()
            .filter_map(|sub| sub.deliver(event))
            .collect()
    }

    /// Detach everything.
    pub fn shutdown(&mut self) {
        let ids: Vec<_> = self.active.keys().cloned().collect();
        for id in ids {
            self.active.remove(&id);
            self.detached += 1;
            tracing::debug!(listener = id.label(), "listener detached");
        }
    }

    pub fn active_ids(&self) -> impl Iterator<Item = &SubscriptionId> {
        self.active.keys()
    }

    /// Number of attached listeners.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Total (attach, detach) operations so far.
    pub fn churn(&self) -> (usize, usize) {
        (self.attached, self.detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn subscription_id_equality() {
        assert_eq!(SubscriptionId::of::<String>(), SubscriptionId::of::<String>());
        assert_ne!(SubscriptionId::of::<String>(), SubscriptionId::of::<i32>());
    }

    #[test]
    fn subscription_id_with_str() {
        let a = SubscriptionId::with_str::<PointerListener>("role");
        let b = SubscriptionId::with_str::<PointerListener>("marketing");
        assert_ne!(a, b);
        assert_eq!(a, SubscriptionId::with_str::<PointerListener>("role"));
        assert_eq!(a.label(), "PointerListener:role");
    }

    #[test]
    fn pointer_down_ignores_keys() {
        let sub = pointer_down("role", |c, r| Some((c, r)));
        let key = InputEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(sub.deliver(&key), None);
        assert_eq!(
            sub.deliver(&InputEvent::PointerDown { column: 3, row: 9 }),
            Some((3, 9))
        );
    }

    #[test]
    fn map_composes_listener() {
        let sub = pointer_down("role", |c, _| Some(c)).map(|c| c * 2);
        assert_eq!(
            sub.deliver(&InputEvent::PointerDown { column: 5, row: 0 }),
            Some(10)
        );
    }

    #[test]
    fn diff_keeps_unchanged_and_detaches_missing() {
        let active = vec![
            SubscriptionId::with_str::<PointerListener>("role"),
            SubscriptionId::with_str::<PointerListener>("marketing"),
        ];
        let declared = vec![
            pointer_down("role", |_, _| Some(())),
            input_events(|_| Some(())),
        ];
        let (attach, detach) = diff(active.into_iter(), declared);
        assert_eq!(attach.len(), 1);
        assert_eq!(attach[0].id(), &SubscriptionId::of::<InputEvents>());
        assert_eq!(
            detach,
            vec![SubscriptionId::with_str::<PointerListener>("marketing")]
        );
    }

    #[test]
    fn manager_attaches_once_across_reconciles() {
        let mut manager = SubscriptionManager::<()>::new();
        for _ in 0..5 {
            manager.reconcile(vec![pointer_down("role", |_, _| Some(()))]);
        }
        assert_eq!(manager.active_count(), 1);
        assert_eq!(manager.churn(), (1, 0));
    }

    #[test]
    fn manager_detaches_removed() {
        let mut manager = SubscriptionManager::<()>::new();
        manager.reconcile(vec![
            pointer_down("role", |_, _| Some(())),
            pointer_down("marketing", |_, _| Some(())),
        ]);
        assert_eq!(manager.active_count(), 2);

        manager.reconcile(vec![pointer_down("marketing", |_, _| Some(()))]);
        assert_eq!(manager.active_count(), 1);
        assert_eq!(manager.churn(), (2, 1));

        manager.shutdown();
        assert_eq!(manager.active_count(), 0);
        assert_eq!(manager.churn(), (2, 2));
    }

    #[test]
    fn dispatch_reaches_each_listener() {
        let mut manager = SubscriptionManager::new();
        manager.reconcile(vec![
            pointer_down("role", |_, _| Some("role")),
            pointer_down("marketing", |_, _| Some("marketing")),
        ]);
        let mut got = manager.dispatch(&InputEvent::PointerDown { column: 1, row: 1 });
        got.sort();
        assert_eq!(got, vec!["marketing", "role"]);
    }

    #[test]
    fn dispatch_keeps_arrival_order_across_listeners() {
        let mut manager = SubscriptionManager::new();
        manager.reconcile(vec![
            pointer_down("role", |_, _| Some("pointer")),
            input_events(|event| match event {
                InputEvent::Key(_) => Some("key"),
                _ => None,
            }),
        ]);

        let events = [
            InputEvent::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            InputEvent::PointerDown { column: 4, row: 4 },
            InputEvent::Key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE)),
        ];
        let got: Vec<_> = events.iter().flat_map(|e| manager.dispatch(e)).collect();
        assert_eq!(got, vec!["key", "pointer", "key"]);
    }
}
