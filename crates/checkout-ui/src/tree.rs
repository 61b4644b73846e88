//! # Event Tree
//!
//! The "enclosing UI tree" widgets dispatch their notifications into.
//!
//! ## Propagation Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Event Propagation                                │
//! │                                                                         │
//! │  document (root)                                                       │
//! │    └── checkout-page            ◄── 4. composed events continue        │
//! │          └── #shadow-root       ◄── 3. non-composed events stop here   │
//! │                ├── gateway-selector  ◄── 1. target                     │
//! │                └── payment-form                                        │
//! │                                                                         │
//! │  1. Every event is delivered to listeners on the target node.          │
//! │  2. Non-bubbling events stop there.                                    │
//! │  3. Bubbling events walk up the parent chain. A shadow root is the     │
//! │     last stop unless the event is composed.                            │
//! │  4. Composed events continue from the shadow root to its host.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Listeners
//! A listener is an unbounded channel receiver. Dispatch never blocks and
//! never awaits; receivers that were dropped are pruned on the next
//! delivery attempt.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::trace;

use crate::error::{WidgetError, WidgetResult};
use crate::events::{EventInit, WidgetEvent};

// =============================================================================
// Node Identity
// =============================================================================

/// Handle to a node of an [`EventTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Kind of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root.
    Document,
    /// A regular element, named by its tag.
    Element(String),
    /// Shadow root attached to its parent (the host element).
    ShadowRoot,
}

struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    listeners: Vec<mpsc::UnboundedSender<DispatchedEvent>>,
}

// =============================================================================
// Dispatched Event
// =============================================================================

/// An event as seen by one listener.
#[derive(Debug, Clone)]
pub struct DispatchedEvent {
    pub event: WidgetEvent,
    /// Node the event was dispatched on.
    pub target: NodeId,
    /// Node whose listener received this copy.
    pub current_target: NodeId,
    pub dispatched_at: DateTime<Utc>,
}

/// Receiving end of a node listener.
pub struct EventListener {
    rx: mpsc::UnboundedReceiver<DispatchedEvent>,
}

impl EventListener {
    /// Waits for the next event. `None` once the tree is dropped.
    pub async fn recv(&mut self) -> Option<DispatchedEvent> {
        self.rx.recv().await
    }

    /// Returns the next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<DispatchedEvent> {
        self.rx.try_recv().ok()
    }

    /// Drains every queued event.
    pub fn drain(&mut self) -> Vec<DispatchedEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

// =============================================================================
// Event Sink
// =============================================================================

/// Where widgets send their notifications.
pub trait EventSink: Send + Sync {
    /// Dispatches `event` on `target`. Returns the number of deliveries.
    fn dispatch(&self, target: NodeId, event: WidgetEvent) -> usize;
}

/// Sink that drops every event (for widgets used without a tree).
pub struct NoOpSink;

impl EventSink for NoOpSink {
    fn dispatch(&self, _target: NodeId, _event: WidgetEvent) -> usize {
        0
    }
}

// =============================================================================
// Event Tree
// =============================================================================

/// Arena of nodes with parent links and per-node listeners.
pub struct EventTree {
    nodes: RwLock<Vec<Node>>,
}

impl EventTree {
    /// Creates a tree holding only the document root.
    pub fn new() -> Self {
        EventTree {
            nodes: RwLock::new(vec![Node {
                kind: NodeKind::Document,
                parent: None,
                listeners: Vec::new(),
            }]),
        }
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends an element under `parent`.
    pub fn append_element(&self, parent: NodeId, tag: &str) -> WidgetResult<NodeId> {
        self.push_node(parent, NodeKind::Element(tag.to_string()))
    }

    /// Attaches a shadow root to `host`.
    pub fn attach_shadow(&self, host: NodeId) -> WidgetResult<NodeId> {
        self.push_node(host, NodeKind::ShadowRoot)
    }

    /// Returns the kind of a node.
    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        let nodes = self.nodes.read().unwrap_or_else(PoisonError::into_inner);
        nodes.get(node.0).map(|n| n.kind.clone())
    }

    /// Registers a listener on `node`.
    pub fn listen(&self, node: NodeId) -> WidgetResult<EventListener> {
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        let entry = nodes.get_mut(node.0).ok_or(WidgetError::UnknownNode(node.0))?;

        let (tx, rx) = mpsc::unbounded_channel();
        entry.listeners.push(tx);
        Ok(EventListener { rx })
    }

    /// Computes the nodes an event with `init` visits, target first.
    pub fn propagation_path(&self, target: NodeId, init: EventInit) -> Vec<NodeId> {
        let nodes = self.nodes.read().unwrap_or_else(PoisonError::into_inner);
        Self::path_in(&nodes, target, init)
    }

    /// Dispatches `event` with explicit propagation flags instead of the
    /// event's own [`WidgetEvent::init`].
    pub fn dispatch_with(&self, target: NodeId, event: WidgetEvent, init: EventInit) -> usize {
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        let path = Self::path_in(&nodes, target, init);
        let dispatched_at = Utc::now();
        let mut delivered = 0;

        for node_id in path {
            let node = &mut nodes[node_id.0];
            node.listeners.retain(|tx| {
                let copy = DispatchedEvent {
                    event: event.clone(),
                    target,
                    current_target: node_id,
                    dispatched_at,
                };
                match tx.send(copy) {
                    Ok(()) => {
                        delivered += 1;
                        true
                    }
                    Err(_) => false,
                }
            });
        }

        trace!(event = event.name(), %target, delivered, "Event dispatched");
        delivered
    }

    fn path_in(nodes: &[Node], target: NodeId, init: EventInit) -> Vec<NodeId> {
        let Some(target_node) = nodes.get(target.0) else {
            return Vec::new();
        };

        let mut path = vec![target];
        if !init.bubbles {
            return path;
        }

        let mut current = target_node;
        while let Some(parent) = current.parent {
            if current.kind == NodeKind::ShadowRoot && !init.composed {
                break;
            }
            path.push(parent);
            current = &nodes[parent.0];
        }

        path
    }

    fn push_node(&self, parent: NodeId, kind: NodeKind) -> WidgetResult<NodeId> {
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        if parent.0 >= nodes.len() {
            return Err(WidgetError::UnknownNode(parent.0));
        }

        let id = NodeId(nodes.len());
        nodes.push(Node {
            kind,
            parent: Some(parent),
            listeners: Vec::new(),
        });
        Ok(id)
    }
}

impl Default for EventTree {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventTree {
    fn dispatch(&self, target: NodeId, event: WidgetEvent) -> usize {
        let init = event.init();
        self.dispatch_with(target, event, init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{GatewayDetail, PaymentErrorDetail};
    use checkout_core::PaymentGateway;

    fn selected() -> WidgetEvent {
        WidgetEvent::GatewaySelected(GatewayDetail {
            gateway: PaymentGateway::Paypal,
        })
    }

    fn local() -> WidgetEvent {
        WidgetEvent::PaymentError(PaymentErrorDetail {
            error: "Payment declined".into(),
            code: "PAYMENT_DECLINED".into(),
        })
    }

    /// document > page > #shadow > widget
    fn page_tree() -> (EventTree, NodeId, NodeId, NodeId) {
        let tree = EventTree::new();
        let page = tree.append_element(tree.root(), "checkout-page").unwrap();
        let shadow = tree.attach_shadow(page).unwrap();
        let widget = tree.append_element(shadow, "gateway-selector").unwrap();
        (tree, page, shadow, widget)
    }

    #[test]
    fn test_bubbling_composed_event_crosses_shadow_root() {
        let (tree, page, shadow, widget) = page_tree();
        assert_eq!(
            tree.propagation_path(widget, selected().init()),
            vec![widget, shadow, page, tree.root()]
        );
    }

    #[test]
    fn test_local_event_stays_on_target() {
        let (tree, _page, _shadow, widget) = page_tree();
        assert_eq!(tree.propagation_path(widget, local().init()), vec![widget]);
    }

    #[test]
    fn test_bubbling_uncomposed_event_stops_at_shadow_root() {
        let (tree, page, shadow, widget) = page_tree();
        let bubbling = EventInit {
            bubbles: true,
            composed: false,
        };
        assert_eq!(tree.propagation_path(widget, bubbling), vec![widget, shadow]);

        let mut on_shadow = tree.listen(shadow).unwrap();
        let mut on_page = tree.listen(page).unwrap();
        assert_eq!(tree.dispatch_with(widget, selected(), bubbling), 1);
        assert_eq!(on_shadow.drain()[0].current_target, shadow);
        assert!(on_page.try_recv().is_none());

        // A composed event from inside the same shadow tree gets through
        tree.dispatch(widget, selected());
        assert_eq!(on_page.drain().len(), 1);
    }

    #[test]
    fn test_listeners_receive_with_current_target() {
        let (tree, page, _shadow, widget) = page_tree();
        let mut on_page = tree.listen(page).unwrap();
        let mut on_widget = tree.listen(widget).unwrap();

        let delivered = tree.dispatch(widget, selected());
        assert_eq!(delivered, 2);

        let seen = on_page.drain();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].target, widget);
        assert_eq!(seen[0].current_target, page);
        assert_eq!(on_widget.drain().len(), 1);

        // Local event never reaches the page
        tree.dispatch(widget, local());
        assert!(on_page.try_recv().is_none());
        assert_eq!(on_widget.drain().len(), 1);
    }

    #[test]
    fn test_dropped_listeners_are_pruned() {
        let (tree, page, _shadow, widget) = page_tree();
        let listener = tree.listen(page).unwrap();
        drop(listener);
        assert_eq!(tree.dispatch(widget, selected()), 0);
    }

    #[test]
    fn test_unknown_nodes() {
        let tree = EventTree::new();
        let bogus = NodeId(42);
        assert!(matches!(
            tree.append_element(bogus, "div"),
            Err(WidgetError::UnknownNode(42))
        ));
        assert!(tree.listen(bogus).is_err());
        assert!(tree.propagation_path(bogus, selected().init()).is_empty());
        assert_eq!(tree.kind(tree.root()), Some(NodeKind::Document));
    }
}
