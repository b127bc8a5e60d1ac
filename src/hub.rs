use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use serde::{Deserialize, Serialize};

use crate::data::DataCollection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    DataUpdated,
    SubsetCreated,
    SubsetUpdated,
    SubsetDeleted,
    ComponentAdded,
}

impl MessageKind {
    pub const ALL: [MessageKind; 5] = [
        MessageKind::DataUpdated,
        MessageKind::SubsetCreated,
        MessageKind::SubsetUpdated,
        MessageKind::SubsetDeleted,
        MessageKind::ComponentAdded,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub subscriber: String,
    pub data: String,
    pub message: MessageKind,
}

/// Which views listen to which datasets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub {
    #[serde(default)]
    subscriptions: Vec<Subscription>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the exact subscription already exists.
    pub fn subscribe(
        &mut self,
        subscriber: impl Into<String>,
        data: impl Into<String>,
        message: MessageKind,
    ) -> bool {
        let subscription = Subscription {
            subscriber: subscriber.into(),
            data: data.into(),
            message,
        };
        if self.subscriptions.contains(&subscription) {
            return false;
        }
        self.subscriptions.push(subscription);
        true
    }

    /// Drops every subscription of `subscriber`, returning how many went.
    pub fn unsubscribe(&mut self, subscriber: &str) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.subscriber != subscriber);
        before - self.subscriptions.len()
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn subscribers_for<'a>(
        &'a self,
        data: &'a str,
        message: MessageKind,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.subscriptions
            .iter()
            .filter(move |s| s.data == data && s.message == message)
            .map(|s| s.subscriber.as_str())
    }

    /// Subscriptions pointing at datasets the collection does not hold.
    pub fn dangling<'a>(
        &'a self,
        collection: &'a DataCollection,
    ) -> impl Iterator<Item = &'a Subscription> + 'a {
        self.subscriptions
            .iter()
            .filter(move |s| collection.get(&s.data).is_none())
    }

    /// One node per dataset and per subscriber, one edge per linked pair.
    pub fn link_graph(&self, collection: &DataCollection) -> StableGraph<String, ()> {
        let mut graph = StableGraph::new();
        let mut data_nodes: HashMap<&str, NodeIndex> = HashMap::new();
        let mut subscriber_nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for label in collection.labels() {
            data_nodes.insert(label, graph.add_node(label.to_string()));
        }

        for subscription in &self.subscriptions {
            let data = *data_nodes
                .entry(subscription.data.as_str())
                .or_insert_with(|| graph.add_node(subscription.data.clone()));
            let subscriber = *subscriber_nodes
                .entry(subscription.subscriber.as_str())
                .or_insert_with(|| graph.add_node(subscription.subscriber.clone()));

            if graph.find_edge(subscriber, data).is_none() {
                graph.add_edge(subscriber, data, ());
            }
        }

        graph
    }
}
