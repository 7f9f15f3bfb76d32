use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    marker::PhantomData,
    sync::{
        mpsc::{self, channel, Receiver, Sender},
        Arc,
    },
};

/// A simple publish/subscribe system that allows sending and subscribing to values on different
/// topics. Each topic name is allocated to a single type, attempts to subscribe and publish to the
/// same topic with different types will panic!
///
/// The bus is deliberately single-threaded: published values are queued and only handed to the
/// subscribers when [`PubSub::tick`] is called, which the UI does once per frame.
pub struct PubSub {
    topics: HashMap<String, Topic>,
}

struct Topic {
    value_type: TypeId,
    value_name: &'static str,
    incoming_sender: Sender<Arc<dyn Any + Send + Sync + 'static>>,
    incoming_recv: Receiver<Arc<dyn Any + Send + Sync + 'static>>,
    outgoing: Vec<Sender<Arc<dyn Any + Send + Sync + 'static>>>,
}

impl Topic {
    fn new<T: Any + Send + Sync + 'static>() -> Self {
        // the queue where published items wait until the next tick
        let (send, recv) = channel();

        Self {
            value_type: TypeId::of::<T>(),
            value_name: type_name::<T>(),
            incoming_sender: send,
            incoming_recv: recv,
            outgoing: Vec::new(),
        }
    }
}

pub struct Subscription<T: Any + Send + Sync + 'static> {
    topic: String,
    receiver: Receiver<Arc<dyn Any + Send + Sync + 'static>>,
    _phantom: PhantomData<T>,
}

impl<T: Any + Send + Sync + 'static> Subscription<T> {
    /// Tries to receive a value from the subscribed topic without blocking.
    pub fn try_recv(&mut self) -> Option<Arc<T>> {
        match self.receiver.try_recv() {
            Ok(value) => Some(
                value
                    .downcast::<T>()
                    .expect("Received value was not of the expected type"),
            ),
            Err(mpsc::TryRecvError::Empty) | Err(mpsc::TryRecvError::Disconnected) => None,
        }
    }

    /// Drains everything queued on the topic and returns the most recent value, if any.
    ///
    /// Useful for high-rate topics (e.g. viewport updates) where only the latest state matters.
    pub fn latest(&mut self) -> Option<Arc<T>> {
        let mut latest = None;
        while let Some(value) = self.try_recv() {
            latest = Some(value);
        }
        latest
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[derive(Clone)]
pub struct Publisher<T: Any + Send + Sync + 'static> {
    topic: String,
    send: Sender<Arc<dyn Any + Send + Sync + 'static>>,
    _p: PhantomData<T>,
}

impl<T: Any + Send + Sync + 'static> Publisher<T> {
    /// Publishes a value wrapped in an `Arc` to the topic. The value is delivered on the next
    /// [`PubSub::tick`].
    pub fn publish(&mut self, value: Arc<T>) {
        // the receiving end lives as long as the PubSub itself, but a Publisher may outlive
        // it during shutdown, in which case the value is simply dropped
        let _ = self.send.send(value);
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl Default for PubSub {
    fn default() -> Self {
        Self::new()
    }
}

impl PubSub {
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
        }
    }

    fn get_topic_by_name_or_insert<T: Any + Send + Sync + 'static>(
        &mut self,
        topic: &str,
    ) -> &mut Topic {
        let t = self
            .topics
            .entry(topic.into())
            .or_insert_with(Topic::new::<T>);

        // make sure this topic was not previously claimed with a different type.
        assert!(
            t.value_type == TypeId::of::<T>(),
            "Topic {topic} already claimed by type '{}', but current type is '{}'",
            t.value_name,
            type_name::<T>()
        );

        t
    }

    /// Register as a publisher of the specific type to the topic name. Panics if the topic has
    /// already been allocated to values of a different type.
    pub fn publish<T: Any + Send + Sync + 'static>(&mut self, topic: &str) -> Publisher<T> {
        let t = self.get_topic_by_name_or_insert::<T>(topic);

        Publisher {
            topic: topic.to_string(),
            send: t.incoming_sender.clone(),
            _p: PhantomData,
        }
    }

    /// Subscribe to messages of the specific type on the topic name. Panics if the topic has
    /// already been allocated to values of a different type.
    pub fn subscribe<T: Any + Send + Sync + 'static>(&mut self, topic: &str) -> Subscription<T> {
        let t = self.get_topic_by_name_or_insert::<T>(topic);

        // create a channel for receiving the published messages
        let (send, recv) = channel();

        t.outgoing.push(send);

        Subscription {
            topic: topic.to_owned(),
            receiver: recv,
            _phantom: PhantomData,
        }
    }

    /// Processes and distributes queued messages to all subscribers. Subscriptions that have been
    /// dropped are pruned here.
    pub fn tick(&mut self) {
        for t in self.topics.values_mut() {
            while let Ok(v) = t.incoming_recv.try_recv() {
                t.outgoing.retain(|s| s.send(v.clone()).is_ok());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_to_all_subscribers_on_tick() {
        let mut ps = PubSub::new();
        let mut s1 = ps.subscribe::<u32>("test");
        let mut s2 = ps.subscribe::<u32>("test");
        let mut p = ps.publish::<u32>("test");

        p.publish(Arc::new(42));

        // nothing is delivered before the tick
        assert!(s1.try_recv().is_none());

        ps.tick();

        assert_eq!(*s1.try_recv().unwrap(), 42);
        assert_eq!(*s2.try_recv().unwrap(), 42);
        assert!(s1.try_recv().is_none());
    }

    #[test]
    fn latest_drains_the_queue() {
        let mut ps = PubSub::new();
        let mut s = ps.subscribe::<u32>("test");
        let mut p = ps.publish::<u32>("test");

        for v in 0..5 {
            p.publish(Arc::new(v));
        }
        ps.tick();

        assert_eq!(*s.latest().unwrap(), 4);
        assert!(s.latest().is_none());
    }

    #[test]
    fn dropped_subscription_is_pruned() {
        let mut ps = PubSub::new();
        let s = ps.subscribe::<u32>("test");
        let mut p = ps.publish::<u32>("test");

        drop(s);
        p.publish(Arc::new(1));
        ps.tick(); // must not panic
    }

    #[test]
    #[should_panic(expected = "already claimed")]
    fn topic_is_bound_to_a_single_type() {
        let mut ps = PubSub::new();
        let _s = ps.subscribe::<u32>("test");
        let _p = ps.publish::<String>("test");
    }
}
