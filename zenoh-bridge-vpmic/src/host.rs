//! Instrument attach/detach against a Zenoh session.
//!
//! One [`InstrumentHost`] is the live registration of one instrument
//! instance: a queryable per attribute serving reads, plus a subscriber
//! per writable attribute applying writes. Every handle is pre-bound to
//! its fixed (channel, attribute) pair at declaration time, so no index
//! is ever taken from the wire.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use zenoh::Session;
use zenoh::handlers::FifoChannelHandler;
use zenoh::pubsub::Subscriber;
use zenoh::query::{Query, Queryable};
use zenoh::sample::{Sample, SampleKind};

use zenmon_common::keyexpr::AttrKeyBuilder;
use zenmon_instrument::{AttributeBinding, ChannelStore, bindings, read, write_input_bytes};

use crate::config::InstrumentConfig;

/// Error type for attach operations.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Failed to declare '{key}': {message}")]
    Declare { key: String, message: String },
}

/// The live Zenoh registration of one instrument instance.
///
/// Dropping the channel store is sequenced strictly after every
/// registered handle has been revoked; [`InstrumentHost::detach`] owns
/// that ordering.
pub struct InstrumentHost {
    name: String,
    store: Arc<ChannelStore>,
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl InstrumentHost {
    /// Attach an instrument instance to the session.
    ///
    /// Creates the channel store and walks the attribute binding table
    /// once, declaring a queryable for every attribute and a subscriber
    /// for every writable one. If any declaration fails, everything
    /// declared so far is revoked and the attach fails outright; no
    /// partial registration is left behind.
    pub async fn attach(
        session: &Session,
        config: &InstrumentConfig,
    ) -> Result<InstrumentHost, HostError> {
        let keys = AttrKeyBuilder::with_prefix(&config.key_prefix, &config.name);
        let store = Arc::new(ChannelStore::new());

        let mut queryables = Vec::new();
        let mut subscribers = Vec::new();

        for binding in bindings() {
            let key = keys.attr(&binding.name());

            match session.declare_queryable(&key).await {
                Ok(queryable) => queryables.push((binding, key.clone(), queryable)),
                Err(e) => {
                    revoke(queryables, subscribers).await;
                    return Err(HostError::Declare {
                        key,
                        message: e.to_string(),
                    });
                }
            }

            if binding.writable() {
                match session.declare_subscriber(&key).await {
                    Ok(subscriber) => subscribers.push((binding, key, subscriber)),
                    Err(e) => {
                        revoke(queryables, subscribers).await;
                        return Err(HostError::Declare {
                            key,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            instrument = %config.name,
            attributes = queryables.len(),
            writable = subscribers.len(),
            "Instrument attached"
        );

        let (shutdown, _) = watch::channel(false);
        let mut tasks = Vec::new();
        for (binding, key, queryable) in queryables {
            tasks.push(tokio::spawn(serve_reads(
                binding,
                key,
                queryable,
                Arc::clone(&store),
                shutdown.subscribe(),
            )));
        }
        for (binding, key, subscriber) in subscribers {
            tasks.push(tokio::spawn(serve_writes(
                binding,
                key,
                subscriber,
                Arc::clone(&store),
                shutdown.subscribe(),
            )));
        }

        Ok(Self {
            name: config.name.clone(),
            store,
            shutdown,
            tasks,
        })
    }

    /// Instrument name this host was attached with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The channel store backing this instance.
    pub fn store(&self) -> &Arc<ChannelStore> {
        &self.store
    }

    /// Detach the instrument: revoke every registered attribute handle,
    /// then release the store.
    pub async fn detach(self) {
        let _ = self.shutdown.send(true);
        for task in self.tasks {
            let _ = task.await;
        }

        info!(instrument = %self.name, "Instrument detached");
        // The store (self.store) drops here, after every handle is gone.
    }
}

/// Undeclare handles left over from a failed attach.
async fn revoke(
    queryables: Vec<(AttributeBinding, String, Queryable<FifoChannelHandler<Query>>)>,
    subscribers: Vec<(AttributeBinding, String, Subscriber<FifoChannelHandler<Sample>>)>,
) {
    for (_, key, queryable) in queryables {
        if let Err(e) = queryable.undeclare().await {
            warn!(key = %key, error = %e, "Failed to undeclare queryable");
        }
    }
    for (_, key, subscriber) in subscribers {
        if let Err(e) = subscriber.undeclare().await {
            warn!(key = %key, error = %e, "Failed to undeclare subscriber");
        }
    }
}

/// Serve reads of one attribute until shutdown.
async fn serve_reads(
    binding: AttributeBinding,
    key: String,
    queryable: Queryable<FifoChannelHandler<Query>>,
    store: Arc<ChannelStore>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }

            query = queryable.recv_async() => {
                match query {
                    Ok(query) => {
                        let payload = read(&store, binding.channel, binding.attribute);
                        debug!(key = %key, value = %payload.trim_end(), "Serving attribute read");
                        if let Err(e) = query.reply(key.as_str(), payload).await {
                            warn!(key = %key, error = %e, "Failed to reply to query");
                        }
                    }
                    // The handler channel closed with the session.
                    Err(_) => break,
                }
            }
        }
    }

    if let Err(e) = queryable.undeclare().await {
        warn!(key = %key, error = %e, "Failed to undeclare queryable");
    }
}

/// Apply writes to one writable attribute until shutdown.
///
/// A payload that is not a decimal unsigned integer is rejected with a
/// warning and leaves the stored value untouched.
async fn serve_writes(
    binding: AttributeBinding,
    key: String,
    subscriber: Subscriber<FifoChannelHandler<Sample>>,
    store: Arc<ChannelStore>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }

            sample = subscriber.recv_async() => {
                match sample {
                    Ok(sample) => {
                        if sample.kind() == SampleKind::Delete {
                            debug!(key = %key, "Ignoring delete sample");
                            continue;
                        }

                        let payload = sample.payload().to_bytes();
                        match write_input_bytes(&store, binding.channel, &payload) {
                            Ok(value) => {
                                debug!(key = %key, value, "Attribute written");
                            }
                            Err(e) => {
                                warn!(key = %key, error = %e, "Rejected attribute write");
                            }
                        }
                    }
                    Err(_) => break,
                }
            }
        }
    }

    if let Err(e) = subscriber.undeclare().await {
        warn!(key = %key, error = %e, "Failed to undeclare subscriber");
    }
}

#[cfg(test)]
mod tests {
    // Attach/detach needs a Zenoh session; see tests/integration.rs.
}
