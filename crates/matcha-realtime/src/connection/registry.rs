//! Addressee → connections registry
//!
//! One instance per channel kind: chats keyed by `ChatId`, notifications
//! keyed by `UserId`. Each addressee bucket lives in a `DashMap` shard, so
//! registrations for different addressees do not contend.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use super::connection::{Connection, ConnectionId};
use crate::protocol::Frame;

/// Live connections grouped by addressee
pub struct ChannelRegistry<K> {
    kind: &'static str,
    buckets: DashMap<K, HashMap<ConnectionId, Arc<Connection>>>,
}

impl<K> ChannelRegistry<K>
where
    K: Eq + Hash + Copy + Display,
{
    /// Create an empty registry; `kind` only labels log lines
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            buckets: DashMap::new(),
        }
    }

    /// Add a connection under `key` and mark it open
    pub fn register(&self, key: K, connection: Arc<Connection>) {
        if !connection.open() {
            return;
        }
        let id = connection.id();
        self.buckets.entry(key).or_default().insert(id, connection);
        tracing::debug!(
            kind = self.kind,
            addressee = %key,
            connection_id = id,
            "Connection registered"
        );
    }

    /// Remove one connection. The bucket goes away with its last entry.
    ///
    /// Returns whether anything was removed; repeating the call is a no-op.
    pub fn unregister(&self, key: K, id: ConnectionId) -> bool {
        let Entry::Occupied(mut bucket) = self.buckets.entry(key) else {
            return false;
        };
        let removed = bucket.get_mut().remove(&id).is_some();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        if removed {
            tracing::debug!(
                kind = self.kind,
                addressee = %key,
                connection_id = id,
                "Connection unregistered"
            );
        }
        removed
    }

    /// Close a connection and unregister it.
    ///
    /// Whichever caller closes the connection first performs the removal,
    /// so the socket task and a failed broadcast never both do it.
    pub fn release(&self, key: K, connection: &Connection) {
        if connection.close() {
            self.unregister(key, connection.id());
        }
    }

    /// Queue `frame` on every connection registered under `key`.
    ///
    /// Sends never wait. A connection whose queue is full or gone is
    /// released; the others still receive the frame. Returns the number
    /// of connections that accepted it.
    pub fn broadcast(&self, key: K, frame: &Frame) -> usize {
        // Snapshot first so no shard lock is held while sending or releasing.
        let targets: Vec<Arc<Connection>> = match self.buckets.get(&key) {
            Some(bucket) => bucket.values().cloned().collect(),
            None => return 0,
        };

        let mut delivered = 0;
        for connection in targets {
            match connection.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        kind = self.kind,
                        addressee = %key,
                        connection_id = connection.id(),
                        error = %e,
                        "Dropping connection after failed send"
                    );
                    self.release(key, &connection);
                }
            }
        }
        delivered
    }

    /// Number of connections registered under `key`
    pub fn connection_count(&self, key: K) -> usize {
        self.buckets.get(&key).map_or(0, |bucket| bucket.len())
    }

    /// Number of addressees with at least one connection
    pub fn addressee_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn contains(&self, key: K) -> bool {
        self.buckets.contains_key(&key)
    }
}

impl<K> std::fmt::Debug for ChannelRegistry<K>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelRegistry")
            .field("kind", &self.kind)
            .field("addressees", &self.buckets.len())
            .finish()
    }
}
