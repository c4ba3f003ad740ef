//! Subscription registry: address → listener slot, one lock for everything.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::{Address, SessionId};
use tracing::{debug, warn};

use crate::domain::ListenerSlot;
use crate::error::RegistryError;
use crate::ports::{AddressCallback, AddressEventSource, SubscriptionApi};

/// Tracks which sessions watch which addresses.
///
/// Each watched address holds exactly one listener on the event source no
/// matter how many sessions subscribe to it. The listener is attached on the
/// first subscribe and detached when the last session leaves.
///
/// Every mutation runs under a single mutex, including the attach/detach
/// call to the event source, so transitions never interleave.
pub struct SubscriptionRegistry {
    slots: Mutex<HashMap<Address, ListenerSlot>>,
    source: Arc<dyn AddressEventSource>,
    /// Handed to every attached listener.
    sink: AddressCallback,
}

impl SubscriptionRegistry {
    /// Create a registry. `sink` receives every event from every listener
    /// this registry attaches.
    pub fn new(source: Arc<dyn AddressEventSource>, sink: AddressCallback) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            source,
            sink,
        }
    }

    /// True if `address` currently has a slot (and a live listener).
    pub fn is_watched(&self, address: &Address) -> bool {
        self.slots.lock().contains_key(address)
    }

    /// Number of watched addresses.
    pub fn watched_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Snapshot of watched addresses.
    pub fn watched_addresses(&self) -> Vec<Address> {
        self.slots.lock().keys().cloned().collect()
    }

    /// Addresses `session` is subscribed to.
    pub fn subscriptions_of(&self, session: SessionId) -> Vec<Address> {
        self.slots
            .lock()
            .iter()
            .filter(|(_, slot)| slot.contains(&session))
            .map(|(address, _)| address.clone())
            .collect()
    }

    fn unsubscribe_locked(
        &self,
        slots: &mut HashMap<Address, ListenerSlot>,
        address: &Address,
        session: SessionId,
    ) -> Result<(), RegistryError> {
        let Some(slot) = slots.get_mut(address) else {
            return Ok(());
        };
        if !slot.remove(&session) {
            return Ok(());
        }
        if !slot.is_empty() {
            debug!(address = %address, session_id = %session, remaining = slot.len(), "Unsubscribed");
            return Ok(());
        }

        if let Err(source) = self.source.detach_address_listener(slot.handle()) {
            // Keep the slot as it was: session present, handle live.
            slot.insert(session);
            warn!(address = %address, session_id = %session, error = %source, "Listener detach failed");
            return Err(RegistryError::DetachFailed {
                address: address.clone(),
                source,
            });
        }

        slots.remove(address);
        debug!(address = %address, session_id = %session, "Last subscriber left, listener detached");
        Ok(())
    }
}

impl SubscriptionApi for SubscriptionRegistry {
    fn subscribe(&self, address: &Address, session: SessionId) -> Result<(), RegistryError> {
        let mut slots = self.slots.lock();

        if let Some(slot) = slots.get_mut(address) {
            if slot.insert(session) {
                debug!(address = %address, session_id = %session, subscribers = slot.len(), "Subscribed");
            }
            return Ok(());
        }

        let handle = self
            .source
            .attach_address_listener(address, Arc::clone(&self.sink))
            .map_err(|source| {
                warn!(address = %address, error = %source, "Listener attach failed");
                RegistryError::AttachFailed {
                    address: address.clone(),
                    source,
                }
            })?;

        debug!(address = %address, session_id = %session, handle = %handle, "First subscriber, listener attached");
        slots.insert(address.clone(), ListenerSlot::new(handle, session));
        Ok(())
    }

    fn unsubscribe(&self, address: &Address, session: SessionId) -> Result<(), RegistryError> {
        let mut slots = self.slots.lock();
        self.unsubscribe_locked(&mut slots, address, session)
    }

    fn drop_session(&self, session: SessionId) -> Result<(), RegistryError> {
        let mut slots = self.slots.lock();

        let addresses: Vec<Address> = slots
            .iter()
            .filter(|(_, slot)| slot.contains(&session))
            .map(|(address, _)| address.clone())
            .collect();

        let mut first_error = None;
        for address in &addresses {
            if let Err(err) = self.unsubscribe_locked(&mut slots, address, session) {
                first_error.get_or_insert(err);
            }
        }

        debug!(session_id = %session, addresses = addresses.len(), "Session dropped");
        first_error.map_or(Ok(()), Err)
    }

    fn subscribers(&self, address: &Address) -> Vec<SessionId> {
        self.slots
            .lock()
            .get(address)
            .map(ListenerSlot::sessions)
            .unwrap_or_default()
    }
}
