use game_objects::{ItemStack, NetworkId, PlayerId};
use serde::{Deserialize, Serialize};

/// How this process takes part in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Dedicated server: owns the truth, no display, other participants attached
    Authoritative,
    /// Client of a server; never mutates storage itself
    NonAuthoritative,
    /// Single-player session: owns the truth and is the only participant
    StandaloneAuthoritative,
}

impl Role {
    /// Whether this process may mutate storage networks
    pub fn is_authoritative(self) -> bool {
        !matches!(self, Role::NonAuthoritative)
    }

    /// Whether other participants share the session
    pub fn is_multi_participant(self) -> bool {
        !matches!(self, Role::StandaloneAuthoritative)
    }

    /// Whether network changes have to be announced to other processes
    pub fn notifies_observers(self) -> bool {
        matches!(self, Role::Authoritative)
    }

    /// Whether this process shows a storage UI that can be refreshed
    pub fn has_display(self) -> bool {
        !matches!(self, Role::Authoritative)
    }

    /// Whether the host's generic-container stacking runs after the storage pass
    pub fn needs_fallback(self, remaining: &ItemStack) -> bool {
        !self.is_authoritative() || self.is_multi_participant() || remaining.quantity > 0
    }
}

/// Outbound side of the authority contract. Called only after the mutation it
/// describes has been applied.
pub trait SyncNotifier {
    /// Contents of `network` changed; observers re-query it
    fn refresh_network_items(&mut self, network: NetworkId);

    /// The server rewrote `slot` of `player`'s inventory
    fn sync_inventory_slot(&mut self, player: PlayerId, slot: usize, stack: &ItemStack);
}
