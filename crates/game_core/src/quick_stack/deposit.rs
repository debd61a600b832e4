use super::host::NetworkStore;
use game_objects::{ItemStack, NetworkId};
use std::collections::BTreeSet;

/// What one deposit pass moved, per network that actually took something
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositReport {
    pub consumed: Vec<(NetworkId, u32)>,
}

impl DepositReport {
    pub fn total(&self) -> u32 {
        self.consumed.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }

    /// Networks whose contents changed
    pub fn touched(&self) -> impl Iterator<Item = NetworkId> + '_ {
        self.consumed.iter().map(|(id, _)| *id)
    }
}

/// Tops up the networks of `candidates` that already stock `item`, in set order,
/// until `item` runs out. `item` is drained in place. Networks without a stocked
/// match are never touched, so no new entry is ever created.
pub fn deposit_into_networks<S: NetworkStore + ?Sized>(
    store: &mut S,
    candidates: &BTreeSet<NetworkId>,
    item: &mut ItemStack,
) -> DepositReport {
    let qualifying: Vec<NetworkId> = candidates
        .iter()
        .copied()
        .filter(|id| store.network(*id).is_some_and(|n| n.stocks(item)))
        .collect();

    let mut report = DepositReport::default();
    for id in qualifying {
        if item.is_empty() {
            break;
        }
        let Some(network) = store.network_mut(id) else {
            continue;
        };
        let moved = network.deposit(item);
        if moved > 0 {
            tracing::debug!("Deposited {} x {} into {}", moved, item.item.name, id);
            report.consumed.push((id, moved));
        }
    }
    report
}
