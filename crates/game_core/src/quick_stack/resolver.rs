use game_objects::{GridCell, NetworkId};
use std::collections::BTreeSet;

/// One way of finding the storage network behind a position
pub trait NetworkLookup {
    fn lookup(&self, cell: GridCell) -> Option<NetworkId>;
}

impl<F> NetworkLookup for F
where
    F: Fn(GridCell) -> Option<NetworkId>,
{
    fn lookup(&self, cell: GridCell) -> Option<NetworkId> {
        self(cell)
    }
}

/// Resolves every position through `general`, then `dedicated`, and collects the
/// distinct networks found. Positions neither lookup knows are dropped.
///
/// The set is ordered by network id, which is also the order deposits visit them in.
pub fn resolve_networks<I, G, D>(positions: I, general: &G, dedicated: &D) -> BTreeSet<NetworkId>
where
    I: IntoIterator<Item = GridCell>,
    G: NetworkLookup + ?Sized,
    D: NetworkLookup + ?Sized,
{
    positions
        .into_iter()
        .filter_map(|cell| general.lookup(cell).or_else(|| dedicated.lookup(cell)))
        .collect()
}
