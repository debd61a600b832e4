//! Quick-stacking into storage networks
//!
//! Pipeline: candidate cells -> range filter -> network resolution -> deposit -> sync
//!
//! Only the authoritative process mutates networks; everyone else is told about the
//! change through [`SyncNotifier`] after the deposit has committed.

pub mod authority;
pub mod candidates;
pub mod deposit;
pub mod hook;
pub mod host;
pub mod pipeline;
pub mod range;
pub mod resolver;

pub use authority::{Role, SyncNotifier};
pub use candidates::{candidate_cells, candidate_radius, CandidateCells, MAX_SEARCH_RADIUS};
pub use deposit::{deposit_into_networks, DepositReport};
pub use hook::{install, BulkStackRoutine, HostSignal, Integration, StorageUi};
pub use host::{FallbackStacker, NetworkStore, ParticipantStore, QuickStackWorld, TileQuery};
pub use pipeline::{QuickStack, StackAllOutcome};
pub use range::is_access_in_range;
pub use resolver::{resolve_networks, NetworkLookup};
