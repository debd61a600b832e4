// Entry points of quick-stacking: per item, per inventory slot, and the whole
// inventory as the host's bulk-stack routine runs it.

use super::authority::{Role, SyncNotifier};
use super::candidates::candidate_cells;
use super::deposit::{deposit_into_networks, DepositReport};
use super::hook::{BulkStackRoutine, HostSignal, Integration};
use super::host::QuickStackWorld;
use super::range::is_access_in_range;
use super::resolver::resolve_networks;
use crate::config::QuickStackConfig;
use crate::error::QuickStackError;
use game_objects::{GridCell, ItemStack, PlayerId, WorldPosition};

#[derive(Debug, Clone)]
pub struct QuickStack {
    config: QuickStackConfig,
    role: Role,
    integration: Integration,
}

/// Result of one bulk-stack run over an inventory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackAllOutcome {
    /// Units moved out of the inventory on this process
    pub moved: u32,
    /// Slots a non-authoritative process has to ask the server to stack
    pub requested_slots: Vec<usize>,
}

impl QuickStack {
    pub fn new(config: QuickStackConfig, role: Role) -> Self {
        Self {
            config,
            role,
            integration: Integration::Supported,
        }
    }

    pub fn with_integration(mut self, integration: Integration) -> Self {
        self.integration = integration;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn config(&self) -> &QuickStackConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.config.enabled && self.integration == Integration::Supported
    }

    /// Deposits `item` into the storage networks around `position`, then hands what
    /// is left to the host's generic-container stacking when the role asks for it.
    /// `participant` defaults to the local one; their portable endpoints count
    /// regardless of distance.
    pub fn deposit_nearby<W: QuickStackWorld + ?Sized>(
        &self,
        world: &mut W,
        notifier: &mut dyn SyncNotifier,
        mut item: ItemStack,
        position: WorldPosition,
        participant: Option<PlayerId>,
    ) -> ItemStack {
        self.execute(world, notifier, &mut item, position, participant);

        if !self.is_active() || self.role.needs_fallback(&item) {
            item = world.put_item_in_nearby_container(item, position, &self.config);
        }
        item
    }

    /// The storage pass alone. Skipped entirely off the authoritative process.
    pub fn execute<W: QuickStackWorld + ?Sized>(
        &self,
        world: &mut W,
        notifier: &mut dyn SyncNotifier,
        item: &mut ItemStack,
        position: WorldPosition,
        participant: Option<PlayerId>,
    ) -> DepositReport {
        if !self.role.is_authoritative() || !self.is_active() {
            return DepositReport::default();
        }

        let QuickStackConfig {
            max_distance,
            tile_width,
            ..
        } = self.config;

        let networks = {
            let view: &W = world;
            let portable = participant
                .or_else(|| view.local_participant())
                .map(|p| view.portable_locations(p))
                .unwrap_or_default();
            let in_range = candidate_cells(position.to_cell(tile_width), max_distance, tile_width)
                .filter(|cell| is_access_in_range(view, position, *cell, max_distance, tile_width));

            resolve_networks(
                portable.into_iter().chain(in_range),
                &|cell: GridCell| view.access_network(cell),
                &|cell: GridCell| view.endpoint_network(cell),
            )
        };

        let report = deposit_into_networks(world, &networks, item);

        if self.role.notifies_observers() {
            for id in report.touched() {
                notifier.refresh_network_items(id);
            }
        }
        report
    }

    /// Server side of a participant's request to stack one inventory slot. The
    /// slot is rewritten in place and its new contents are sent back.
    pub fn handle_quick_stack_request<W: QuickStackWorld + ?Sized>(
        &self,
        world: &mut W,
        notifier: &mut dyn SyncNotifier,
        participant: PlayerId,
        slot: usize,
    ) -> Result<ItemStack, QuickStackError> {
        let position = world
            .participant_position(participant)
            .ok_or(QuickStackError::UnknownParticipant(participant))?;
        let item = world
            .inventory_slot(participant, slot)
            .cloned()
            .ok_or(QuickStackError::SlotOutOfRange {
                player: participant,
                slot,
            })?;

        let result = self.deposit_nearby(world, notifier, item, position, Some(participant));

        if !world.set_inventory_slot(participant, slot, result.clone()) {
            tracing::warn!("Could not write slot {} back for {}", slot, participant);
            return Err(QuickStackError::SlotOutOfRange {
                player: participant,
                slot,
            });
        }
        notifier.sync_inventory_slot(participant, slot, &result);
        Ok(result)
    }

    /// Runs the host's bulk-stack over every non-empty slot of `participant`'s
    /// inventory. Portable endpoints stay put. Raises `StackingSucceeded` on
    /// `routine` once if anything was stacked or requested.
    pub fn quick_stack_all<W: QuickStackWorld + ?Sized>(
        &self,
        world: &mut W,
        notifier: &mut dyn SyncNotifier,
        routine: &mut BulkStackRoutine,
        participant: PlayerId,
    ) -> Result<StackAllOutcome, QuickStackError> {
        if world.participant_position(participant).is_none() {
            return Err(QuickStackError::UnknownParticipant(participant));
        }

        let mut outcome = StackAllOutcome::default();
        for slot in 0..world.inventory_len(participant) {
            let Some(stack) = world.inventory_slot(participant, slot) else {
                continue;
            };
            if stack.is_empty() || stack.item.portable_location().is_some() {
                continue;
            }
            if !self.role.is_authoritative() {
                outcome.requested_slots.push(slot);
                continue;
            }

            let before = stack.quantity;
            let after = self.handle_quick_stack_request(world, notifier, participant, slot)?;
            outcome.moved = outcome
                .moved
                .saturating_add(before.saturating_sub(after.quantity));
        }

        if outcome.moved > 0 || !outcome.requested_slots.is_empty() {
            routine.raise(HostSignal::StackingSucceeded);
        }
        Ok(outcome)
    }
}
