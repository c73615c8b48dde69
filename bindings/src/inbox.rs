#![allow(clippy::too_many_arguments)]

use crate::contract::{
    ContractMetadata,
    macros::{define_binding, event_accessors, read_accessors, write_accessors},
};
use alloy::{
    primitives::{Address, B256, Bytes, U256, aliases::U48},
    sol,
};

sol!(
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    Inbox,
    "abi/Inbox.json"
);

pub static INBOX_METADATA: ContractMetadata =
    ContractMetadata::new("Inbox", include_str!("../abi/Inbox.json"));

define_binding! {
    /// Typed binding of the Shasta rollup `Inbox` contract.
    InboxContract {
        metadata: INBOX_METADATA,
        caller: InboxCaller,
        transactor: InboxTransactor,
        filterer: InboxFilterer,
        session: InboxSession,
        caller_session: InboxCallerSession,
        transactor_session: InboxTransactorSession,
    }
}

read_accessors! {
    module: Inbox,
    caller: InboxCaller,
    caller_session: InboxCallerSession,
    session: InboxSession;

    fn activation_timestamp() => activationTimestampCall;
    fn decode_propose_input(data: Bytes) => decodeProposeInputCall;
    fn decode_prove_input(data: Bytes) => decodeProveInputCall;
    /// Packs a propose input into the compact calldata layout expected by `propose`.
    fn encode_propose_input(input: IInbox::ProposeInput) => encodeProposeInputCall;
    /// Packs a prove input into the compact calldata layout expected by `prove`.
    fn encode_prove_input(input: IInbox::ProveInput) => encodeProveInputCall;
    fn get_bond(address: Address) => getBondCall;
    fn get_config() => getConfigCall;
    fn get_core_state() => getCoreStateCall;
    /// Current forced inclusion fee in gwei, scaled by the queue length.
    fn get_current_forced_inclusion_fee() => getCurrentForcedInclusionFeeCall;
    fn get_forced_inclusion_state() => getForcedInclusionStateCall;
    fn get_forced_inclusions(start: U48, max_count: U48) => getForcedInclusionsCall;
    fn get_proposal_hash(proposal_id: U256) => getProposalHashCall;
    fn hash_commitment(commitment: IInbox::Commitment) => hashCommitmentCall;
    fn hash_proposal(proposal: IInbox::Proposal) => hashProposalCall;
    fn implementation() => implCall;
    fn in_non_reentrant() => inNonReentrantCall;
    fn owner() => ownerCall;
    fn paused() => pausedCall;
    fn pending_owner() => pendingOwnerCall;
    fn proxiable_uuid() => proxiableUUIDCall;
    fn resolver() => resolverCall;
}

write_accessors! {
    module: Inbox,
    transactor: InboxTransactor,
    transactor_session: InboxTransactorSession,
    session: InboxSession;

    fn accept_ownership() => acceptOwnershipCall;
    fn activate(last_pacaya_block_hash: B256) => activateCall;
    fn cancel_withdrawal() => cancelWithdrawalCall;
    fn deposit(amount: u64) => depositCall;
    fn deposit_to(recipient: Address, amount: u64) => depositToCall;
    fn init(owner: Address) => initCall;
    fn pause() => pauseCall;
    /// Proposes the next batch; `data` is the output of `encode_propose_input`.
    fn propose(lookahead: Bytes, data: Bytes) => proposeCall;
    /// Proves a range of proposals; `data` is the output of `encode_prove_input`.
    fn prove(data: Bytes, proof: Bytes) => proveCall;
    fn renounce_ownership() => renounceOwnershipCall;
    fn request_withdrawal() => requestWithdrawalCall;
    /// Queues a forced inclusion. Payable: the fee travels as the transaction value.
    fn save_forced_inclusion(blob_reference: LibBlobs::BlobReference) => saveForcedInclusionCall;
    fn transfer_ownership(new_owner: Address) => transferOwnershipCall;
    fn unpause() => unpauseCall;
    fn upgrade_to(new_implementation: Address) => upgradeToCall;
    fn upgrade_to_and_call(new_implementation: Address, data: Bytes) => upgradeToAndCallCall;
    fn withdraw(to: Address, amount: u64) => withdrawCall;
}

event_accessors! {
    module: Inbox,
    filterer: InboxFilterer;

    AdminChanged => filter_admin_changed, watch_admin_changed, parse_admin_changed();
    BeaconUpgraded => filter_beacon_upgraded, watch_beacon_upgraded, parse_beacon_upgraded(beacon: Address);
    BondDeposited => filter_bond_deposited, watch_bond_deposited, parse_bond_deposited(depositor: Address, recipient: Address);
    BondWithdrawn => filter_bond_withdrawn, watch_bond_withdrawn, parse_bond_withdrawn(account: Address);
    ForcedInclusionSaved => filter_forced_inclusion_saved, watch_forced_inclusion_saved, parse_forced_inclusion_saved();
    InboxActivated => filter_inbox_activated, watch_inbox_activated, parse_inbox_activated();
    Initialized => filter_initialized, watch_initialized, parse_initialized();
    LivenessBondSettled => filter_liveness_bond_settled, watch_liveness_bond_settled, parse_liveness_bond_settled(payer: Address, payee: Address);
    OwnershipTransferStarted => filter_ownership_transfer_started, watch_ownership_transfer_started, parse_ownership_transfer_started(previous_owner: Address, new_owner: Address);
    OwnershipTransferred => filter_ownership_transferred, watch_ownership_transferred, parse_ownership_transferred(previous_owner: Address, new_owner: Address);
    Paused => filter_paused, watch_paused, parse_paused();
    Proposed => filter_proposed, watch_proposed, parse_proposed(id: U48, proposer: Address);
    Proved => filter_proved, watch_proved, parse_proved(actual_prover: Address);
    Unpaused => filter_unpaused, watch_unpaused, parse_unpaused();
    Upgraded => filter_upgraded, watch_upgraded, parse_upgraded(implementation: Address);
    WithdrawalCancelled => filter_withdrawal_cancelled, watch_withdrawal_cancelled, parse_withdrawal_cancelled(account: Address);
    WithdrawalRequested => filter_withdrawal_requested, watch_withdrawal_requested, parse_withdrawal_requested(account: Address);
}
