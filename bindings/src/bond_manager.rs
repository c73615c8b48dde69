#![allow(clippy::too_many_arguments)]

use crate::contract::{
    ContractMetadata,
    macros::{define_binding, event_accessors, read_accessors, write_accessors},
};
use alloy::{
    primitives::{Address, B256, Bytes, U256},
    sol,
};

sol!(
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    BondManager,
    "abi/BondManager.json"
);

pub static BOND_MANAGER_METADATA: ContractMetadata =
    ContractMetadata::new("BondManager", include_str!("../abi/BondManager.json"));

define_binding! {
    /// Typed binding of the Shasta `BondManager` contract.
    BondManagerContract {
        metadata: BOND_MANAGER_METADATA,
        caller: BondManagerCaller,
        transactor: BondManagerTransactor,
        filterer: BondManagerFilterer,
        session: BondManagerSession,
        caller_session: BondManagerCallerSession,
        transactor_session: BondManagerTransactorSession,
    }
}

read_accessors! {
    module: BondManager,
    caller: BondManagerCaller,
    caller_session: BondManagerCallerSession,
    session: BondManagerSession;

    /// Bond balance of `account` and the time its withdrawal was requested (zero if none).
    fn bond(account: Address) => bondCall;
    fn bond_operator() => bondOperatorCall;
    fn bond_token() => bondTokenCall;
    fn get_bond_balance(address: Address) => getBondBalanceCall;
    /// Whether `address` keeps at least the minimum bond after locking `additional_bond`.
    fn has_sufficient_bond(address: Address, additional_bond: U256) => hasSufficientBondCall;
    fn implementation() => implCall;
    fn in_non_reentrant() => inNonReentrantCall;
    fn l1_chain_id() => l1ChainIdCall;
    fn l1_inbox() => l1InboxCall;
    fn liveness_bond() => livenessBondCall;
    fn min_bond() => minBondCall;
    fn owner() => ownerCall;
    fn paused() => pausedCall;
    fn pending_owner() => pendingOwnerCall;
    fn processed_signals(signal: B256) => processedSignalsCall;
    fn proxiable_uuid() => proxiableUUIDCall;
    fn resolver() => resolverCall;
    fn signal_service() => signalServiceCall;
    fn withdrawal_delay() => withdrawalDelayCall;
}

write_accessors! {
    module: BondManager,
    transactor: BondManagerTransactor,
    transactor_session: BondManagerTransactorSession,
    session: BondManagerSession;

    fn accept_ownership() => acceptOwnershipCall;
    fn cancel_withdrawal() => cancelWithdrawalCall;
    fn credit_bond(address: Address, bond: U256) => creditBondCall;
    fn debit_bond(address: Address, bond: U256) => debitBondCall;
    fn deposit(amount: U256) => depositCall;
    fn deposit_to(recipient: Address, amount: U256) => depositToCall;
    fn init(owner: Address) => initCall;
    fn pause() => pauseCall;
    /// Settles a bond instruction relayed from L2, proven by `proof` against the signal service.
    fn process_bond_instruction(instruction: LibBonds::BondInstruction, proof: Bytes) => processBondInstructionCall;
    fn renounce_ownership() => renounceOwnershipCall;
    fn request_withdrawal() => requestWithdrawalCall;
    fn transfer_ownership(new_owner: Address) => transferOwnershipCall;
    fn unpause() => unpauseCall;
    fn upgrade_to(new_implementation: Address) => upgradeToCall;
    fn upgrade_to_and_call(new_implementation: Address, data: Bytes) => upgradeToAndCallCall;
    fn withdraw(to: Address, amount: U256) => withdrawCall;
}

event_accessors! {
    module: BondManager,
    filterer: BondManagerFilterer;

    AdminChanged => filter_admin_changed, watch_admin_changed, parse_admin_changed();
    BeaconUpgraded => filter_beacon_upgraded, watch_beacon_upgraded, parse_beacon_upgraded(beacon: Address);
    BondCredited => filter_bond_credited, watch_bond_credited, parse_bond_credited(account: Address);
    BondDebited => filter_bond_debited, watch_bond_debited, parse_bond_debited(account: Address);
    BondDeposited => filter_bond_deposited, watch_bond_deposited, parse_bond_deposited(depositor: Address, recipient: Address);
    BondInstructionProcessed => filter_bond_instruction_processed, watch_bond_instruction_processed, parse_bond_instruction_processed(signal: B256);
    BondWithdrawn => filter_bond_withdrawn, watch_bond_withdrawn, parse_bond_withdrawn(account: Address);
    Initialized => filter_initialized, watch_initialized, parse_initialized();
    OwnershipTransferStarted => filter_ownership_transfer_started, watch_ownership_transfer_started, parse_ownership_transfer_started(previous_owner: Address, new_owner: Address);
    OwnershipTransferred => filter_ownership_transferred, watch_ownership_transferred, parse_ownership_transferred(previous_owner: Address, new_owner: Address);
    Paused => filter_paused, watch_paused, parse_paused();
    Unpaused => filter_unpaused, watch_unpaused, parse_unpaused();
    Upgraded => filter_upgraded, watch_upgraded, parse_upgraded(implementation: Address);
    WithdrawalCancelled => filter_withdrawal_cancelled, watch_withdrawal_cancelled, parse_withdrawal_cancelled(account: Address);
    WithdrawalRequested => filter_withdrawal_requested, watch_withdrawal_requested, parse_withdrawal_requested(account: Address);
}
