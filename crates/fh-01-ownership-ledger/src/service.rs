//! Ownership Ledger Service
//!
//! Implements [`OwnershipLedgerApi`] over an in-memory partitioned balance
//! table. All state sits behind one `RwLock`; a mutating operation holds the
//! write lock for its whole duration and validates every precondition before
//! the first write, so a failed call leaves no trace.

use crate::domain::{
    LedgerConfig, OneWayFlag, OperatorRegistry, Partition, PartitionLeg, PartitionedBalances,
    TransferPath, TransferReceipt, TransferStatus, Whitelist,
};
use crate::error::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;
use crate::ports::OwnershipLedgerApi;
use freehold_telemetry::log_event;
use freehold_telemetry::metrics::{
    amount_to_gauge, record_error, LEDGER_ISSUANCES, LEDGER_REDEMPTIONS, LEDGER_TOTAL_SUPPLY,
    LEDGER_TRANSFERS,
};
use parking_lot::RwLock;
use shared_types::{
    address_hex, is_zero_address, mul_div_floor, AccessControl, Address, Amount, Role,
    BASIS_POINTS,
};
use tracing::debug;

const SUBSYSTEM: &str = "ownership-ledger";

/// Mutable ledger state
struct LedgerState {
    balances: PartitionedBalances,
    whitelist: Whitelist,
    operators: OperatorRegistry,
    access: AccessControl,
    controllable: OneWayFlag,
    issuable: OneWayFlag,
    pending_events: Vec<LedgerEvent>,
}

/// Ownership Ledger Service
pub struct OwnershipLedger {
    config: LedgerConfig,
    state: RwLock<LedgerState>,
}

impl OwnershipLedger {
    /// Create a ledger with `initial_supply` units held by `initial_holder`
    /// on the default partition.
    ///
    /// `admin` receives `Admin`, `Manager`, `Issuer` and `Controller`.
    /// `initial_holder` is whitelisted.
    pub fn new(
        config: LedgerConfig,
        admin: Address,
        initial_holder: Address,
        initial_supply: Amount,
    ) -> LedgerResult<Self> {
        if is_zero_address(&admin) || is_zero_address(&initial_holder) {
            return Err(LedgerError::InvalidAddress);
        }

        let access = AccessControl::with_roles(
            admin,
            &[Role::Admin, Role::Manager, Role::Issuer, Role::Controller],
        );
        let mut whitelist = Whitelist::new();
        whitelist.add(initial_holder);

        let mut balances = PartitionedBalances::new();
        balances.mint(&initial_holder, &Partition::default(), initial_supply)?;

        LEDGER_TOTAL_SUPPLY.set(amount_to_gauge(initial_supply));
        log_event!(
            info,
            SUBSYSTEM,
            "Ownership ledger created",
            symbol = %config.symbol,
            admin = %address_hex(&admin),
            initial_holder = %address_hex(&initial_holder),
            initial_supply = initial_supply
        );

        Ok(Self {
            config,
            state: RwLock::new(LedgerState {
                balances,
                whitelist,
                operators: OperatorRegistry::new(),
                access,
                controllable: OneWayFlag::enabled(),
                issuable: OneWayFlag::enabled(),
                pending_events: Vec::new(),
            }),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.config.decimals
    }

    /// Number of holders with a nonzero balance.
    pub fn holder_count(&self) -> usize {
        self.state.read().balances.holder_count()
    }

    pub fn whitelisted_addresses(&self) -> Vec<Address> {
        self.state.read().whitelist.members()
    }

    /// Drain pending events.
    pub fn take_events(&self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.state.write().pending_events)
    }

    /// Recompute conservation and partition consistency from the raw rows.
    pub fn verify_invariants(&self) -> LedgerResult<()> {
        self.state.read().balances.check_invariants()
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn rejected(&self, operation: &'static str, caller: &Address, err: LedgerError) -> LedgerError {
        record_error(SUBSYSTEM, err.kind());
        log_event!(
            warn,
            SUBSYSTEM,
            "Ledger operation rejected",
            operation = operation,
            caller = %address_hex(caller),
            error = %err
        );
        err
    }

    fn check_receiver(state: &LedgerState, to: &Address, enforce_whitelist: bool) -> LedgerResult<()> {
        if is_zero_address(to) {
            return Err(LedgerError::InvalidReceiver { receiver: *to });
        }
        if enforce_whitelist && !state.whitelist.contains(to) {
            return Err(LedgerError::NotWhitelisted { receiver: *to });
        }
        Ok(())
    }

    /// Validate and apply a move of `amount` from `from` to `to`.
    fn move_units(
        state: &mut LedgerState,
        from: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
        path: TransferPath,
    ) -> LedgerResult<Vec<PartitionLeg>> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        Self::check_receiver(state, &to, path != TransferPath::Controller)?;
        let legs = state.balances.plan_draw(&from, amount, partition)?;
        state.balances.move_legs(&from, &to, &legs);

        LEDGER_TRANSFERS.with_label_values(&[path.as_str()]).inc();
        Ok(legs)
    }

    /// Validate and apply a burn of `amount` held by `from`.
    fn burn_units(
        state: &mut LedgerState,
        from: Address,
        amount: Amount,
        partition: Option<&Partition>,
        path: TransferPath,
    ) -> LedgerResult<Vec<PartitionLeg>> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let legs = state.balances.plan_draw(&from, amount, partition)?;
        state.balances.burn_legs(&from, &legs);

        LEDGER_REDEMPTIONS.with_label_values(&[path.as_str()]).inc();
        LEDGER_TOTAL_SUPPLY.set(amount_to_gauge(state.balances.total_supply()));
        Ok(legs)
    }

    /// Holders act for themselves without an authorization.
    fn check_operator(
        state: &LedgerState,
        operator: &Address,
        holder: &Address,
        partition: Option<&Partition>,
    ) -> LedgerResult<()> {
        if operator == holder || state.operators.may_act_for(operator, holder, partition) {
            Ok(())
        } else {
            Err(LedgerError::NotOperator {
                operator: *operator,
                holder: *holder,
            })
        }
    }

    fn check_controller(state: &LedgerState, caller: &Address) -> LedgerResult<()> {
        state.access.require(Role::Controller, caller)?;
        if !state.controllable.is_enabled() {
            return Err(LedgerError::NotControllable);
        }
        Ok(())
    }

    fn check_issue(
        state: &LedgerState,
        caller: &Address,
        to: &Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        state.access.require(Role::Issuer, caller)?;
        if !state.issuable.is_enabled() {
            return Err(LedgerError::IssuanceRenounced);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        Self::check_receiver(state, to, true)
    }

    fn check_batch(&self, addresses: &[Address]) -> LedgerResult<()> {
        if addresses.len() > self.config.max_batch_size {
            return Err(LedgerError::BatchTooLarge {
                size: addresses.len(),
                max: self.config.max_batch_size,
            });
        }
        if addresses.iter().any(is_zero_address) {
            return Err(LedgerError::InvalidAddress);
        }
        Ok(())
    }

    fn set_whitelisted(state: &mut LedgerState, address: Address, eligible: bool) {
        let changed = if eligible {
            state.whitelist.add(address)
        } else {
            state.whitelist.remove(&address)
        };
        if changed {
            state
                .pending_events
                .push(LedgerEvent::WhitelistUpdated { address, eligible });
        }
    }

    fn check_operator_change(caller: &Address, operator: &Address) -> LedgerResult<()> {
        if is_zero_address(operator) {
            return Err(LedgerError::InvalidAddress);
        }
        if caller == operator {
            return Err(LedgerError::SelfAuthorization);
        }
        Ok(())
    }

    fn receipt(
        from: Address,
        to: Address,
        amount: Amount,
        path: TransferPath,
        legs: Vec<PartitionLeg>,
    ) -> TransferReceipt {
        TransferReceipt {
            from,
            to,
            amount,
            path,
            legs,
        }
    }
}

impl OwnershipLedgerApi for OwnershipLedger {
    fn transfer(
        &self,
        caller: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt> {
        let mut state = self.state.write();
        let legs = Self::move_units(&mut state, caller, to, amount, partition, TransferPath::Holder)
            .map_err(|e| self.rejected("transfer", &caller, e))?;

        state.pending_events.push(LedgerEvent::Transferred {
            operator: caller,
            from: caller,
            to,
            amount,
            legs: legs.clone(),
        });
        log_event!(
            info,
            SUBSYSTEM,
            "Transfer executed",
            from = %address_hex(&caller),
            to = %address_hex(&to),
            amount = amount,
            legs = legs.len()
        );
        Ok(Self::receipt(caller, to, amount, TransferPath::Holder, legs))
    }

    fn transfer_from(
        &self,
        operator: Address,
        from: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt> {
        let mut state = self.state.write();
        let legs = Self::check_operator(&state, &operator, &from, partition)
            .and_then(|_| {
                Self::move_units(&mut state, from, to, amount, partition, TransferPath::Operator)
            })
            .map_err(|e| self.rejected("transfer_from", &operator, e))?;

        state.pending_events.push(LedgerEvent::Transferred {
            operator,
            from,
            to,
            amount,
            legs: legs.clone(),
        });
        log_event!(
            info,
            SUBSYSTEM,
            "Operator transfer executed",
            operator = %address_hex(&operator),
            from = %address_hex(&from),
            to = %address_hex(&to),
            amount = amount
        );
        Ok(Self::receipt(from, to, amount, TransferPath::Operator, legs))
    }

    fn controller_transfer(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt> {
        let mut state = self.state.write();
        let legs = Self::check_controller(&state, &caller)
            .and_then(|_| {
                Self::move_units(&mut state, from, to, amount, partition, TransferPath::Controller)
            })
            .map_err(|e| self.rejected("controller_transfer", &caller, e))?;

        state.pending_events.push(LedgerEvent::ControllerTransferred {
            controller: caller,
            from,
            to,
            amount,
            legs: legs.clone(),
        });
        log_event!(
            info,
            SUBSYSTEM,
            "Controller transfer executed",
            controller = %address_hex(&caller),
            from = %address_hex(&from),
            to = %address_hex(&to),
            amount = amount
        );
        Ok(Self::receipt(from, to, amount, TransferPath::Controller, legs))
    }

    fn issue(
        &self,
        caller: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<()> {
        let mut state = self.state.write();
        let target = partition.cloned().unwrap_or_default();
        Self::check_issue(&state, &caller, &to, amount)
            .and_then(|_| state.balances.mint(&to, &target, amount))
            .map_err(|e| self.rejected("issue", &caller, e))?;

        state.pending_events.push(LedgerEvent::Issued {
            issuer: caller,
            to,
            partition: target.clone(),
            amount,
        });
        LEDGER_ISSUANCES.inc();
        LEDGER_TOTAL_SUPPLY.set(amount_to_gauge(state.balances.total_supply()));
        log_event!(
            info,
            SUBSYSTEM,
            "Units issued",
            to = %address_hex(&to),
            partition = %target,
            amount = amount,
            total_supply = state.balances.total_supply()
        );
        Ok(())
    }

    fn redeem(
        &self,
        caller: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt> {
        let mut state = self.state.write();
        let legs = Self::burn_units(&mut state, caller, amount, partition, TransferPath::Holder)
            .map_err(|e| self.rejected("redeem", &caller, e))?;

        state.pending_events.push(LedgerEvent::Redeemed {
            operator: caller,
            from: caller,
            amount,
            legs: legs.clone(),
        });
        log_event!(
            info,
            SUBSYSTEM,
            "Units redeemed",
            holder = %address_hex(&caller),
            amount = amount
        );
        Ok(Self::receipt(
            caller,
            shared_types::ZERO_ADDRESS,
            amount,
            TransferPath::Holder,
            legs,
        ))
    }

    fn redeem_from(
        &self,
        operator: Address,
        from: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt> {
        let mut state = self.state.write();
        let legs = Self::check_operator(&state, &operator, &from, partition)
            .and_then(|_| {
                Self::burn_units(&mut state, from, amount, partition, TransferPath::Operator)
            })
            .map_err(|e| self.rejected("redeem_from", &operator, e))?;

        state.pending_events.push(LedgerEvent::Redeemed {
            operator,
            from,
            amount,
            legs: legs.clone(),
        });
        log_event!(
            info,
            SUBSYSTEM,
            "Operator redemption executed",
            operator = %address_hex(&operator),
            holder = %address_hex(&from),
            amount = amount
        );
        Ok(Self::receipt(
            from,
            shared_types::ZERO_ADDRESS,
            amount,
            TransferPath::Operator,
            legs,
        ))
    }

    fn controller_redeem(
        &self,
        caller: Address,
        from: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt> {
        let mut state = self.state.write();
        let legs = Self::check_controller(&state, &caller)
            .and_then(|_| {
                Self::burn_units(&mut state, from, amount, partition, TransferPath::Controller)
            })
            .map_err(|e| self.rejected("controller_redeem", &caller, e))?;

        state.pending_events.push(LedgerEvent::ControllerRedeemed {
            controller: caller,
            from,
            amount,
            legs: legs.clone(),
        });
        log_event!(
            info,
            SUBSYSTEM,
            "Controller redemption executed",
            controller = %address_hex(&caller),
            holder = %address_hex(&from),
            amount = amount
        );
        Ok(Self::receipt(
            from,
            shared_types::ZERO_ADDRESS,
            amount,
            TransferPath::Controller,
            legs,
        ))
    }

    fn renounce_control(&self, caller: Address) -> LedgerResult<()> {
        let mut state = self.state.write();
        state
            .access
            .require(Role::Admin, &caller)
            .map_err(|e| self.rejected("renounce_control", &caller, e.into()))?;

        if state.controllable.renounce() {
            state
                .pending_events
                .push(LedgerEvent::ControlRenounced { by: caller });
            log_event!(
                info,
                SUBSYSTEM,
                "Controller operations renounced",
                by = %address_hex(&caller)
            );
        }
        Ok(())
    }

    fn renounce_issuance(&self, caller: Address) -> LedgerResult<()> {
        let mut state = self.state.write();
        state
            .access
            .require(Role::Admin, &caller)
            .map_err(|e| self.rejected("renounce_issuance", &caller, e.into()))?;

        if state.issuable.renounce() {
            state
                .pending_events
                .push(LedgerEvent::IssuanceRenounced { by: caller });
            log_event!(
                info,
                SUBSYSTEM,
                "Issuance renounced",
                by = %address_hex(&caller)
            );
        }
        Ok(())
    }

    fn authorize_operator(&self, caller: Address, operator: Address) -> LedgerResult<()> {
        Self::check_operator_change(&caller, &operator)
            .map_err(|e| self.rejected("authorize_operator", &caller, e))?;

        let mut state = self.state.write();
        if state.operators.authorize(caller, operator) {
            state.pending_events.push(LedgerEvent::OperatorAuthorized {
                owner: caller,
                operator,
                partition: None,
            });
        }
        Ok(())
    }

    fn revoke_operator(&self, caller: Address, operator: Address) -> LedgerResult<()> {
        Self::check_operator_change(&caller, &operator)
            .map_err(|e| self.rejected("revoke_operator", &caller, e))?;

        let mut state = self.state.write();
        if state.operators.revoke(&caller, &operator) {
            state.pending_events.push(LedgerEvent::OperatorRevoked {
                owner: caller,
                operator,
                partition: None,
            });
        }
        Ok(())
    }

    fn authorize_operator_by_partition(
        &self,
        caller: Address,
        partition: &Partition,
        operator: Address,
    ) -> LedgerResult<()> {
        Self::check_operator_change(&caller, &operator)
            .map_err(|e| self.rejected("authorize_operator_by_partition", &caller, e))?;

        let mut state = self.state.write();
        if state
            .operators
            .authorize_for_partition(caller, partition.clone(), operator)
        {
            state.pending_events.push(LedgerEvent::OperatorAuthorized {
                owner: caller,
                operator,
                partition: Some(partition.clone()),
            });
        }
        Ok(())
    }

    fn revoke_operator_by_partition(
        &self,
        caller: Address,
        partition: &Partition,
        operator: Address,
    ) -> LedgerResult<()> {
        Self::check_operator_change(&caller, &operator)
            .map_err(|e| self.rejected("revoke_operator_by_partition", &caller, e))?;

        let mut state = self.state.write();
        if state
            .operators
            .revoke_for_partition(&caller, partition, &operator)
        {
            state.pending_events.push(LedgerEvent::OperatorRevoked {
                owner: caller,
                operator,
                partition: Some(partition.clone()),
            });
        }
        Ok(())
    }

    fn add_to_whitelist(&self, caller: Address, address: Address) -> LedgerResult<()> {
        self.add_batch_to_whitelist(caller, &[address])
    }

    fn remove_from_whitelist(&self, caller: Address, address: Address) -> LedgerResult<()> {
        self.remove_batch_from_whitelist(caller, &[address])
    }

    fn add_batch_to_whitelist(&self, caller: Address, addresses: &[Address]) -> LedgerResult<()> {
        let mut state = self.state.write();
        state
            .access
            .require(Role::Manager, &caller)
            .map_err(LedgerError::from)
            .and_then(|_| self.check_batch(addresses))
            .map_err(|e| self.rejected("add_to_whitelist", &caller, e))?;

        for address in addresses {
            Self::set_whitelisted(&mut state, *address, true);
        }
        log_event!(
            info,
            SUBSYSTEM,
            "Whitelist entries added",
            manager = %address_hex(&caller),
            count = addresses.len()
        );
        Ok(())
    }

    fn remove_batch_from_whitelist(
        &self,
        caller: Address,
        addresses: &[Address],
    ) -> LedgerResult<()> {
        let mut state = self.state.write();
        state
            .access
            .require(Role::Manager, &caller)
            .map_err(LedgerError::from)
            .and_then(|_| self.check_batch(addresses))
            .map_err(|e| self.rejected("remove_from_whitelist", &caller, e))?;

        for address in addresses {
            Self::set_whitelisted(&mut state, *address, false);
        }
        log_event!(
            info,
            SUBSYSTEM,
            "Whitelist entries removed",
            manager = %address_hex(&caller),
            count = addresses.len()
        );
        Ok(())
    }

    fn grant_role(&self, caller: Address, role: Role, account: Address) -> LedgerResult<()> {
        let mut state = self.state.write();
        let granted = state
            .access
            .grant(&caller, role, account)
            .map_err(|e| self.rejected("grant_role", &caller, e.into()))?;
        if granted {
            state.pending_events.push(LedgerEvent::RoleGranted {
                role,
                account,
                by: caller,
            });
            log_event!(
                info,
                SUBSYSTEM,
                "Role granted",
                role = %role,
                account = %address_hex(&account)
            );
        }
        Ok(())
    }

    fn revoke_role(&self, caller: Address, role: Role, account: Address) -> LedgerResult<()> {
        let mut state = self.state.write();
        let revoked = state
            .access
            .revoke(&caller, role, &account)
            .map_err(|e| self.rejected("revoke_role", &caller, e.into()))?;
        if revoked {
            state.pending_events.push(LedgerEvent::RoleRevoked {
                role,
                account,
                by: caller,
            });
            log_event!(
                info,
                SUBSYSTEM,
                "Role revoked",
                role = %role,
                account = %address_hex(&account)
            );
        }
        Ok(())
    }

    fn can_transfer(
        &self,
        from: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> TransferStatus {
        let state = self.state.read();
        let status = if amount == 0 {
            TransferStatus::InvalidAmount
        } else if Self::check_receiver(&state, &to, true).is_err() {
            TransferStatus::InvalidReceiver
        } else {
            match state.balances.plan_draw(&from, amount, partition) {
                Ok(_) => TransferStatus::Success,
                Err(LedgerError::InsufficientPartitionBalance { .. }) => {
                    TransferStatus::InsufficientPartitionBalance
                }
                Err(_) => TransferStatus::InsufficientBalance,
            }
        };
        debug!(
            subsystem = SUBSYSTEM,
            from = %address_hex(&from),
            to = %address_hex(&to),
            amount,
            ?status,
            "Transfer pre-validated"
        );
        status
    }

    fn ownership_percentage(&self, holder: &Address) -> u128 {
        let state = self.state.read();
        let supply = state.balances.total_supply();
        if supply == 0 {
            return 0;
        }
        mul_div_floor(state.balances.balance_of(holder), BASIS_POINTS, supply).unwrap_or(0)
    }

    fn balance_of(&self, holder: &Address) -> Amount {
        self.state.read().balances.balance_of(holder)
    }

    fn balance_of_by_partition(&self, holder: &Address, partition: &Partition) -> Amount {
        self.state.read().balances.balance_of_partition(holder, partition)
    }

    fn partitions_of(&self, holder: &Address) -> Vec<Partition> {
        self.state.read().balances.partitions_of(holder)
    }

    fn partitions(&self) -> Vec<Partition> {
        self.state.read().balances.partitions().to_vec()
    }

    fn total_supply(&self) -> Amount {
        self.state.read().balances.total_supply()
    }

    fn total_supply_by_partition(&self, partition: &Partition) -> Amount {
        self.state.read().balances.partition_supply(partition)
    }

    fn is_whitelisted(&self, address: &Address) -> bool {
        self.state.read().whitelist.contains(address)
    }

    fn is_operator(&self, operator: &Address, owner: &Address) -> bool {
        self.state.read().operators.is_operator(operator, owner)
    }

    fn is_operator_for_partition(
        &self,
        operator: &Address,
        owner: &Address,
        partition: &Partition,
    ) -> bool {
        self.state
            .read()
            .operators
            .is_operator_for_partition(operator, owner, partition)
    }

    fn is_controllable(&self) -> bool {
        self.state.read().controllable.is_enabled()
    }

    fn is_issuable(&self) -> bool {
        self.state.read().issuable.is_enabled()
    }

    fn has_role(&self, role: Role, account: &Address) -> bool {
        self.state.read().access.has_role(role, account)
    }
}
