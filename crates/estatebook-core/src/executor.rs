//! Command execution
//!
//! `execute` is the single entry point for user-issued mutations. Each
//! command is one unit of work:
//!
//! - **All-or-nothing**: on any failure the store is restored to the
//!   checkpoint taken before the command started
//! - **Scoped**: client targets resolve only against the visible clients
//! - **Checked**: referential integrity is validated before success is reported
//!
//! ```
//! use estatebook_core::{execute, AutoConfirm, Command, CommandContext, EngineConfig, Store, VisibleClients};
//!
//! let mut store = Store::new();
//! let visible = VisibleClients::all(&store);
//! let config = EngineConfig::default();
//! let ctx = CommandContext::new(&visible, &AutoConfirm, &config);
//!
//! let result = execute(&mut store, Command::DeleteClient {
//!     name: "Nobody".to_string(),
//!     skip_confirmation: false,
//! }, &ctx);
//! assert!(result.is_err());
//! ```

use std::collections::BTreeSet;
use std::time::Instant;

use estatebook_core_types::{RequestContext, Sensitive};

use crate::commands::Command;
use crate::config::EngineConfig;
use crate::confirmation::ConfirmationGate;
use crate::errors::{EstateError, ExError, Result};
use crate::integrity;
use crate::model::{
    Address, Appointment, Area, Client, Listing, Name, Price, Region, Role,
};
use crate::ops::{Store, VisibleClients};
use crate::resolver::resolve_exact;
use crate::rules::invariants::validate_store;
use crate::{log_op_end, log_op_error, log_op_start};

/// Everything a command needs besides the store
pub struct CommandContext<'a> {
    /// Clients currently shown to the user
    pub visible: &'a VisibleClients,
    pub gate: &'a dyn ConfirmationGate,
    pub config: &'a EngineConfig,
    pub request: RequestContext,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        visible: &'a VisibleClients,
        gate: &'a dyn ConfirmationGate,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            visible,
            gate,
            config,
            request: RequestContext::new(),
        }
    }

    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = request;
        self
    }

    /// Canonical form of a failure of `op` under this request
    pub fn error_report(&self, op: &str, err: &EstateError) -> ExError {
        let report = ExError::from(err.clone()).with_request_id(self.request.request_id.clone());
        if report.op().is_some() {
            report
        } else {
            report.with_op(op)
        }
    }
}

/// Feedback shown to the user after a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
}

impl CommandResult {
    fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
        }
    }
}

/// Execute one command against the store
///
/// # Errors
///
/// Any `EstateError`. The store is left exactly as it was before the call.
pub fn execute(
    store: &mut Store,
    cmd: Command,
    ctx: &CommandContext<'_>,
) -> Result<CommandResult> {
    let op = cmd.op_name();
    let started = Instant::now();
    log_op_start!(op, request_id = %ctx.request.request_id);

    let checkpoint = store.checkpoint();
    let outcome = dispatch(store, cmd, ctx).and_then(|result| {
        validate_store(store)?;
        Ok(result)
    });
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(result) => {
            log_op_end!(op, duration_ms = duration_ms, request_id = %ctx.request.request_id);
            Ok(result)
        }
        Err(err) => {
            if !checkpoint.is_current(store) {
                store.rollback(checkpoint);
            }
            let report = ctx.error_report(op, &err);
            log_op_error!(
                op,
                report.clone(),
                duration_ms = duration_ms,
                request_id = %ctx.request.request_id,
                err_message = %report
            );
            Err(err)
        }
    }
}

fn dispatch(store: &mut Store, cmd: Command, ctx: &CommandContext<'_>) -> Result<CommandResult> {
    match cmd {
        Command::AddBuyer(client) => add_client(store, client, Role::Buyer),
        Command::AddSeller(client) => add_client(store, client, Role::Seller),
        Command::AddListing {
            name,
            price,
            area,
            address,
            region,
            seller,
            buyers,
        } => add_listing(
            store,
            ctx,
            NewListing {
                name,
                price,
                area,
                address,
                region,
            },
            &seller,
            &buyers,
        ),
        Command::DeleteClient {
            name,
            skip_confirmation,
        } => delete_client(store, ctx, &name, skip_confirmation),
        Command::DeleteListing { name } => delete_listing(store, ctx, &name),
        Command::AddBuyersToListing { listing, buyers } => {
            add_buyers_to_listing(store, ctx, &listing, &buyers)
        }
        Command::RemoveBuyersFromListing { listing, buyers } => {
            remove_buyers_from_listing(store, ctx, &listing, &buyers)
        }
        Command::ScheduleAppointment { name, appointment } => {
            set_appointment(store, ctx, &name, appointment)
        }
        Command::DeleteAppointment { name } => {
            set_appointment(store, ctx, &name, Appointment::Empty)
        }
    }
}

// ============================================================
// Target resolution
// ============================================================

/// Exact match among visible clients, or `NotFound` / `Suggestion`
fn visible_client<'a>(store: &'a Store, ctx: &CommandContext<'_>, raw: &str) -> Result<&'a Client> {
    let candidates = ctx.visible.clients(store);
    resolve_exact(raw, &candidates, &ctx.config.resolver)
}

/// Exact match among all listings, or `NotFound` / `Suggestion` / `Ambiguous`
fn listing_target<'a>(store: &'a Store, ctx: &CommandContext<'_>, raw: &str) -> Result<&'a Listing> {
    let candidates: Vec<&Listing> = store.listings().iter().collect();
    resolve_exact(raw, &candidates, &ctx.config.resolver)
}

/// A client a listing will point at. Never resolved approximately.
fn referenced_client(
    store: &Store,
    ctx: &CommandContext<'_>,
    listing: &Name,
    raw: &str,
    expected: Role,
) -> Result<Name> {
    ctx.visible
        .clients(store)
        .into_iter()
        .find(|c| c.name().matches(raw))
        .filter(|c| c.role() == expected)
        .map(|c| c.name().clone())
        .ok_or_else(|| EstateError::DanglingReference {
            listing: listing.to_string(),
            client: raw.trim().to_string(),
            expected,
        })
}

// ============================================================
// Handlers
// ============================================================

fn add_client(store: &mut Store, client: Client, expected: Role) -> Result<CommandResult> {
    if client.role() != expected {
        return Err(EstateError::RoleMismatch {
            name: client.name().to_string(),
            expected,
            actual: client.role(),
        });
    }

    tracing::debug!(
        component = module_path!(),
        client_name = %client.name(),
        phone = ?Sensitive::new(client.phone()),
        email = ?Sensitive::new(client.email()),
    );

    let feedback = format!("New {} added: {}", expected, client);
    store.add_client(client)?;
    Ok(CommandResult::new(feedback))
}

struct NewListing {
    name: Name,
    price: Price,
    area: Area,
    address: Address,
    region: Region,
}

fn add_listing(
    store: &mut Store,
    ctx: &CommandContext<'_>,
    fields: NewListing,
    seller: &str,
    buyers: &[String],
) -> Result<CommandResult> {
    let seller = referenced_client(store, ctx, &fields.name, seller, Role::Seller)?;
    let buyers = buyers
        .iter()
        .map(|raw| referenced_client(store, ctx, &fields.name, raw, Role::Buyer))
        .collect::<Result<BTreeSet<Name>>>()?;

    let listing = Listing::new(
        fields.name,
        fields.price,
        fields.area,
        fields.address,
        fields.region,
        seller,
        buyers,
    );
    let feedback = format!("New listing added: {}", listing);
    store.add_listing(listing)?;
    Ok(CommandResult::new(feedback))
}

fn delete_client(
    store: &mut Store,
    ctx: &CommandContext<'_>,
    raw: &str,
    skip_confirmation: bool,
) -> Result<CommandResult> {
    let target = visible_client(store, ctx, raw)?.clone();
    let skip = skip_confirmation || !ctx.config.confirmation.require_for_dependents;

    let outcome = integrity::delete_client(store, &target, skip, ctx.gate)?;

    tracing::info!(
        component = module_path!(),
        op = "delete_client",
        request_id = %ctx.request.request_id,
        client_name = %target.name(),
        role = target.role().as_str(),
        detached_count = outcome.detached_listings.len(),
        deleted_listings = outcome.deleted_listings.len(),
    );

    Ok(CommandResult::new(format!(
        "Successfully deleted {} with the number: {} and email: {}!",
        target.name(),
        target.phone(),
        target.email()
    )))
}

fn delete_listing(store: &mut Store, ctx: &CommandContext<'_>, raw: &str) -> Result<CommandResult> {
    let target = listing_target(store, ctx, raw)?.clone();
    integrity::delete_listing(store, &target)?;

    tracing::info!(
        component = module_path!(),
        op = "delete_listing",
        request_id = %ctx.request.request_id,
        listing_name = %target.name(),
        seller = %target.seller(),
    );
    Ok(CommandResult::new(format!(
        "Successfully deleted listing: {}",
        target.name()
    )))
}

fn require_buyers(buyers: &[String]) -> Result<()> {
    if buyers.is_empty() {
        return Err(EstateError::InvalidField {
            field: "buyers",
            reason: "At least one buyer is required".to_string(),
        });
    }
    Ok(())
}

fn add_buyers_to_listing(
    store: &mut Store,
    ctx: &CommandContext<'_>,
    raw_listing: &str,
    buyers: &[String],
) -> Result<CommandResult> {
    require_buyers(buyers)?;
    let target = listing_target(store, ctx, raw_listing)?.clone();

    let mut added = BTreeSet::new();
    for raw in buyers {
        let buyer = referenced_client(store, ctx, target.name(), raw, Role::Buyer)?;
        if target.has_buyer(&buyer) {
            return Err(EstateError::BuyerAlreadyInListing {
                listing: target.name().to_string(),
                buyer: buyer.to_string(),
            });
        }
        added.insert(buyer);
    }

    let edited = target.with_buyers(&added);
    let feedback = format!("Buyers added to listing: {}", edited);
    store.replace_listing(&target, edited)?;
    Ok(CommandResult::new(feedback))
}

fn remove_buyers_from_listing(
    store: &mut Store,
    ctx: &CommandContext<'_>,
    raw_listing: &str,
    buyers: &[String],
) -> Result<CommandResult> {
    require_buyers(buyers)?;
    let target = listing_target(store, ctx, raw_listing)?.clone();

    let mut removed = BTreeSet::new();
    for raw in buyers {
        let buyer = Name::new(raw.as_str())?;
        if !target.has_buyer(&buyer) {
            return Err(EstateError::BuyerNotInListing {
                listing: target.name().to_string(),
                buyer: buyer.to_string(),
            });
        }
        removed.insert(buyer);
    }

    let edited = target.without_buyers(&removed);
    let feedback = format!("Buyers removed from listing: {}", edited);
    store.replace_listing(&target, edited)?;
    Ok(CommandResult::new(feedback))
}

fn set_appointment(
    store: &mut Store,
    ctx: &CommandContext<'_>,
    raw: &str,
    appointment: Appointment,
) -> Result<CommandResult> {
    let target = visible_client(store, ctx, raw)?.clone();

    let feedback = if appointment.is_empty() {
        format!("Appointment deleted for {}", target.name())
    } else {
        format!("Appointment scheduled for {}: {}", target.name(), appointment)
    };

    store.replace_client(&target, target.with_appointment(appointment))?;
    Ok(CommandResult::new(feedback))
}
