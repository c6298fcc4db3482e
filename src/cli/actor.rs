//! hyd actor command implementations.

use serde::Serialize;

use crate::actor::{load_roster, persist_actor, Identity, RosterEntry};
use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub fn run_show(context: &Context, output: OutputOptions) -> Result<()> {
    let identity = &context.identity;

    let mut human = HumanOutput::new(format!("Actor: {}", identity.name));
    human.push_summary("role", identity.role.label());
    emit_success(output, "actor show", identity, Some(&human))
}

#[derive(Serialize)]
struct SetData {
    identity: Identity,
    persisted: bool,
}

pub fn run_set(context: &Context, output: OutputOptions, name: &str) -> Result<()> {
    persist_actor(&context.storage, name)?;
    // Re-resolve so the reported role reflects the new name.
    let identity = crate::actor::resolve_identity(
        &context.storage,
        &context.config,
        Some(name),
        None,
    )?;

    let mut human = HumanOutput::new(format!("Actor set: {}", identity.name));
    human.push_summary("role", identity.role.label());
    human.push_next_step("hyd task list".to_string());
    let data = SetData {
        identity,
        persisted: true,
    };
    emit_success(output, "actor set", &data, Some(&human))
}

#[derive(Serialize)]
struct RosterData {
    entries: Vec<RosterEntry>,
}

pub fn run_roster(context: &Context, output: OutputOptions) -> Result<()> {
    let entries = load_roster(&context.storage)?;

    let mut human = HumanOutput::new("Personnel roster");
    human.push_summary("entries", entries.len().to_string());
    for entry in &entries {
        human.push_detail(format!("{} ({})", entry.name, entry.role.label()));
    }
    let data = RosterData { entries };
    emit_success(output, "actor roster", &data, Some(&human))
}
