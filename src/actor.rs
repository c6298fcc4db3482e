//! Actor identity management.
//!
//! Name resolution order:
//! 1) CLI --actor (explicit)
//! 2) HYD_ACTOR environment variable
//! 3) Persisted workspace value in .hyd/actor
//! 4) Config default (actor.default) or "unknown"
//!
//! The role comes from --role / HYD_ROLE when given, otherwise from the
//! personnel roster; names missing from the roster get the configured
//! default role. Only `{ name, role }` ever reach the core.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::Storage;

/// Roles known to the dashboard. Only `technician` changes visibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Firefighter,
    Technician,
    Municipal,
    Supervisor,
}

impl Role {
    pub fn parse(raw: &str) -> Result<Role> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "firefighter" => Ok(Role::Firefighter),
            "technician" => Ok(Role::Technician),
            "municipal" => Ok(Role::Municipal),
            "supervisor" => Ok(Role::Supervisor),
            other => Err(Error::InvalidArgument(format!(
                "unknown role '{other}' (expected firefighter, technician, municipal or supervisor)"
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Firefighter => "firefighter",
            Role::Technician => "technician",
            Role::Municipal => "municipal",
            Role::Supervisor => "supervisor",
        }
    }
}

/// The current actor as seen by the core.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub role: Role,
}

/// One personnel roster entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub role: Role,
    pub email: String,
}

/// The region's staff directory (the login directory minus credentials).
const SEED_ROSTER: &[(&str, Role, &str)] = &[
    ("Mohammed Salim", Role::Technician, "mohammed.salim@example.com"),
    ("Ali Alawi", Role::Municipal, "ali.alawi@example.com"),
    ("Ahmed Benali", Role::Firefighter, "ahmed.benali@example.com"),
    ("Omar Alami", Role::Technician, "omar.alami@example.com"),
    ("Laila Bennani", Role::Municipal, "laila.bennani@example.com"),
    ("Youssef Tazi", Role::Firefighter, "youssef.tazi@example.com"),
    ("Rachid Moussaoui", Role::Technician, "rachid.moussaoui@example.com"),
    ("Aicha Kadiri", Role::Municipal, "aicha.kadiri@example.com"),
    ("Hassan Berrada", Role::Firefighter, "hassan.berrada@example.com"),
    ("Karim Idrissi", Role::Supervisor, "karim.idrissi@example.com"),
    ("Leila Fassi", Role::Technician, "leila.fassi@example.com"),
    ("Sofia El Amrani", Role::Municipal, "sofia.elamrani@example.com"),
    ("Kamal Tazi", Role::Firefighter, "kamal.tazi@example.com"),
];

pub fn seed_roster() -> Vec<RosterEntry> {
    SEED_ROSTER
        .iter()
        .map(|(name, role, email)| RosterEntry {
            name: (*name).to_string(),
            role: *role,
            email: (*email).to_string(),
        })
        .collect()
}

/// Load the roster, falling back to the built-in directory when the
/// file is absent.
pub fn load_roster(storage: &Storage) -> Result<Vec<RosterEntry>> {
    let path = storage.roster_file();
    if !path.exists() {
        return Ok(seed_roster());
    }
    storage.read_json(&path)
}

/// Write the seed roster out, for `hyd init`.
pub fn write_roster(storage: &Storage) -> Result<()> {
    storage.init()?;
    storage.write_json(&storage.roster_file(), &seed_roster())
}

/// Resolve the current actor name using CLI, environment, persisted
/// value, and config.
pub fn resolve_name(storage: &Storage, config: &Config, cli_actor: Option<&str>) -> Result<String> {
    if let Some(actor) = non_empty(cli_actor) {
        return Ok(actor.to_string());
    }

    if let Ok(env_actor) = std::env::var("HYD_ACTOR") {
        if let Some(actor) = non_empty(Some(env_actor.as_str())) {
            return Ok(actor.to_string());
        }
    }

    if let Some(actor) = load_persisted_actor(storage)? {
        return Ok(actor);
    }

    Ok(config.actor.default.clone())
}

/// Resolve the full identity: name as above, role from the explicit
/// override, the roster, or the configured default.
pub fn resolve_identity(
    storage: &Storage,
    config: &Config,
    cli_actor: Option<&str>,
    cli_role: Option<&str>,
) -> Result<Identity> {
    let name = resolve_name(storage, config, cli_actor)?;

    if let Some(role) = non_empty(cli_role) {
        return Ok(Identity {
            name,
            role: Role::parse(role)?,
        });
    }

    if let Ok(env_role) = std::env::var("HYD_ROLE") {
        if let Some(role) = non_empty(Some(env_role.as_str())) {
            return Ok(Identity {
                name,
                role: Role::parse(role)?,
            });
        }
    }

    let roster = load_roster(storage)?;
    if let Some(entry) = roster.iter().find(|entry| entry.name == name) {
        return Ok(Identity {
            name,
            role: entry.role,
        });
    }

    let role = Role::parse(&config.actor.default_role)
        .map_err(|_| Error::InvalidConfig(format!("unknown default role '{}'", config.actor.default_role)))?;
    Ok(Identity { name, role })
}

/// Persist the actor identity in `.hyd/actor`.
pub fn persist_actor(storage: &Storage, actor: &str) -> Result<()> {
    let actor = non_empty(Some(actor))
        .ok_or_else(|| Error::InvalidArgument("actor name cannot be empty".to_string()))?;

    storage.init()?;
    std::fs::write(storage.actor_file(), format!("{actor}\n"))?;
    Ok(())
}

/// Load the actor identity from `.hyd/actor`, if present.
pub fn load_persisted_actor(storage: &Storage) -> Result<Option<String>> {
    let path = storage.actor_file();
    if !path.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(path)?;
    let actor = raw.trim();
    if actor.is_empty() {
        return Ok(None);
    }

    Ok(Some(actor.to_string()))
}

fn non_empty(input: Option<&str>) -> Option<&str> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}
