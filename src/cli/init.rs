//! hyd init command implementation.

use serde::Serialize;

use crate::actor::write_roster;
use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

#[derive(Serialize)]
struct InitData {
    root: std::path::PathBuf,
    tasks: usize,
    roster: usize,
    config_written: bool,
}

pub fn run(context: &Context, output: OutputOptions) -> Result<()> {
    context.storage.init()?;

    // Seeds the store when nothing is persisted yet; a re-run keeps
    // existing data untouched.
    let tasks = context.store.load()?;

    write_roster(&context.storage)?;
    let roster = crate::actor::load_roster(&context.storage)?;

    let config_file = context.storage.config_file();
    let config_written = if config_file.exists() {
        false
    } else {
        let rendered = context.config.to_toml()?;
        context.storage.write_atomic(&config_file, rendered.as_bytes())?;
        true
    };

    let mut human = HumanOutput::new("Initialized hyd");
    human.push_summary("root", context.storage.root().display().to_string());
    human.push_summary("tasks", tasks.len().to_string());
    human.push_summary("roster entries", roster.len().to_string());
    if config_written {
        human.push_detail(format!("wrote {}", config_file.display()));
    }
    human.push_next_step("hyd task list".to_string());
    human.push_next_step("hyd calendar --month 2025-06".to_string());

    let data = InitData {
        root: context.storage.root().to_path_buf(),
        tasks: tasks.len(),
        roster: roster.len(),
        config_written,
    };
    emit_success(output, "init", &data, Some(&human))
}
