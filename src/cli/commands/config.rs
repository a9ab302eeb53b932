use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::CONFIG_KEYS;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        "config [show | set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value] => set(context, key, value),
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show | set <key> <value>] (keys: {})",
            CONFIG_KEYS.join(", ")
        ))),
    }
}

fn show(context: &ShellContext) {
    output::section("Configuration");
    output::lines(
        context
            .config
            .entries()
            .into_iter()
            .map(|(key, value)| format!("{:<20}{}", key, value)),
    );
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set_value(key, value)?;

    let id_policy = updated.id_policy;
    if id_policy != context.ledger.id_policy() && context.ledger.has_issued_ids() {
        return Err(CommandError::InvalidArguments(
            "id_policy can only change before the first item is added".into(),
        ));
    }

    context.config = updated;
    context.ledger.set_id_policy(id_policy);
    context.apply_output_preferences();
    context.persist_config()?;
    output::success(format!("Set {key} = {value}."));
    Ok(())
}
