use dialoguer::{Input, Select};
use serde::Serialize;

use crate::cli::context::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::input::{
    parse_description, parse_id, parse_kind, parse_row_key, parse_value, ItemInput,
};
use crate::cli::registry::CommandEntry;
use crate::cli::{output, view};
use crate::errors::BudgetError;
use crate::ledger::{BudgetSnapshot, Item, ItemKind};

const ADD_USAGE: &str = "add <inc|exp> <description> <value>";
const REMOVE_USAGE: &str = "remove <inc|exp>-<id> | remove <inc|exp> <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("remove", "Delete a recorded item", REMOVE_USAGE, cmd_remove),
        CommandEntry::new("list", "Show all items", "list", cmd_list),
        CommandEntry::new(
            "summary",
            "Show budget, totals, and spent percentage",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "export",
            "Print items and totals as JSON",
            "export",
            cmd_export,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = match args {
        [] if context.mode == CliMode::Interactive => prompt_item(context)?,
        [kind, description @ .., value] if !description.is_empty() => {
            ItemInput::parse(kind, &description.join(" "), value)?
        }
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {ADD_USAGE}"
            )))
        }
    };

    if !(context.ledger.total(input.kind) + input.value).is_finite() {
        return Err(BudgetError::InvalidInput(format!(
            "value would push the {} total out of range",
            input.kind.label().to_lowercase()
        ))
        .into());
    }

    let added = context
        .ledger
        .add_item(input.kind, input.description, input.value);
    context.refresh();

    output::success(format!("Added {}: {}", added.row_key(), added.description()));
    if let Some(item) = context.ledger.item(added.kind(), added.id()) {
        output::lines([view::render_item_row(item, &context.config.locale)]);
    }
    context.print_summary();
    Ok(())
}

fn prompt_item(context: &ShellContext) -> Result<ItemInput, CommandError> {
    let kinds = [ItemKind::Income, ItemKind::Expense];
    let labels: Vec<&str> = kinds.iter().map(|kind| kind.label()).collect();
    let selection = Select::with_theme(&context.theme)
        .with_prompt("Type")
        .items(&labels)
        .default(0)
        .interact()?;
    let description = Input::<String>::with_theme(&context.theme)
        .with_prompt("Description")
        .validate_with(|value: &String| -> Result<(), String> {
            parse_description(value).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()?;
    let value = Input::<String>::with_theme(&context.theme)
        .with_prompt("Value")
        .validate_with(|value: &String| -> Result<(), String> {
            parse_value(value).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()?;
    Ok(ItemInput {
        kind: kinds[selection],
        description: parse_description(&description)?,
        value: parse_value(&value)?,
    })
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, id) = match args {
        [key] => parse_row_key(key)?,
        [kind, id] => (parse_kind(kind)?, parse_id(id)?),
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {REMOVE_USAGE}"
            )))
        }
    };

    match context.ledger.remove_item(kind, id) {
        Some(removed) => {
            context.refresh();
            output::success(format!(
                "Removed {}: {}",
                removed.row_key(),
                removed.description()
            ));
            context.print_summary();
        }
        None => output::warning(format!("No {} item with id {}.", kind.tag(), id)),
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::lines(view::render_items(&context.ledger, &context.config.locale));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.print_summary();
    Ok(())
}

#[derive(Serialize)]
struct ExportView<'a> {
    incomes: &'a [Item],
    expenses: &'a [Item],
    snapshot: BudgetSnapshot,
}

fn cmd_export(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let export = ExportView {
        incomes: context.ledger.incomes(),
        expenses: context.ledger.expenses(),
        snapshot: context.ledger.budget_snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}
