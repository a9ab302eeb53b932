use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    output::lines(
        registry
            .entries()
            .iter()
            .map(|entry| format!("  {:<10}{}", entry.name, entry.description)),
    );
    output::hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::lines([
        format!("  description  {}", entry.description),
        format!("  usage        {}", entry.usage),
    ]);
}
