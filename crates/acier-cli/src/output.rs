//! Text rendering of command results.

use acier_ops::{CommandOutput, FindResult};

/// Render the result of the command `command` run against ACI `name`.
pub fn render(command: &str, name: &str, output: &CommandOutput) -> String {
    match output {
        CommandOutput::Aci(text) => match command {
            "aci_create" => format!("Created ACI \"{name}\"\n  {text}"),
            "aci_mod" => format!("Modified ACI \"{name}\"\n  {text}"),
            _ => text.clone(),
        },
        CommandOutput::Acis(result) => render_find(result),
        CommandOutput::Deleted(true) => format!("Deleted ACI \"{name}\""),
        CommandOutput::Deleted(false) => format!("ACI \"{name}\" was not deleted"),
    }
}

fn render_find(result: &FindResult) -> String {
    let mut lines: Vec<String> = result.entries.iter().map(|e| format!("  {e}")).collect();
    let noun = if result.count == 1 { "ACI" } else { "ACIs" };
    lines.push(format!("{} {noun} matched", result.count));
    lines.join("\n")
}
