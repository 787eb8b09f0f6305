use stampy_agent::AgentRuntime;
use stampy_core::Calculator;

use crate::commands::CommandResult;

pub fn run(calculator: Calculator, text: &str, json: bool) -> CommandResult {
    let runtime = AgentRuntime::new(calculator);
    let reply = runtime.handle_message(text);
    tracing::debug!(event_name = "cli.ask", "answered free-text question");

    if json {
        CommandResult::json(&reply)
    } else {
        CommandResult::ok(reply.text)
    }
}
