use crate::cli::commands::{Command, HELP_TEXT, is_command_line, parse_command};
use crate::llm::gemini::GeminiProvider;
use crate::llm::provider::CompletionProvider;
use crate::router::route;
use crate::tools::ToolRegistry;
use crate::trace::SessionTrace;
use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

pub struct AppState {
    pub registry: ToolRegistry,
    pub llm: GeminiProvider,
    pub trace: SessionTrace,
}

const WELCOME_TEXT: &str = "Welcome! I'm your AI assistant. Type 'quit' to exit.\nYou can ask me to perform calculations or chat with me.";

pub async fn run_repl(state: &mut AppState) -> Result<()> {
    println!("{WELCOME_TEXT}");

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let line = line.trim();
                if is_exit_line(line) {
                    break;
                }
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                handle_line(state, line).await;
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn is_exit_line(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

async fn handle_line(state: &mut AppState, line: &str) {
    state.trace.log_input(line);

    if is_command_line(line) {
        handle_command(state, line);
        return;
    }

    match route(line, &state.registry) {
        Ok(result) if result.matched => {
            state.trace.log_tool(&result.response);
            println!("{}", result.response);
        }
        Ok(_) => match state.llm.complete(line).await {
            Ok(completion) => {
                state.trace.log_assistant(&completion.text);
                println!("{}", completion.text);
            }
            Err(err) => {
                let message = format!("Assistant request failed: {err}");
                state.trace.log_system(&message);
                println!("{message}");
            }
        },
        Err(err) => {
            let message = format!("Error: {err}");
            state.trace.log_system(&message);
            println!("{message}");
        }
    }
}

fn handle_command(state: &AppState, line: &str) {
    match parse_command(line) {
        Ok(Command::Help) => println!("{HELP_TEXT}"),
        Ok(Command::Tools) => {
            for (name, description) in state.registry.list() {
                println!("{name} - {description}");
            }
        }
        Err(err) => println!("{}", err.message()),
    }
}
