use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::api::init_tracing;
use crate::view::{ChatView, HttpRelayClient, RelayClient, SubmitOutcome};

pub async fn run(server_url: &str) -> Result<()> {
    init_tracing(format!("{}=info", env!("CARGO_CRATE_NAME")));

    let mut rl = DefaultEditor::new()?;
    let client = HttpRelayClient::new(server_url);
    let mut view = ChatView::new();

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                view.set_chat_input(&line);
                // Empty input can't be submitted
                let Some(transcript) = view.begin_submit() else {
                    continue;
                };
                let _ = rl.add_history_entry(line.as_str());

                // The placeholder is the last rendered line while loading
                if let Some(placeholder) = view.render().last() {
                    println!("{}", placeholder);
                }

                let result = client.send(&transcript).await;
                if view.finish_submit(result) == SubmitOutcome::Replied {
                    // The terminal is always at the bottom already
                    view.take_scroll_request();
                    if let Some(reply) = view.render().last() {
                        println!("{}", reply);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
