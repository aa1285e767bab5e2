//! Line-oriented interactive mode: every line typed becomes the query and is
//! submitted.

use std::io::Write;

use anyhow::Result;
use client_core::{Presentation, SearchBackend, SearchController};
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT: &str = "search> ";

pub async fn run<B: SearchBackend>(controller: &mut SearchController, backend: &B) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        if matches!(line.trim(), ":q" | ":quit" | ":exit") {
            break;
        }

        controller.set_query(line);
        if let Some(pending) = controller.begin_submit() {
            println!("{}", controller.presentation());
            let outcome = backend.analyze(&pending.request).await;
            controller.settle(pending.generation, outcome);
            print_presentation(&controller.presentation());
        }
        prompt()?;
    }
    Ok(())
}

fn print_presentation(presentation: &Presentation) {
    match presentation {
        Presentation::Blank => {}
        Presentation::Error(message) => eprintln!("error: {message}"),
        other => println!("{other}\n"),
    }
}

fn prompt() -> Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(PROMPT.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
