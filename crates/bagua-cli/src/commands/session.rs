use std::io::{self, BufRead, Write};

use bagua_core::{HexagramCatalog, TopicalLinkTable, TransformationTable};
use bagua_oracle::{ContentLibrary, DivinationCaster, DivinationSession, Reading, suggest};
use colored::Colorize;

use super::CastSettings;

const HELP: &str = "\
  cast            cast once (fresh, then chained from the last result)
  reset           start over with a fresh cast
  status          show the session state
  log [md|text]   show the cast log
  prompt          show the interpreter prompt for the last cast
  help            show this list
  quit            leave the session";

/// Interactive session state and command dispatch.
struct Shell {
    catalog: &'static HexagramCatalog,
    table: TransformationTable,
    links: &'static TopicalLinkTable,
    content: ContentLibrary,
    caster: DivinationCaster<&'static HexagramCatalog>,
    session: DivinationSession,
    last: Option<Reading>,
}

impl Shell {
    fn process(&mut self, input: &str) -> Result<String, String> {
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next().unwrap_or("");

        match cmd.as_str() {
            "cast" | "c" => {
                let cast = self.caster.cast(&mut self.session);
                let reading = Reading::assemble(&cast, self.catalog, &self.content);
                let suggestion = suggest(&cast, &self.table, self.links, self.session.rng());
                let index = self.session.cast_count();
                let out = super::cast::render(self.catalog, index, &cast, &reading, &suggestion);
                self.last = Some(reading);
                Ok(out.trim_end().to_string())
            }
            "reset" => {
                self.caster.reset(&mut self.session);
                self.last = None;
                Ok("Session reset. The next cast starts fresh.".to_string())
            }
            "status" => {
                let previous = match self.session.previous_result() {
                    Some(n) => super::label(self.catalog, n),
                    None => "none (next cast is fresh)".to_string(),
                };
                Ok(format!(
                    "Session {}\n  casts:    {}\n  previous: {previous}",
                    self.session.id(),
                    self.session.cast_count()
                ))
            }
            "log" => {
                if self.session.log().is_empty() {
                    return Ok("No casts yet.".to_string());
                }
                match arg {
                    "" | "text" => Ok(self.session.log().export_text(self.catalog)),
                    "md" | "markdown" => Ok(self.session.log().export_markdown(self.catalog)),
                    other => Err(format!("unknown log format: {other} (expected md or text)")),
                }
            }
            "prompt" => self
                .last
                .as_ref()
                .map(Reading::prompt)
                .ok_or_else(|| "nothing cast yet".to_string()),
            "help" | "?" => Ok(HELP.to_string()),
            "quit" | "q" | "exit" => Ok("Goodbye!".to_string()),
            other => Err(format!("unknown command: {other} (type 'help')")),
        }
    }
}

pub fn run(settings: &CastSettings) -> Result<(), String> {
    let catalog = super::catalog()?;
    let config = settings.config()?;
    let table = TransformationTable::build(catalog).map_err(|e| e.to_string())?;

    let mut shell = Shell {
        catalog,
        links: TopicalLinkTable::standard().map_err(|e| e.to_string())?,
        content: super::load_content(settings.content.as_deref())?,
        caster: DivinationCaster::new(catalog, config.clone()).with_table(table.clone()),
        session: DivinationSession::new(&config),
        table,
        last: None,
    };

    println!("  {} Divination Session", "Starting".bold());
    println!("  Method: {} | Session: {}", config.draw_method, shell.session.id());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match shell.process(input) {
            Ok(output) => {
                println!("{output}\n");
                if matches!(input.to_lowercase().as_str(), "quit" | "q" | "exit") {
                    break;
                }
            }
            Err(e) => println!("{}\n", e.yellow()),
        }
    }

    Ok(())
}
