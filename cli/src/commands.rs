// cli/src/commands.rs

use anyhow::{bail, Context, Result};
use folio_browser::{BrowseError, RecordSource, Session};
use folio_core::RecordId;
use serde_json::Value;
use std::io::Write;
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  page N          load page N
  next | prev     move one page
  select-page     select every row on this page
  deselect-page   deselect every row on this page
  first N         select the first N rows of this page
  toggle ID       check or uncheck one row, as the table would
  show            redraw the current page
  selected        list every selected id
  help            this text
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Page(u32),
    Next,
    Prev,
    SelectPage,
    DeselectPage,
    /// Raw count text, validated by the selection store.
    First(String),
    Toggle(RecordId),
    Show,
    Selected,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "page" | "p" => Command::Page(
                rest.parse()
                    .with_context(|| format!("not a page number: {:?}", rest))?,
            ),
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Prev,
            "select-page" => Command::SelectPage,
            "deselect-page" => Command::DeselectPage,
            "first" => Command::First(rest.to_string()),
            "toggle" | "t" => Command::Toggle(RecordId(
                rest.parse()
                    .with_context(|| format!("not a record id: {:?}", rest))?,
            )),
            "show" | "" => Command::Show,
            "selected" => Command::Selected,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command {:?} (try `help`)", other),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one command against the session and write what the user should see.
///
/// Browsing errors are shown and the loop continues; only failures to
/// write output are returned.
pub async fn execute<S, W>(session: &mut Session<S>, command: Command, out: &mut W) -> Result<Flow>
where
    S: RecordSource,
    W: Write,
{
    match command {
        Command::Page(page) => {
            let result = session.go_to_page(page).await.map(|_| ());
            report(session, result, out)?;
        }
        Command::Next => {
            let result = session.next_page().await.map(|_| ());
            report(session, result, out)?;
        }
        Command::Prev => {
            let result = session.previous_page().await.map(|_| ());
            report(session, result, out)?;
        }
        Command::SelectPage => {
            let added = session.select_page();
            writeln!(out, "selected {} more", added)?;
            render(session, out)?;
        }
        Command::DeselectPage => {
            let removed = session.deselect_page();
            writeln!(out, "deselected {}", removed)?;
            render(session, out)?;
        }
        Command::First(text) => {
            session.set_custom_count(text);
            match session.custom_select() {
                Ok(taken) => {
                    writeln!(out, "selected the first {} rows", taken)?;
                    render(session, out)?;
                }
                Err(err) => writeln!(
                    out,
                    "{} (input kept: {:?})",
                    err,
                    session.custom_count_text()
                )?,
            }
        }
        Command::Toggle(id) => {
            let payload = toggled_payload(session, id)?;
            match session.widget_selection_changed(&payload) {
                Ok(_) => render(session, out)?,
                Err(err) => writeln!(out, "{}", err)?,
            }
        }
        Command::Show => render(session, out)?,
        Command::Selected => {
            let ids: Vec<String> = session
                .selection()
                .sorted_ids()
                .iter()
                .map(ToString::to_string)
                .collect();
            writeln!(out, "{} selected: [{}]", ids.len(), ids.join(", "))?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// What the table would report after the user clicks the checkbox of `id`:
/// every checked row of the current page, with `id` flipped.
fn toggled_payload<S: RecordSource>(session: &Session<S>, id: RecordId) -> Result<Value> {
    let mut rows = Vec::new();
    let mut found = false;
    for record in session.visible_selected() {
        if record.id == id {
            found = true;
        } else {
            rows.push(serde_json::to_value(record)?);
        }
    }
    if !found {
        rows.push(serde_json::json!({ "id": id }));
    }
    Ok(Value::Array(rows))
}

fn report<S, W>(session: &Session<S>, result: Result<(), BrowseError>, out: &mut W) -> Result<()>
where
    S: RecordSource,
    W: Write,
{
    if let Err(err) = result {
        writeln!(out, "{}", err)?;
    }
    render(session, out)
}

pub fn render<S, W>(session: &Session<S>, out: &mut W) -> Result<()>
where
    S: RecordSource,
    W: Write,
{
    let selection = session.selection();
    for record in session.records() {
        let mark = if selection.is_selected(record.id) { "x" } else { " " };
        writeln!(out, "[{}] {}", mark, record)?;
    }
    if session.records().is_empty() {
        writeln!(out, "(no records loaded)")?;
    }

    let pager = session.pagination();
    let links: Vec<String> = pager
        .page_links()
        .into_iter()
        .map(|page| {
            if page == pager.current_page() {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();
    writeln!(
        out,
        "{} {} {}",
        if pager.has_previous() { "<" } else { " " },
        links.join(" "),
        if pager.has_next() { ">" } else { " " },
    )?;
    writeln!(out, "{}", session.summary())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_browser::{BrowserConfig, MemorySource};
    use folio_core::Record;
    use pretty_assertions::assert_eq;

    fn session() -> Session<MemorySource> {
        let records = (1..=10)
            .map(|id| Record::new(id * 10, format!("Artwork {}", id)))
            .collect();
        Session::new(
            MemorySource::new(records),
            &BrowserConfig::default().page_size(4),
        )
        .unwrap()
    }

    async fn run(session: &mut Session<MemorySource>, line: &str) -> String {
        let mut out = Vec::new();
        let command: Command = line.parse().unwrap();
        execute(session, command, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("page 3".parse::<Command>().unwrap(), Command::Page(3));
        assert_eq!("  next ".parse::<Command>().unwrap(), Command::Next);
        assert_eq!(
            "first  5 ".parse::<Command>().unwrap(),
            Command::First("5".to_string())
        );
        assert_eq!(
            "first".parse::<Command>().unwrap(),
            Command::First(String::new())
        );
        assert_eq!(
            "toggle 42".parse::<Command>().unwrap(),
            Command::Toggle(RecordId(42))
        );
        assert_eq!("".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);

        assert!("page two".parse::<Command>().is_err());
        assert!("toggle".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn test_toggle_round_trip_through_widget_path() {
        let mut session = session();
        run(&mut session, "page 1").await;

        run(&mut session, "toggle 20").await;
        run(&mut session, "toggle 40").await;
        assert_eq!(session.selection().sorted_ids(), vec![RecordId(20), RecordId(40)]);

        run(&mut session, "page 2").await;
        run(&mut session, "toggle 50").await;

        run(&mut session, "page 1").await;
        run(&mut session, "toggle 20").await;
        assert_eq!(session.selection().sorted_ids(), vec![RecordId(40), RecordId(50)]);
    }

    #[tokio::test]
    async fn test_toggle_off_page_is_reported() {
        let mut session = session();
        run(&mut session, "page 1").await;
        let output = run(&mut session, "toggle 90").await;
        assert!(output.contains("not on the loaded page"));
        assert!(session.selection().is_empty());
    }

    #[tokio::test]
    async fn test_first_with_bad_count_keeps_input() {
        let mut session = session();
        run(&mut session, "page 1").await;
        let output = run(&mut session, "first 0").await;
        assert!(output.contains("invalid count"));
        assert!(output.contains("input kept: \"0\""));

        run(&mut session, "first 9").await;
        assert_eq!(session.selection().count(), 4);
        assert_eq!(session.custom_count_text(), "");
    }

    #[tokio::test]
    async fn test_render_shows_marks_and_summary() {
        let mut session = session();
        run(&mut session, "page 2").await;
        let output = run(&mut session, "select-page").await;

        assert!(output.starts_with("selected 4 more\n[x] #50 Artwork 5\n"));
        assert!(output.contains("< 1 [2] 3 >"));
        assert!(output.contains("4 artworks selected | 10 artworks | page 2 of 3"));
    }

    #[tokio::test]
    async fn test_quit_and_edges() {
        let mut session = session();
        let mut out = Vec::new();
        assert_eq!(
            execute(&mut session, Command::Quit, &mut out).await.unwrap(),
            Flow::Quit
        );

        run(&mut session, "page 3").await;
        let output = run(&mut session, "next").await;
        assert!(output.contains("page 3 of 3"));

        let output = run(&mut session, "page 0").await;
        assert!(output.contains("invalid page index 0"));
    }
}
