//! Interactive browsing session.
//!
//! Reads one command per line and applies it to the [`Dashboard`], printing
//! the refreshed screen after every action. This is the event loop: commands
//! are handled one at a time, in order, on a single task.
//!
//! ```text
//! > district lucknow
//! > per-page 10
//! > page 2
//! > today
//! > reset
//! ```

use crate::dashboard::Dashboard;
use crate::models::selection;
use crate::outputs::terminal::TerminalRenderer;
use crate::paginate::PAGE_SIZE_OPTIONS;
use chrono::NaiveDate;
use std::error::Error;
use std::io::Write;
use std::num::NonZeroUsize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, instrument};

pub const HELP: &str = "\
Commands:
  from <YYYY-MM-DD|clear>    stories on or after a day
  to <YYYY-MM-DD|clear>      stories on or before a day
  category <name|All>        filter by category
  district <name|All>        filter by district
  per-page <n>               stories per page
  page <n>                   jump to a page
  today                      today's top 50 stories
  reset                      clear every filter
  categories                 list category options
  districts                  list district options
  help                       show this text
  quit                       leave the session
";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    From(Option<NaiveDate>),
    To(Option<NaiveDate>),
    Category(Option<String>),
    District(Option<String>),
    PerPage(NonZeroUsize),
    Page(usize),
    Today,
    Reset,
    Categories,
    Districts,
    Help,
    Quit,
}

impl Command {
    /// Parse a line such as `district Lucknow` or `page 2`.
    ///
    /// # Errors
    ///
    /// Returns a message for the reader when the command or its argument is
    /// not understood.
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, arg.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "from" | "start" => parse_day_arg(arg).map(Command::From),
            "to" | "end" => parse_day_arg(arg).map(Command::To),
            "category" => Ok(Command::Category(selection(arg))),
            "district" => Ok(Command::District(selection(arg))),
            "per-page" | "perpage" => arg
                .parse::<NonZeroUsize>()
                .map(Command::PerPage)
                .map_err(|_| {
                    format!(
                        "per-page needs a positive number such as {}, got '{arg}'",
                        PAGE_SIZE_OPTIONS.map(|n| n.to_string()).join(", ")
                    )
                }),
            "page" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Command::Page(n)),
                _ => Err(format!("page needs a positive number, got '{arg}'")),
            },
            "today" => Ok(Command::Today),
            "reset" => Ok(Command::Reset),
            "categories" => Ok(Command::Categories),
            "districts" => Ok(Command::Districts),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("type 'help' for a list of commands".to_string()),
            other => Err(format!("unknown command '{other}'; type 'help'")),
        }
    }
}

fn parse_day_arg(arg: &str) -> Result<Option<NaiveDate>, String> {
    if arg.is_empty() || arg.eq_ignore_ascii_case("clear") {
        return Ok(None);
    }
    NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("expected a date like 2024-05-01, got '{arg}'"))
}

/// Map `value` onto the option it names, ignoring ASCII case.
///
/// Unknown values pass through unchanged so they still filter (to nothing).
fn canonical<'a>(value: String, options: impl IntoIterator<Item = &'a str>) -> String {
    options
        .into_iter()
        .find(|option| option.eq_ignore_ascii_case(&value))
        .map(str::to_string)
        .unwrap_or(value)
}

/// Print what the renderer currently shows plus a status line.
fn show<W: Write>(
    out: &mut W,
    dashboard: &Dashboard,
    renderer: &TerminalRenderer,
) -> std::io::Result<()> {
    write!(out, "{}", renderer.screen())?;
    writeln!(out, "-- {}", dashboard.describe())?;
    Ok(())
}

/// Run commands from `input` until it ends or `quit` is read.
///
/// `today` supplies the local calendar date each time the today shortcut is
/// used.
#[instrument(level = "info", skip_all)]
pub async fn run<I, W, T>(
    dashboard: &mut Dashboard,
    renderer: &mut TerminalRenderer,
    input: I,
    out: &mut W,
    today: T,
) -> Result<(), Box<dyn Error>>
where
    I: AsyncBufRead + Unpin,
    W: Write,
    T: Fn() -> NaiveDate,
{
    show(out, dashboard, renderer)?;
    write!(out, "> ")?;
    out.flush()?;

    let mut lines = input.lines();
    let mut handled = 0usize;
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }
        };
        debug!(?command, "Handling command");
        handled += 1;

        match command {
            Command::From(day) => dashboard.set_start_date(day, renderer),
            Command::To(day) => dashboard.set_end_date(day, renderer),
            Command::Category(category) => {
                let category = category.map(|c| canonical(c, dashboard.category_options()));
                dashboard.set_category(category, renderer);
            }
            Command::District(district) => {
                let district = district.map(|d| canonical(d, dashboard.district_options()));
                dashboard.set_district(district, renderer);
            }
            Command::PerPage(n) => dashboard.set_items_per_page(n, renderer),
            Command::Page(n) => dashboard.go_to_page(n, renderer),
            Command::Today => dashboard.show_today(today(), renderer),
            Command::Reset => dashboard.reset(renderer),
            Command::Categories => {
                writeln!(out, "{}", dashboard.category_options().join(", "))?;
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }
            Command::Districts => {
                writeln!(out, "{}", dashboard.district_options().join(", "))?;
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }
            Command::Help => {
                write!(out, "{HELP}")?;
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }
            Command::Quit => break,
        }

        show(out, dashboard, renderer)?;
        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    info!(commands = handled, "Session ended");
    Ok(())
}
