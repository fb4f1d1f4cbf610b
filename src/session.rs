//! Line-oriented driver that feeds stdin commands to the board as page events.

use time::OffsetDateTime;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use treestand::{
    application::{
        board::{BoardEvent, PostsBoard},
        error::AppError,
        preorder::PreorderSubmitter,
        site::{PageEvent, SitePage},
    },
    infra::{error::InfraError, headless::HeadlessPage, http::ApiClient},
    presentation::views::BoardRenderer,
};

use crate::print;

const HELP: &str = "commands: next | prev | filter <category> | search [text] | refresh | help | quit";

#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Event(BoardEvent),
    Refresh,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let command = match verb {
        "next" | "n" => SessionCommand::Event(BoardEvent::NextClicked),
        "prev" | "p" => SessionCommand::Event(BoardEvent::PrevClicked),
        "filter" | "f" => SessionCommand::Event(BoardEvent::CategoryChanged(rest.trim().to_string())),
        "search" | "s" => SessionCommand::Event(BoardEvent::SearchKeyDown {
            key: "Enter".to_string(),
            input: rest.to_string(),
        }),
        "refresh" | "r" => SessionCommand::Refresh,
        "help" | "?" => SessionCommand::Help,
        "quit" | "q" | "exit" => SessionCommand::Quit,
        _ => return None,
    };
    Some(command)
}

pub async fn run(client: ApiClient, renderer: BoardRenderer) -> Result<(), AppError> {
    let mut site = SitePage::new(
        PostsBoard::new(client.clone(), renderer),
        PreorderSubmitter::new(client),
        renderer.timezone(),
    );
    let mut page = HeadlessPage::new();
    site.bootstrap(&mut page, OffsetDateTime::now_utc()).await;
    print::board(&page);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.map_err(InfraError::from)? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(SessionCommand::Event(event)) => {
                debug!(?event, "session event");
                site.dispatch(&mut page, PageEvent::Board(event)).await?;
                print::board(&page);
            }
            Some(SessionCommand::Refresh) => {
                site.board().refresh(&mut page).await;
                print::board(&page);
            }
            Some(SessionCommand::Help) => println!("{HELP}"),
            Some(SessionCommand::Quit) => break,
            None => println!("unknown command `{}`; {HELP}", line.trim()),
        }
    }
    Ok(())
}
