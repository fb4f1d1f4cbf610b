use std::process;

use time::OffsetDateTime;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;
use treestand::{
    application::{
        board::PostsBoard,
        error::AppError,
        preorder::PreorderSubmitter,
        site::SitePage,
    },
    config::{self, BoardArgs, PostArgs, PreorderArgs},
    domain::{
        posts::{CategoryFilter, PostDraft, QueryState},
        preorders::PreorderForm,
    },
    infra::{headless::HeadlessPage, http::ApiClient, telemetry},
    presentation::views::BoardRenderer,
};

mod print;
mod session;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    if dispatcher::has_been_set() {
        error!(error = %error, origin = report.source, chain = ?report.messages, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, origin = report.source, chain = ?report.messages, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let client = ApiClient::new(&settings.api.base_url)?;
    let renderer = BoardRenderer::new(settings.display.timezone);
    info!(api = %client.base(), timezone = %renderer.timezone(), "treestand client ready");

    match cli_args.command.unwrap_or(config::Command::Page) {
        config::Command::Page => run_page(client, renderer).await,
        config::Command::Board(args) => run_board(client, renderer, args).await,
        config::Command::Post(args) => run_post(client, renderer, args).await,
        config::Command::Preorder(args) => run_preorder(client, args).await,
        config::Command::Session => session::run(client, renderer).await,
    }
}

async fn run_page(client: ApiClient, renderer: BoardRenderer) -> Result<(), AppError> {
    let site = SitePage::new(
        PostsBoard::new(client.clone(), renderer),
        PreorderSubmitter::new(client),
        renderer.timezone(),
    );
    let mut page = HeadlessPage::new();
    site.bootstrap(&mut page, OffsetDateTime::now_utc()).await;

    print::chrome(&page);
    print::board(&page);
    Ok(())
}

async fn run_board(
    client: ApiClient,
    renderer: BoardRenderer,
    args: BoardArgs,
) -> Result<(), AppError> {
    let mut state = QueryState::default();
    state.set_category(CategoryFilter::parse(&args.category));
    state.set_search(&args.search);
    let state = state.starting_at(args.page);

    let board = PostsBoard::with_state(client, renderer, state);
    let mut page = HeadlessPage::new();
    board.start(&mut page).await;

    print::board(&page);
    Ok(())
}

async fn run_post(
    client: ApiClient,
    renderer: BoardRenderer,
    args: PostArgs,
) -> Result<(), AppError> {
    let PostArgs {
        title,
        category,
        display_name,
        body,
    } = args;

    let mut board = PostsBoard::new(client, renderer);
    let mut page = HeadlessPage::new();
    let draft = PostDraft {
        title,
        category,
        display_name,
        body,
    };

    let outcome = board.create_post(&mut page, draft).await;
    print::message(&page.post_message);
    outcome?;
    print::board(&page);
    Ok(())
}

async fn run_preorder(client: ApiClient, args: PreorderArgs) -> Result<(), AppError> {
    let PreorderArgs {
        fields,
        quantity,
        no_installation,
        tree_decorating,
        tree_removal,
    } = args;

    let mut form = PreorderForm {
        want_installation: !no_installation,
        want_tree_decorating: tree_decorating,
        want_tree_removal: tree_removal,
        ..PreorderForm::default()
    };
    for (name, value) in fields {
        form = form.with_field(name, value);
    }
    if let Some(quantity) = quantity {
        form = form.with_field("quantity", quantity);
    }

    let submitter = PreorderSubmitter::new(client);
    let mut page = HeadlessPage::new();
    let outcome = submitter.submit(&mut page, form).await;
    print::message(&page.preorder_message);
    outcome?;
    Ok(())
}
