//! CLI command implementations
//!
//! `serve` boots the record service. The client commands drive a
//! [`StudentBoard`] against a running service, one request-response
//! cycle per invocation.

use std::future::Future;
use std::time::Instant;

use tracing::info;

use crate::http_server::HttpServer;
use crate::observability::{init_logging, LogFormat};
use crate::store::StudentStore;
use crate::ui::render::{render_form_errors, render_notification, render_table};
use crate::ui::{DeleteOutcome, HttpStudentApi, StudentApi, StudentBoard, SubmitOutcome};

use super::args::{Command, ServeArgs, ServerArgs, StudentArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{confirm, write_diagnostic, write_output};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(&args),
        Command::List { server, search } => {
            client(&server, |board| list(board, search))
        }
        Command::Add { server, fields } => client(&server, |board| add(board, fields)),
        Command::Edit { server, id, fields } => {
            client(&server, |board| edit(board, id, fields))
        }
        Command::Delete { server, id, yes } => {
            client(&server, |board| delete(board, id, yes))
        }
    }
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the record service and block until shutdown
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    let config = Config::resolve(args)?;
    init_logging(config.log_format, "info").map_err(CliError::boot_failed)?;

    let url = config.database()?;
    let store = url
        .open()
        .map_err(|e| CliError::boot_failed(format!("Failed to open store {}: {}", url, e)))?;
    let records = store
        .count()
        .map_err(|e| CliError::boot_failed(format!("Failed to read store: {}", e)))?;
    info!(kind = store.kind(), %url, records, "store opened");

    let server = HttpServer::new(config.http.clone(), store);

    let rt = runtime()?;
    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Build a board over HTTP and run one client command on it
fn client<F, Fut>(server: &ServerArgs, command: F) -> CliResult<()>
where
    F: FnOnce(StudentBoard<HttpStudentApi>) -> Fut,
    Fut: Future<Output = CliResult<()>>,
{
    init_logging(LogFormat::Text, "warn").map_err(CliError::boot_failed)?;

    let board = StudentBoard::new(HttpStudentApi::new(server.server.clone()));
    runtime()?.block_on(command(board))
}

/// Print the visible notification, if any
fn announce<A: StudentApi>(board: &StudentBoard<A>) -> CliResult<()> {
    match board.notification_at(Instant::now()) {
        Some(notification) => write_output(&render_notification(notification)),
        None => Ok(()),
    }
}

/// Turn the board's last notification into a command failure
fn failure<A: StudentApi>(board: &StudentBoard<A>) -> CliError {
    let message = board
        .notification_at(Instant::now())
        .map(|n| n.message.clone())
        .unwrap_or_else(|| "Request failed".to_string());
    CliError::request_failed(message)
}

pub async fn list<A: StudentApi>(
    mut board: StudentBoard<A>,
    search: Option<String>,
) -> CliResult<()> {
    if !board.load().await {
        return Err(failure(&board));
    }

    if let Some(text) = search {
        board.set_search(text);
    }

    write_output(&render_table(&board.visible_students()))
}

pub async fn add<A: StudentApi>(mut board: StudentBoard<A>, fields: StudentArgs) -> CliResult<()> {
    board.open_create();
    fill(&mut board, &fields);
    finish_submit(board).await
}

pub async fn edit<A: StudentApi>(
    mut board: StudentBoard<A>,
    id: String,
    fields: StudentArgs,
) -> CliResult<()> {
    if !board.load().await {
        return Err(failure(&board));
    }

    let student = board
        .students()
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .ok_or_else(|| CliError::not_found(&id))?;

    board.edit(&student);
    fill(&mut board, &fields);
    finish_submit(board).await
}

fn fill<A: StudentApi>(board: &mut StudentBoard<A>, fields: &StudentArgs) {
    for (field, value) in fields.provided() {
        board.set_field(field, value);
    }
}

async fn finish_submit<A: StudentApi>(mut board: StudentBoard<A>) -> CliResult<()> {
    match board.submit().await {
        SubmitOutcome::Created(student) | SubmitOutcome::Updated(student) => {
            announce(&board)?;
            write_output(&render_table(&[&student]))
        }
        SubmitOutcome::Invalid => {
            write_diagnostic(&render_form_errors(board.errors()))?;
            Err(failure(&board))
        }
        SubmitOutcome::Failed => Err(failure(&board)),
    }
}

pub async fn delete<A: StudentApi>(
    board: StudentBoard<A>,
    id: String,
    yes: bool,
) -> CliResult<()> {
    delete_with(board, id, yes, confirm).await
}

/// Delete, asking through `ask` unless `yes` is set. A failed prompt aborts
/// the command before any request is sent.
async fn delete_with<A, Q>(
    mut board: StudentBoard<A>,
    id: String,
    yes: bool,
    ask: Q,
) -> CliResult<()>
where
    A: StudentApi,
    Q: FnOnce(&str) -> CliResult<bool>,
{
    let confirmed = yes || ask(&format!("Delete student {}?", id))?;

    match board.delete(&id, || confirmed).await {
        DeleteOutcome::Deleted => announce(&board),
        DeleteOutcome::Declined => write_output("Cancelled."),
        DeleteOutcome::Failed => Err(failure(&board)),
    }
}
