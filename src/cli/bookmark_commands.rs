// src/cli/bookmark_commands.rs
use crate::application::error::ApplicationError;
use crate::application::command::{BookmarkCommand, BookmarkDraft, CommandOutcome};
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::views::bookmark_view::{render, DragMarkers, ViewMode};
use crate::cli::display::show_list;
use crate::cli::error::{CliError, CliResult};
use crate::domain::bookmark::BookmarkId;
use crate::domain::clock::DayHeader;
use crate::domain::services::confirmation::Confirmation;
use crate::domain::services::notification::Notifier;
use crate::infrastructure::confirmation::{AutoConfirm, StdinConfirmation};
use crate::infrastructure::di::service_container::BookmarkController;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::json::{read_bookmarks_file, write_bookmarks_as_json};
use crate::infrastructure::notification::StderrNotifier;
use chrono::{Local, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Command line controller reporting through stderr
fn controller(
    services: &ServiceContainer,
    confirmation: Arc<dyn Confirmation>,
    no_color: bool,
) -> BookmarkController {
    let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier::new(no_color));
    services.bookmark_service(confirmation, notifier)
}

/// Controller that declines deletes, for commands that never remove
fn without_prompt(services: &ServiceContainer, no_color: bool) -> BookmarkController {
    controller(services, Arc::new(AutoConfirm(false)), no_color)
}

fn mode(edit: bool) -> ViewMode {
    if edit {
        ViewMode::Editing
    } else {
        ViewMode::Idle
    }
}

#[instrument(skip(services))]
pub fn list(services: &ServiceContainer, is_json: bool, edit: bool, no_color: bool) -> CliResult<()> {
    let service = without_prompt(services, no_color);
    if is_json {
        write_bookmarks_as_json(service.bookmarks())?;
        return Ok(());
    }
    let view = render(service.bookmarks(), mode(edit), DragMarkers::default());
    show_list(&view, service.bookmarks(), no_color);
    Ok(())
}

#[instrument(skip(services))]
pub fn add(
    services: &ServiceContainer,
    name: String,
    url: String,
    icon: Option<String>,
    no_color: bool,
) -> CliResult<()> {
    let mut service = without_prompt(services, no_color);
    let outcome = service.execute(BookmarkCommand::Add(BookmarkDraft::new(name, url, icon)))?;
    if let CommandOutcome::Added(bookmark) = outcome {
        // id on stdout for scripting
        println!("{}", bookmark.id);
    }
    Ok(())
}

/// Change only the given fields, keeping the others
#[instrument(skip(services))]
pub fn edit(
    services: &ServiceContainer,
    id: BookmarkId,
    name: Option<String>,
    url: Option<String>,
    icon: Option<String>,
    no_color: bool,
) -> CliResult<()> {
    if name.is_none() && url.is_none() && icon.is_none() {
        return Err(CliError::InvalidInput(
            "nothing to change, give --name, --url or --icon".to_string(),
        ));
    }

    let mut service = without_prompt(services, no_color);
    let current = service
        .get_bookmark(id)
        .cloned()
        .ok_or(ApplicationError::BookmarkNotFound(id))?;

    service.execute(BookmarkCommand::Update {
        id,
        name: name.unwrap_or(current.name),
        url: url.unwrap_or(current.url),
        icon: Some(icon.unwrap_or(current.icon)),
    })?;
    Ok(())
}

#[instrument(skip(services))]
pub fn delete(services: &ServiceContainer, id: BookmarkId, yes: bool, no_color: bool) -> CliResult<()> {
    let confirmation: Arc<dyn Confirmation> = if yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(StdinConfirmation)
    };
    let mut service = controller(services, confirmation, no_color);

    match service.execute(BookmarkCommand::Remove { id })? {
        CommandOutcome::Cancelled => Err(CliError::OperationAborted),
        _ => Ok(()),
    }
}

#[instrument(skip(services))]
pub fn move_bookmark(
    services: &ServiceContainer,
    source: BookmarkId,
    target: BookmarkId,
    no_color: bool,
) -> CliResult<()> {
    let mut service = without_prompt(services, no_color);
    for id in [source, target] {
        if service.get_bookmark(id).is_none() {
            return Err(ApplicationError::BookmarkNotFound(id).into());
        }
    }

    if let CommandOutcome::Reordered(false) = service.execute(BookmarkCommand::Reorder { source, target })? {
        eprintln!("Nothing to move");
    }
    Ok(())
}

#[instrument(skip(services))]
pub fn open(services: &ServiceContainer, id: BookmarkId, no_color: bool) -> CliResult<()> {
    let service = without_prompt(services, no_color);
    let bookmark = service
        .get_bookmark(id)
        .ok_or(ApplicationError::BookmarkNotFound(id))?;

    debug!("Opening {}", bookmark.url);
    open::that(&bookmark.url)
        .map_err(|e| CliError::CommandFailed(format!("cannot open {}: {}", bookmark.url, e)))?;
    eprintln!("Opened: {}", bookmark.url);
    Ok(())
}

#[instrument(skip(services))]
pub fn page(services: &ServiceContainer, output: Option<&Path>, edit: bool, no_color: bool) -> CliResult<()> {
    let service = without_prompt(services, no_color);
    let renderer = services.page_renderer()?;
    let view = render(service.bookmarks(), mode(edit), DragMarkers::default());
    let now = Utc::now();
    let header = DayHeader::at(&now.with_timezone(&Local));

    let html = renderer
        .render(&view, &header, services.clock_poller.readings(now))
        .map_err(|e| CliError::CommandFailed(e.to_string()))?;

    match output {
        Some(path) => {
            std::fs::write(path, html)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

pub fn export(services: &ServiceContainer, no_color: bool) -> CliResult<()> {
    let service = without_prompt(services, no_color);
    write_bookmarks_as_json(service.bookmarks())?;
    Ok(())
}

#[instrument(skip(services))]
pub fn import(services: &ServiceContainer, file: &Path, no_color: bool) -> CliResult<()> {
    let records = read_bookmarks_file(file)?;
    let drafts = records
        .into_iter()
        .map(|r| BookmarkDraft::new(r.name, r.url, Some(r.icon)))
        .collect();

    let mut service = without_prompt(services, no_color);
    let report = service.import_bookmarks(drafts)?;

    eprintln!("Imported {} bookmark(s)", report.added);
    if !report.skipped.is_empty() {
        eprintln!("Skipped {}: {}", report.skipped.len(), report.skipped.join(", "));
    }
    Ok(())
}
