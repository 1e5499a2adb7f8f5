//! Command implementations: each `run_*` talks to the backend, renders to
//! stdout and returns an error for `main` to report.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info_span};

use escale_client::{DownloadProgress, HttpBackend, SheetBackend, Session};
use escale_entry::{EntryBatch, EntryError, MAX_ROWS, SubmitOutcome};
use escale_ingest::read_draft_csv;
use escale_model::{CellValue, RowId, SheetPage, SheetSchema};
use escale_validate::{ColumnProfile, profile_column};
use escale_view::{Direction, QuickSort, TableQuery, available_shortcuts};

use crate::cli::{
    AddArgs, Cli, DeleteArgs, DownloadArgs, EditArgs, QuickSortArg, SchemaArgs, ViewArgs,
};
use escale_cli::render::{issue_table, page_table, schema_table};

fn make_backend(cli: &Cli) -> Result<HttpBackend> {
    let session = Session::new();
    if let Some(token) = &cli.token {
        session.sign_in(token.as_str());
    }
    Ok(HttpBackend::new(&cli.base_url, session)?)
}

pub fn run_schema(cli: &Cli, args: &SchemaArgs) -> Result<()> {
    let backend = make_backend(cli)?;
    let schema = backend.fetch_schema(&args.file, &args.sheet)?;
    if schema.columns.is_empty() {
        bail!("the backend returned no columns for {} / {}", args.file, args.sheet);
    }

    let profiles = if args.profile {
        let page = backend.fetch_page(&args.file, &args.sheet)?;
        Some(profile_columns(&schema, &page))
    } else {
        None
    };

    println!("{} / {} ({} columns)", args.file, args.sheet, schema.columns.len());
    println!("{}", schema_table(&schema, profiles.as_deref()));
    Ok(())
}

/// Infer an observed type per schema column from the fetched rows.
fn profile_columns(schema: &SheetSchema, page: &SheetPage) -> Vec<ColumnProfile> {
    schema
        .columns
        .iter()
        .map(|column| {
            let values: Vec<CellValue> = page
                .rows
                .iter()
                .filter_map(|row| row.cell(&column.name))
                .cloned()
                .collect();
            profile_column(&values, &column.name)
        })
        .collect()
}

pub fn run_view(cli: &Cli, args: &ViewArgs) -> Result<()> {
    let backend = make_backend(cli)?;
    let page = backend.fetch_page(&args.file, &args.sheet)?;

    let mut query = TableQuery::new();
    if let Some(term) = &args.search {
        query.set_search(term.as_str());
    }
    let direction = if args.desc {
        Direction::Descending
    } else {
        Direction::Ascending
    };
    if let Some(column) = &args.sort {
        if !page.headers.iter().any(|header| header == column) {
            bail!("no column named {column:?} in {} / {}", args.file, args.sheet);
        }
        query.set_sort(column, direction);
    } else if let Some(arg) = args.by {
        let shortcut = quick_sort(arg);
        let Some(column) = shortcut.resolve(&page.headers) else {
            let usable: Vec<&str> = available_shortcuts(&page.headers)
                .into_iter()
                .map(|(shortcut, _)| shortcut.label())
                .collect();
            if usable.is_empty() {
                bail!("no {} column in this sheet's headers", shortcut.label());
            }
            bail!(
                "no {} column in this sheet's headers (available: {})",
                shortcut.label(),
                usable.join(", ")
            );
        };
        debug!(column, "quick sort resolved");
        query.set_sort(column, direction);
    }

    let rows = query.apply(&page);
    let matched = rows.len();
    let shown = args.limit.map_or(matched, |limit| limit.min(matched));
    println!("{}", page_table(&page.headers, &rows[..shown], args.columns));
    if shown < matched {
        println!("showing {shown} of {matched} matching rows ({} total)", page.total_rows);
    } else {
        println!("{matched} / {} entries", page.total_rows);
    }
    Ok(())
}

fn quick_sort(arg: QuickSortArg) -> QuickSort {
    match arg {
        QuickSortArg::Vessel => QuickSort::Vessel,
        QuickSortArg::BlDate => QuickSort::BillOfLadingDate,
    }
}

pub fn run_add(cli: &Cli, args: &AddArgs) -> Result<()> {
    let add_span = info_span!("add", file = %args.file, sheet = %args.sheet);
    let _add_guard = add_span.enter();

    let backend = make_backend(cli)?;
    let schema = backend.fetch_schema(&args.file, &args.sheet)?;
    if schema.columns.is_empty() {
        bail!("the backend returned no columns for {} / {}", args.file, args.sheet);
    }
    let mut batch = EntryBatch::new(schema);

    if let Some(path) = &args.from_csv {
        let drafts = read_draft_csv(path, batch.schema(), MAX_ROWS)
            .with_context(|| format!("read drafts from {}", path.display()))?;
        if drafts.is_empty() {
            bail!("no rows found in {}", path.display());
        }
        debug!(rows = drafts.len(), "drafting from CSV");
        batch.initialize_rows(drafts.len());
        for (index, draft) in drafts.iter().enumerate() {
            for (column, value) in draft.cells() {
                if !value.is_empty() {
                    batch.set_cell(index, column, value.as_str())?;
                }
            }
        }
    } else {
        if args.set.is_empty() {
            bail!("nothing to add: pass --set COL=VALUE or --from-csv PATH");
        }
        for (column, value) in &args.set {
            batch.set_cell(0, column, value.as_str())?;
        }
    }

    submit_batch(&backend, &mut batch, &args.file, &args.sheet)
}

pub fn run_edit(cli: &Cli, args: &EditArgs) -> Result<()> {
    let edit_span = info_span!("edit", file = %args.file, sheet = %args.sheet, row_id = args.row_id);
    let _edit_guard = edit_span.enter();

    let backend = make_backend(cli)?;
    let schema = backend.fetch_schema(&args.file, &args.sheet)?;
    if schema.columns.is_empty() {
        bail!("the backend returned no columns for {} / {}", args.file, args.sheet);
    }
    let page = backend.fetch_page(&args.file, &args.sheet)?;
    let id = RowId::new(args.row_id);
    let Some(row) = page.find_row(id) else {
        bail!("no row {id} in {} / {}", args.file, args.sheet);
    };

    let mut batch = EntryBatch::new(schema);
    batch.begin_edit(row);
    for (column, value) in &args.set {
        batch.set_cell(0, column, value.as_str())?;
    }

    submit_batch(&backend, &mut batch, &args.file, &args.sheet)
}

/// Submit the batch and narrate the outcome; on validation failure print
/// the failing cells before bailing so the user sees what to fix.
fn submit_batch(
    backend: &HttpBackend,
    batch: &mut EntryBatch,
    file: &str,
    sheet: &str,
) -> Result<()> {
    match batch.submit(backend) {
        Ok(SubmitOutcome::Created(count)) => {
            println!("Added {count} row(s) to {file} / {sheet}");
            Ok(())
        }
        Ok(SubmitOutcome::Updated(id)) => {
            println!("Updated row {id} in {file} / {sheet}");
            Ok(())
        }
        Err(EntryError::ValidationFailed { count }) => {
            println!("{}", issue_table(batch.errors(), batch.rows()));
            bail!("{count} cell(s) failed validation");
        }
        Err(error) => Err(error.into()),
    }
}

pub fn run_delete(cli: &Cli, args: &DeleteArgs) -> Result<()> {
    let backend = make_backend(cli)?;
    let id = RowId::new(args.row_id);
    if !args.yes {
        let question = format!("Delete row {id} from {} / {}?", args.file, args.sheet);
        if !confirm(&question)? {
            println!("aborted");
            return Ok(());
        }
    }
    backend.delete_row(&args.file, &args.sheet, id)?;
    println!("Deleted row {id} from {} / {}", args.file, args.sheet);
    Ok(())
}

/// Ask a yes/no question on the terminal. Anything but y/yes means no.
fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush().context("flush prompt")?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer).context("read answer")?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

pub fn run_download(cli: &Cli, args: &DownloadArgs) -> Result<()> {
    let backend = make_backend(cli)?;
    let target = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&args.file));

    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {bytes} downloaded")
            .expect("invalid progress template"),
    );
    bar.enable_steady_tick(Duration::from_millis(80));

    let bytes = backend.download_with_progress(&args.file, |progress| {
        if progress.total > 0 && bar.length() != Some(progress.total) {
            bar.set_length(progress.total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")
                    .expect("invalid progress template")
                    .progress_chars("=> "),
            );
        }
        bar.set_position(progress.downloaded);
    })?;
    bar.finish_and_clear();

    fs::write(&target, &bytes).with_context(|| format!("write {}", target.display()))?;
    let size = DownloadProgress::new(bytes.len() as u64, 0).downloaded_display();
    println!("Saved {} ({size}) to {}", args.file, target.display());
    Ok(())
}
