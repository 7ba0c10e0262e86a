mod fields;
mod output;

use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    form::FormDraft,
    list::SortDirection,
    ClientSettings, HrApi, HttpHrClient, NoticeKind, Resource, ScreenSession, SortField,
};
use serde::Serialize;
use shared::domain::{Candidate, Company, Department, Employee};
use tracing_subscriber::EnvFilter;

use crate::fields::{CandidateArgs, CompanyArgs, DepartmentArgs, EmployeeArgs, FieldArgs};

#[derive(Parser, Debug)]
#[command(name = "hrctl", about = "Manage the HR console's records from the terminal")]
struct Cli {
    /// Settings file; defaults to the per-user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides the configured API base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Print JSON instead of aligned text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    Companies(CompanyCommand),
    #[command(subcommand)]
    Departments(DepartmentCommand),
    #[command(subcommand)]
    Employees(EmployeeCommand),
    #[command(subcommand)]
    Candidates(CandidateCommand),
    #[command(subcommand)]
    Salaries(SalaryCommand),
}

#[derive(Args, Debug, Clone, Default)]
struct ListArgs {
    /// Case-insensitive substring matched against the searchable fields.
    #[arg(long)]
    search: Option<String>,
    /// Column to sort by, e.g. `name` or `applied-at`.
    #[arg(long)]
    sort: Option<String>,
    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    desc: bool,
}

enum Action<A> {
    List(ListArgs),
    Add(A),
    Update(String, A),
    Delete(String),
}

macro_rules! entity_command {
    ($name:ident, $args:ty) => {
        #[derive(Subcommand, Debug)]
        enum $name {
            /// List records.
            List(ListArgs),
            /// Create a record.
            Add($args),
            /// Replace the editable fields of a record.
            Update {
                id: String,
                #[command(flatten)]
                fields: $args,
            },
            /// Delete a record.
            Delete { id: String },
        }

        impl From<$name> for Action<$args> {
            fn from(command: $name) -> Self {
                match command {
                    $name::List(args) => Action::List(args),
                    $name::Add(fields) => Action::Add(fields),
                    $name::Update { id, fields } => Action::Update(id, fields),
                    $name::Delete { id } => Action::Delete(id),
                }
            }
        }
    };
}

entity_command!(CompanyCommand, CompanyArgs);
entity_command!(DepartmentCommand, DepartmentArgs);
entity_command!(EmployeeCommand, EmployeeArgs);
entity_command!(CandidateCommand, CandidateArgs);

#[derive(Subcommand, Debug)]
enum SalaryCommand {
    /// List salary amounts.
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = ClientSettings::load(cli.config.as_deref()).context("load settings")?;
    if let Some(base_url) = cli.base_url.clone() {
        settings.base_url = base_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api: Arc<dyn HrApi> = Arc::new(HttpHrClient::from_settings(&settings)?);
    tracing::debug!(base_url = %settings.base_url, "using API");

    let out = Output { json: cli.json };
    match cli.command {
        Command::Companies(cmd) => run::<Company, _>(api, &settings, cmd.into(), out).await,
        Command::Departments(cmd) => run::<Department, _>(api, &settings, cmd.into(), out).await,
        Command::Employees(cmd) => run::<Employee, _>(api, &settings, cmd.into(), out).await,
        Command::Candidates(cmd) => run::<Candidate, _>(api, &settings, cmd.into(), out).await,
        Command::Salaries(SalaryCommand::List) => list_salaries(&*api, out).await,
    }
}

#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
}

async fn run<R, A>(
    api: Arc<dyn HrApi>,
    settings: &ClientSettings,
    action: Action<A>,
    out: Output,
) -> Result<()>
where
    R: Resource + Serialize,
    R::Id: for<'a> From<&'a str>,
    A: FieldArgs<Field = <R::Draft as FormDraft>::Field>,
{
    let mut session = ScreenSession::<R>::new(api, settings.confirm_deletes);
    session.mount().await;
    if let Some(notice) = session.screen().notice() {
        if notice.kind == NoticeKind::Failure {
            bail!("{}", notice.message);
        }
    }

    match action {
        Action::List(args) => list(&mut session, args, out),
        Action::Add(fields) => {
            assign(&mut session, &fields);
            submit(&mut session, out).await
        }
        Action::Update(id, fields) => {
            let id = R::Id::from(id.as_str());
            if !session.screen_mut().edit_id(&id) {
                bail!("{} {id} not found", R::KIND.singular());
            }
            assign(&mut session, &fields);
            submit(&mut session, out).await
        }
        Action::Delete(id) => {
            session.delete(R::Id::from(id.as_str())).await;
            report(&session, out)
        }
    }
}

fn list<R>(session: &mut ScreenSession<R>, args: ListArgs, out: Output) -> Result<()>
where
    R: Resource + Serialize,
{
    let screen = session.screen_mut();
    if let Some(term) = args.search {
        screen.set_search(term);
    }
    if let Some(token) = args.sort {
        let field = R::Sort::parse(&token).ok_or_else(|| {
            let valid: Vec<_> = R::Sort::ALL.iter().map(|f| f.name()).collect();
            anyhow!("unknown sort column {token:?}, expected one of: {}", valid.join(", "))
        })?;
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        screen.view_mut().set_sort(field, direction);
    }

    let screen = session.screen();
    let visible = screen.visible();
    if out.json {
        println!("{}", output::render_json(&visible)?);
        return Ok(());
    }

    let mut columns = vec!["ID"];
    columns.extend_from_slice(R::COLUMNS);
    let rows: Vec<Vec<String>> = visible
        .iter()
        .map(|record| {
            let mut row = vec![record.id().to_string()];
            row.extend(screen.cells(record));
            row
        })
        .collect();
    print!("{}", output::render_table(&columns, &rows));
    Ok(())
}

fn assign<R, A>(session: &mut ScreenSession<R>, fields: &A)
where
    R: Resource,
    A: FieldArgs<Field = <R::Draft as FormDraft>::Field>,
{
    for (field, value) in fields.assignments() {
        let value = value.resolve(session.screen().refs());
        session.screen_mut().set_field(field, value);
    }
}

async fn submit<R: Resource>(session: &mut ScreenSession<R>, out: Output) -> Result<()> {
    if !session.submit().await {
        let messages: Vec<&str> = session
            .screen()
            .form()
            .errors()
            .iter()
            .map(|(_, message)| message)
            .collect();
        bail!("{}", messages.join("; "));
    }
    report(session, out)
}

fn report<R: Resource>(session: &ScreenSession<R>, out: Output) -> Result<()> {
    let Some(notice) = session.screen().notice() else {
        return Ok(());
    };
    let success = notice.kind == NoticeKind::Success;
    if out.json {
        println!("{}", output::notice_json(success, &notice.message));
    } else if success {
        println!("{}", notice.message);
    }
    if !success {
        bail!("{}", notice.message);
    }
    Ok(())
}

async fn list_salaries(api: &dyn HrApi, out: Output) -> Result<()> {
    let mut salaries = api.list_salaries().await.context("Failed to load salaries")?;
    salaries.sort_by(|a, b| a.amount.total_cmp(&b.amount));
    if out.json {
        println!("{}", output::render_json(&salaries)?);
        return Ok(());
    }
    let rows: Vec<Vec<String>> = salaries
        .iter()
        .map(|s| vec![s.id.to_string(), s.label()])
        .collect();
    print!("{}", output::render_table(&["ID", "Amount"], &rows));
    Ok(())
}
