use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use shared::{
    domain::format_amount,
    protocol::{CandidateDraft, CompanyDraft, DepartmentDraft, EmployeeDraft, SalaryDraft},
};
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/hr.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Adds salary bands; salaries have no screen of their own.
    SeedSalaries {
        #[arg(required = true)]
        amounts: Vec<f64>,
    },
    /// Fills an empty database with a small demo organisation.
    SeedDemo,
    ListSalaries,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::SeedSalaries { amounts } => {
            for amount in amounts {
                if !amount.is_finite() || amount <= 0.0 {
                    bail!("salary amount must be positive, got {amount}");
                }
                let salary = storage.insert_salary(&SalaryDraft { amount }).await?;
                println!("created salary_id={} amount={}", salary.id, salary.label());
            }
        }
        Command::SeedDemo => seed_demo(&storage).await?,
        Command::ListSalaries => {
            for salary in storage.list_salaries().await? {
                println!("{}\t{}", salary.id, format_amount(salary.amount));
            }
        }
    }

    Ok(())
}

async fn seed_demo(storage: &Storage) -> Result<()> {
    if !storage.list_companies().await?.is_empty() {
        bail!("database already has companies; seed-demo only runs on an empty database");
    }

    let acme = storage
        .insert_company(&CompanyDraft {
            name: "Acme".into(),
        })
        .await?;
    let globex = storage
        .insert_company(&CompanyDraft {
            name: "Globex".into(),
        })
        .await?;

    let engineering = storage
        .insert_department(&DepartmentDraft {
            name: "Engineering".into(),
            company_id: acme.id.clone(),
        })
        .await?;
    let finance = storage
        .insert_department(&DepartmentDraft {
            name: "Finance".into(),
            company_id: globex.id.clone(),
        })
        .await?;

    let junior = storage.insert_salary(&SalaryDraft { amount: 500.0 }).await?;
    let senior = storage.insert_salary(&SalaryDraft { amount: 900.0 }).await?;

    for (name, department, salary) in [
        ("Bob", &engineering, &junior),
        ("Ann", &engineering, &senior),
        ("Carla", &finance, &senior),
    ] {
        storage
            .insert_employee(&EmployeeDraft {
                name: name.into(),
                company_id: department.company_id.clone(),
                department_id: department.id.clone(),
                salary_id: salary.id.clone(),
            })
            .await?;
    }

    let now = Utc::now();
    for (first_name, last_name, position, company, days_ago) in [
        ("Grace", "Hopper", "Engineer", &acme, 12),
        ("Alan", "Turing", "Analyst", &globex, 3),
    ] {
        storage
            .insert_candidate(&CandidateDraft {
                first_name: first_name.into(),
                last_name: last_name.into(),
                email: format!("{}@example.com", first_name.to_lowercase()),
                phone: "555-0100".into(),
                position: position.into(),
                company_id: company.id.clone(),
                applied_at: now - Duration::days(days_ago),
            })
            .await?;
    }

    println!("seeded companies=2 departments=2 salaries=2 employees=3 candidates=2");
    Ok(())
}
