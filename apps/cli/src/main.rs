use anyhow::Context;
use clap::Parser;
use estate_catalog::NewProperty;
use estate_cli::cli::{Cli, Commands};
use estate_cli::{output, CatalogClient, ListParams};
use serde::Serialize;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let client = CatalogClient::new(&cli.base_url).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::List {
            name,
            address,
            price_min,
            price_max,
            page,
            page_size,
        } => {
            let params = ListParams {
                name,
                address,
                price_min,
                price_max,
                page,
                page_size,
            };
            let result = client.list(&params).await?;
            if cli.json {
                print_json(&result)?;
            } else {
                print!("{}", output::page(&result));
            }
        }
        Commands::Get { id } => match client.get(&id).await? {
            Some(property) if cli.json => print_json(&property)?,
            Some(property) => print!("{}", output::property(&property)),
            None => {
                eprintln!("Property not found: {id}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Create {
            owner,
            name,
            address,
            price,
            image,
        } => {
            let new = NewProperty {
                owner_id: owner,
                name,
                address,
                price,
                image,
            };
            let created = client.create(&new).await?;
            if cli.json {
                print_json(&created)?;
            } else {
                print!("Created\n{}", output::property(&created));
            }
        }
        Commands::Generate { count } => {
            let generated = client.generate(count).await?;
            if cli.json {
                print_json(&generated)?;
            } else {
                println!("Generated {} listings", generated.inserted);
                print!("{}", output::table(&generated.items));
            }
        }
        Commands::Seed => {
            let outcome = client.seed().await?;
            if cli.json {
                print_json(&outcome)?;
            } else if outcome.inserted == 0 {
                println!("Catalog already populated; nothing seeded");
            } else {
                println!("Seeded {} demo listings", outcome.inserted);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
