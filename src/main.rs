use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;

use biodata_lib::{bootstrap, BiodataInput};

#[derive(Debug, Parser)]
#[command(name = "biodata", about = "Single-record biodata store", version)]
struct Cli {
    /// Database file; defaults to the platform data directory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the stored record.
    Show {
        /// Emit the record as JSON instead of the field view.
        #[arg(long)]
        json: bool,
    },
    /// Save (insert or replace) the record.
    Save {
        #[arg(long)]
        name: String,
        #[arg(long)]
        student_id: String,
        #[arg(long, default_value = "")]
        birth_place: String,
        #[arg(long, default_value = "")]
        birth_date: String,
        #[arg(long, default_value = "")]
        address: String,
        /// Opaque photo reference (URI), stored unchanged.
        #[arg(long)]
        photo: Option<String>,
    },
    /// Delete the record.
    Delete,
    /// Print the record as JSON on every change until interrupted.
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    biodata_lib::init_logging();
    let cli = Cli::parse();
    let db_path = match cli.db {
        Some(path) => path,
        None => biodata_lib::db::default_db_path()?,
    };
    let app = bootstrap(&db_path).await?;

    match cli.command {
        Commands::Show { json } => {
            match app.store.get().await? {
                Some(record) if json => println!("{}", serde_json::to_string_pretty(&record)?),
                Some(record) => {
                    println!("Name:        {}", record.name);
                    println!("Student id:  {}", record.student_id);
                    println!("Birth place: {}", record.birth_place);
                    println!("Birth date:  {}", record.birth_date);
                    println!("Address:     {}", record.address);
                    if let Some(photo) = &record.photo_uri {
                        println!("Photo:       {photo}");
                    }
                }
                None if json => println!("{}", json!(null)),
                None => println!("No biodata saved yet."),
            }
        }
        Commands::Save {
            name,
            student_id,
            birth_place,
            birth_date,
            address,
            photo,
        } => {
            let valid = !(name.trim().is_empty() || student_id.trim().is_empty());
            app.controller
                .save(BiodataInput {
                    name,
                    student_id,
                    birth_place,
                    birth_date,
                    address,
                    photo_uri: photo,
                })
                .await?;
            if valid {
                println!("Saved.");
            } else {
                println!("Nothing saved: name and student id must not be blank.");
            }
        }
        Commands::Delete => {
            app.controller.delete().await?;
            println!("Biodata deleted.");
        }
        Commands::Watch => {
            let mut rx = app.controller.current_record();
            loop {
                println!("{}", serde_json::to_string(&*rx.borrow_and_update())?);
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
    }

    Ok(())
}
