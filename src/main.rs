use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, MultiSelect, Select};
use mealsplit::config::CONFIG;
use mealsplit::presentation::{
    print_entries, print_error, print_info, print_logs, print_people, print_statements, print_success,
};
use mealsplit::{JsonFileLogging, JsonFileStorage, MealsplitError, MealsplitService};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

type Service = MealsplitService<JsonFileLogging, JsonFileStorage>;
type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "mealsplit", version, about = "Track shared meals and work out who owes whom")]
struct Cli {
    /// Directory holding data.json, people.json, activity.json and previous-data/
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Register a person
    AddPerson { name: String },

    /// List registered people
    People,

    /// Remove a person from the registry
    RemovePerson { name: String },

    /// Record an expense
    AddEntry {
        /// Who paid
        #[arg(short, long)]
        payer: String,

        /// Total amount paid
        #[arg(short, long)]
        amount: f64,

        /// Everyone who shared the expense, the payer included if they took part
        #[arg(short = 'w', long = "with", required = true, num_args = 1..)]
        participants: Vec<String>,
    },

    /// List current entries
    Entries,

    /// Delete the most recent entry
    Undo,

    /// Show who should get what from whom
    Settle {
        /// Settle an archived snapshot instead of the current entries
        #[arg(long)]
        archive: Option<String>,

        /// Print statements as JSON
        #[arg(long)]
        json: bool,
    },

    /// List archived snapshots, or show the entries of one
    History { name: Option<String> },

    /// Archive the current entries and start over
    Clear {
        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the activity log
    Log,
}

const MENU: [&str; 12] = [
    "Add new entry",
    "Add person",
    "List people",
    "Remove person",
    "Delete last entry",
    "List current entries",
    "Calculate for each",
    "List previous data",
    "Show activity log",
    "Clear console",
    "Clear data",
    "Exit",
];

async fn run_command(service: &Service, command: Command) -> CliResult<()> {
    match command {
        Command::AddPerson { name } => {
            let person = service.add_person(&name).await?;
            print_success(&format!("{} added successfully", person.name));
        }
        Command::People => print_people(&service.list_people().await?),
        Command::RemovePerson { name } => {
            let removed = service.remove_person(&name).await?;
            if removed.len() > 1 {
                print_info(&format!("Removed {} records named {}", removed.len(), name));
            }
            print_success(&format!("{} removed successfully", name));
        }
        Command::AddEntry {
            payer,
            amount,
            participants,
        } => {
            service.add_entry(&payer, amount, participants).await?;
            print_success("Data saved successfully");
        }
        Command::Entries => print_entries(&service.list_entries().await?),
        Command::Undo => report_deleted(service).await?,
        Command::Settle { archive, json } => {
            let statements = match archive {
                Some(name) => service.settle_archive(&name).await?,
                None => service.settle().await?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&statements)?);
            } else {
                print_statements(&statements);
            }
        }
        Command::History { name: Some(name) } => print_entries(&service.load_archive(&name).await?),
        Command::History { name: None } => {
            let archives = service.list_archives().await?;
            if archives.is_empty() {
                print_info("No previous data found");
            }
            for name in archives {
                println!("{}", name);
            }
        }
        Command::Clear { yes } => {
            if yes || confirm_clear()? {
                report_cleared(service).await?;
            } else {
                print_info("Cancelled");
            }
        }
        Command::Log => print_logs(&service.get_app_logs().await?),
    }
    Ok(())
}

async fn report_deleted(service: &Service) -> CliResult<()> {
    match service.delete_last_entry().await? {
        Some(_) => print_success("Last entry deleted successfully"),
        None => print_info("No entries to delete"),
    }
    Ok(())
}

async fn report_cleared(service: &Service) -> CliResult<()> {
    match service.clear_data().await? {
        Some(name) => print_success(&format!("Data cleared successfully (archived as {})", name)),
        None => print_info("No data to clear"),
    }
    Ok(())
}

fn confirm_clear() -> CliResult<bool> {
    Ok(Confirm::new()
        .with_prompt("Are you sure you want to clear the data?")
        .default(false)
        .interact()?)
}

/// Lets the user pick one of `options` or "Cancel".
fn pick_or_cancel(prompt: &str, options: &[String]) -> CliResult<Option<String>> {
    let mut items: Vec<&str> = options.iter().map(String::as_str).collect();
    items.push("Cancel");
    let choice = Select::new().with_prompt(prompt).items(&items).default(0).interact()?;
    Ok(options.get(choice).cloned())
}

async fn menu_action(service: &Service, action: &str) -> CliResult<()> {
    match action {
        "Add new entry" => {
            let people: Vec<String> = service.list_people().await?.into_iter().map(|p| p.name).collect();
            if people.is_empty() {
                return Err(MealsplitError::NoPeopleRegistered.into());
            }
            let payer = Select::new()
                .with_prompt("Who paid for this?")
                .items(&people)
                .default(0)
                .interact()?;
            let amount: f64 = Input::new().with_prompt("How much did they pay?").interact_text()?;
            let ate = MultiSelect::new().with_prompt("Who ate?").items(&people).interact()?;
            let participants = ate.into_iter().map(|i| people[i].clone()).collect();
            service.add_entry(&people[payer], amount, participants).await?;
            print_success("Data saved successfully");
        }
        "Add person" => {
            let name: String = Input::new().with_prompt("Who is the person?").interact_text()?;
            run_command(service, Command::AddPerson { name }).await?;
        }
        "List people" => run_command(service, Command::People).await?,
        "Remove person" => {
            let people: Vec<String> = service.list_people().await?.into_iter().map(|p| p.name).collect();
            match pick_or_cancel("Who is the person?", &people)? {
                Some(name) => run_command(service, Command::RemovePerson { name }).await?,
                None => print_info("Cancelled"),
            }
        }
        "Delete last entry" => report_deleted(service).await?,
        "List current entries" => run_command(service, Command::Entries).await?,
        "Calculate for each" => print_statements(&service.settle().await?),
        "List previous data" => {
            let archives = service.list_archives().await?;
            if archives.is_empty() {
                print_info("No previous data found");
                return Ok(());
            }
            match pick_or_cancel("Select a file", &archives)? {
                Some(name) => print_entries(&service.load_archive(&name).await?),
                None => print_info("Cancelled"),
            }
        }
        "Show activity log" => run_command(service, Command::Log).await?,
        "Clear console" => {
            print!("\x1B[2J\x1B[1;1H");
            std::io::stdout().flush()?;
        }
        "Clear data" => run_command(service, Command::Clear { yes: false }).await?,
        _ => {}
    }
    Ok(())
}

async fn interactive(service: &Service) -> CliResult<()> {
    loop {
        let choice = Select::new()
            .with_prompt("What do you want to do?")
            .items(&MENU)
            .default(0)
            .max_length(12)
            .interact()?;
        let action = MENU[choice];
        if action == "Exit" {
            return Ok(());
        }
        // A failed action is reported and the menu comes back.
        if let Err(e) = menu_action(service, action).await {
            print_error(&e.to_string());
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(|| CONFIG.data_dir.clone());
    info!("Using data directory {}", data_dir.display());

    let storage = JsonFileStorage::new(&data_dir);
    let logging = JsonFileLogging::new(&data_dir);
    let service = MealsplitService::new(storage, logging, CONFIG.max_amount);

    match cli.command {
        Some(command) => {
            if let Err(e) = run_command(&service, command).await {
                print_error(&e.to_string());
                std::process::exit(1);
            }
        }
        None => interactive(&service).await?,
    }
    Ok(())
}
