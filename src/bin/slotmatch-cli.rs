#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use slotmatch::{
    allocate, contacts, io, load_slot_table,
    storage::{JsonMappingStore, MappingStore},
    Report, SlotTable,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition sur créneaux (sans serveur)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Table des créneaux (JSON) ; table canonique par défaut
    #[arg(long, global = true)]
    table: Option<String>,

    /// Fichier JSON du mapping email → créneau
    #[arg(long, global = true, default_value = "quals.json")]
    mapping: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Répartir tout le monde et enregistrer le mapping
    Assign {
        /// Un email par ligne
        #[arg(long, requires = "prefs", conflicts_with = "csv")]
        emails: Option<String>,
        /// Un classement par ligne, aligné sur `--emails`
        #[arg(long, requires = "emails")]
        prefs: Option<String>,
        /// CSV `email,preferences`
        #[arg(long)]
        csv: Option<String>,
        /// Mois affiché dans les libellés
        #[arg(long)]
        month: Option<u8>,
        /// Salle affichée dans le rapport
        #[arg(long)]
        location: Option<String>,
    },

    /// Afficher le créneau d'un email
    Lookup {
        #[arg(long)]
        email: String,
    },

    /// Listings des inscrits (par créneau, par nom)
    Contacts {
        #[arg(long)]
        emails: String,
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
    },

    /// Afficher la table des créneaux
    Slots,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let mut table = match &cli.table {
        Some(path) => load_slot_table(path)?,
        None => SlotTable::default(),
    };
    let store = JsonMappingStore::open(&cli.mapping);

    let code = match cli.cmd {
        Commands::Assign {
            emails,
            prefs,
            csv,
            month,
            location,
        } => {
            if month.is_some() {
                table.month = month;
            }
            if location.is_some() {
                table.location = location;
            }
            table.validate()?;

            let requests = match (emails, prefs, csv) {
                (Some(e), Some(p), None) => io::import_requests(e, p)?,
                (None, None, Some(c)) => io::import_requests_csv(c)?,
                _ => bail!("give either --emails and --prefs, or --csv"),
            };
            let alloc = allocate(&table, requests)?;
            let report = Report::build(&alloc, &table);
            eprint!("{}", report.render());

            store
                .save(&report.mapping)
                .with_context(|| format!("saving {}", store.path().display()))?;
            let summary = alloc.summary();
            println!(
                "{} assigned, {} unassigned, {} displacement(s) -> {}",
                summary.assigned,
                summary.unassigned,
                summary.displacements,
                store.path().display()
            );
            // Code 2 = WARNING/INCOMPLETE
            if summary.unassigned > 0 {
                2
            } else {
                0
            }
        }
        Commands::Lookup { email } => match store.lookup(&email)? {
            Some(label) => {
                println!("{} -- {}", email.trim(), label);
                0
            }
            None => {
                eprintln!("{} has no slot", email.trim());
                2
            }
        },
        Commands::Contacts {
            emails,
            first,
            last,
        } => {
            let people = contacts::zip_contacts(
                &io::read_lines(emails)?,
                &io::read_lines(first)?,
                &io::read_lines(last)?,
            )?;
            let mapping = store.load()?;
            let entries = contacts::attach_labels(contacts::dedup(people), &mapping);
            eprintln!("{}", contacts::by_scheduled_time(&entries));
            eprintln!("{}", contacts::by_name(&entries));
            0
        }
        Commands::Slots => {
            for spec in &table.slots {
                println!(
                    "{} | {} | capacity {}",
                    table.label(spec.code),
                    spec.code,
                    spec.capacity
                );
            }
            0
        }
    };

    std::process::exit(code);
}
