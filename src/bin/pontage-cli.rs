#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pontage::{
    io,
    model::{Plan, Preference, SuggestionId},
    planner::{ManualDay, PlanOptions, Planner},
    storage::{JsonStorage, Storage},
    Lang,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste d'optimisation de congés (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du plan
    #[arg(long, global = true, default_value = "plan.json")]
    plan: String,

    /// CSV des jours fériés (date,name,local_name)
    #[arg(long, global = true, default_value = "holidays.csv")]
    holidays: String,

    /// Offre premium (phases complètes, bouche-trous, ROI)
    #[arg(long, global = true)]
    premium: bool,

    /// Langue des libellés ("fr" ou "en")
    #[arg(long, global = true, default_value = "en")]
    lang: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer un plan initial
    Generate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        country: String,
        /// Budget de jours de congé
        #[arg(long)]
        days: u32,
        #[arg(long, default_value = "balanced")]
        preference: String,
    },

    /// Poser des jours à la main
    AddDays {
        /// liste "YYYY-MM-DD,YYYY-MM-DD,..."
        #[arg(long)]
        dates: String,
        #[arg(long)]
        note: Option<String>,
    },

    /// Retirer un jour ouvré d'un bloc
    RemoveDay {
        #[arg(long)]
        suggestion_id: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
    },

    /// Supprimer un bloc entier
    RemoveSuggestion {
        #[arg(long)]
        suggestion_id: String,
    },

    /// Dépenser le budget restant sans toucher aux blocs en place
    Optimize,

    /// Régénérer la part automatique en conservant les blocs manuels
    Regenerate {
        #[arg(long)]
        preference: Option<String>,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let opts = PlanOptions {
        premium: cli.premium,
        lang: Lang::from_tag(&cli.lang),
        ..PlanOptions::default()
    };
    let storage = JsonStorage::open(&cli.plan)?;
    let holidays = io::import_holidays_csv(&cli.holidays)?;

    let code = match cli.cmd {
        Commands::Generate {
            year,
            country,
            days,
            preference,
        } => {
            let planner = Planner::new(year, country, holidays)?;
            let plan = planner.generate(days, Preference::parse(&preference), &opts)?;
            println!(
                "{} bloc(s), {} jour(s) posé(s) pour {} jour(s) de repos",
                plan.suggestions.len(),
                plan.used_days,
                plan.total_days_off
            );
            storage.save(&plan)?;
            0
        }
        Commands::AddDays { dates, note } => {
            let mut plan = storage.load()?;
            let planner = planner_for(&plan, holidays)?;
            let days = parse_manual_days(&dates, note.as_deref())?;
            let skipped = planner.add_manual_days(&mut plan, &days, &opts)?;
            storage.save(&plan)?;
            for s in &skipped {
                eprintln!("skipped {}: {}", s.date, s.reason.as_str());
            }
            // Code 2 = WARNING/INCOMPLETE
            if skipped.is_empty() {
                0
            } else {
                2
            }
        }
        Commands::RemoveDay {
            suggestion_id,
            date,
        } => {
            let mut plan = storage.load()?;
            let planner = planner_for(&plan, holidays)?;
            let id = SuggestionId::new(suggestion_id);
            let date: NaiveDate = date.parse()?;
            planner.remove_day(&mut plan, &id, date, &opts)?;
            storage.save(&plan)?;
            0
        }
        Commands::RemoveSuggestion { suggestion_id } => {
            let mut plan = storage.load()?;
            let planner = planner_for(&plan, holidays)?;
            let id = SuggestionId::new(suggestion_id);
            planner.remove_suggestion(&mut plan, &id, &opts)?;
            storage.save(&plan)?;
            0
        }
        Commands::Optimize => {
            let mut plan = storage.load()?;
            let planner = planner_for(&plan, holidays)?;
            let spent = planner.optimize_remaining(&mut plan, &opts)?;
            storage.save(&plan)?;
            println!(
                "{} jour(s) ajouté(s), reste {}",
                spent,
                plan.remaining_days()
            );
            0
        }
        Commands::Regenerate { preference } => {
            let mut plan = storage.load()?;
            let planner = planner_for(&plan, holidays)?;
            let preference = preference
                .map(Preference::parse)
                .unwrap_or(plan.preference);
            planner.regenerate_keeping_manual(&mut plan, preference, &opts)?;
            storage.save(&plan)?;
            println!(
                "{} bloc(s), {} jour(s) posé(s) pour {} jour(s) de repos",
                plan.suggestions.len(),
                plan.used_days,
                plan.total_days_off
            );
            0
        }
        Commands::List { out_json, out_csv } => {
            let plan = storage.load()?;
            if let Some(path) = out_json {
                io::export_plan_json(path, &plan)?;
            }
            if let Some(path) = out_csv {
                io::export_suggestions_csv(path, &plan)?;
            }
            // impression compacte
            for s in &plan.suggestions {
                println!(
                    "{} | {} → {} | {}j posés / {}j off | {}{}",
                    s.id.as_str(),
                    s.start_date,
                    s.end_date,
                    s.vacation_days_used,
                    s.total_days_off,
                    s.description,
                    if s.is_manual { " (manuel)" } else { "" }
                );
            }
            println!(
                "total: {}/{} jour(s) posé(s), {} jour(s) de repos",
                plan.used_days, plan.available_days, plan.total_days_off
            );
            0
        }
    };

    std::process::exit(code);
}

fn planner_for(plan: &Plan, holidays: Vec<pontage::Holiday>) -> Result<Planner> {
    Ok(Planner::new(plan.year, plan.country.clone(), holidays)?)
}

fn parse_manual_days(raw: &str, note: Option<&str>) -> Result<Vec<ManualDay>> {
    let mut out = Vec::new();
    for chunk in raw.split(',') {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        let date: NaiveDate = chunk.parse()?;
        out.push(ManualDay {
            date,
            note: note.map(str::to_string),
        });
    }
    if out.is_empty() {
        bail!("no valid date in --dates");
    }
    Ok(out)
}
