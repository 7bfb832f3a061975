//! Encounter Forge CLI
//!
//! Generates legal entities and living sets into RON save files and repairs
//! invalid box entries, using the reference legality backend.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use encounter_forge::reference::{MemorySave, ReferenceBackend, SetText};
use encounter_forge::regen::{regen_sets_from_box, regen_sets_joined, regen_text};
use encounter_forge::{
    initialize_personal_tables, BoxLegalizer, ContainerError, EncounterRequest, Entity,
    ForgeConfig, GameVersion, LivingDexGenerator, LivingDexSettings, SaveContainer, Species,
    Synthesis, TrainerSettings,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Encounter Forge - legal entity synthesis and box repair
#[derive(Parser)]
#[command(name = "encounter-forge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (RON)
    #[arg(short, long, default_value = "forge.ron")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty save file
    NewSave {
        /// Output save file
        path: PathBuf,

        /// Game the save belongs to
        #[arg(short, long, value_parser = parse_game, default_value = "sword")]
        game: GameVersion,

        /// Number of boxes
        #[arg(long, default_value = "32")]
        boxes: usize,

        /// Slots per box
        #[arg(long, default_value = "30")]
        capacity: usize,
    },

    /// Synthesize one legal entity for a save's trainer
    Encounter {
        /// Save file (RON)
        save: PathBuf,

        /// Species name or national dex number
        #[arg(value_parser = parse_species)]
        species: Species,

        /// Form to request; any obtainable form when omitted
        #[arg(short, long)]
        form: Option<u8>,

        #[arg(long)]
        shiny: bool,

        #[arg(long)]
        alpha: bool,

        /// Print the entity as JSON instead of set text
        #[arg(long)]
        json: bool,
    },

    /// Generate a living dex and store it in the save's boxes
    LivingDex {
        /// Save file (RON)
        save: PathBuf,

        /// Generate every obtainable form, not just one per species
        #[arg(long)]
        include_forms: bool,

        #[arg(long)]
        shiny: bool,

        #[arg(long)]
        alpha: bool,

        /// Where to write the filled save; defaults to overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Repair invalid entries in one box or every box
    Legalize {
        /// Save file (RON)
        save: PathBuf,

        /// Box index; every box when omitted
        #[arg(short, long)]
        r#box: Option<usize>,

        /// Where to write the repaired save; defaults to overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a box as set text
    Export {
        /// Save file (RON)
        save: PathBuf,

        /// Box index
        #[arg(short, long, default_value = "0")]
        r#box: usize,

        /// Print the box entries as JSON instead of set text
        #[arg(long)]
        json: bool,
    },
}

fn parse_game(value: &str) -> Result<GameVersion, String> {
    GameVersion::from_str(value).map_err(|_| format!("unknown game '{}'", value))
}

fn parse_species(value: &str) -> Result<Species, String> {
    if let Ok(id) = value.trim_start_matches('#').parse::<u16>() {
        return Ok(Species(id));
    }
    Species::from_name(value).ok_or_else(|| format!("unknown species '{}'", value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&cli.config)?;
    if let Some(path) = &config.personal_data {
        initialize_personal_tables(path)
            .with_context(|| format!("loading personal tables from {}", path.display()))?;
    }
    let trainers = if config.use_trainer_data {
        TrainerSettings::from_path(&config.trainer_path).context("loading trainer database")?
    } else {
        TrainerSettings::default()
    };
    let backend = ReferenceBackend::new();

    match cli.command {
        Commands::NewSave {
            path,
            game,
            boxes,
            capacity,
        } => {
            MemorySave::new(game, boxes, capacity).save(&path)?;
            info!(path = %path.display(), %game, "Created save");
        }

        Commands::Encounter {
            save,
            species,
            form,
            shiny,
            alpha,
            json,
        } => {
            let save = MemorySave::load(&save)?;
            let mut generator =
                LivingDexGenerator::new(&backend).with_max_candidates(config.max_candidates);
            if config.use_trainer_data {
                generator = generator.with_trainer_settings(&trainers);
            }
            let mut request = EncounterRequest::new(species).shiny(shiny).alpha(alpha);
            request.form = form;

            let attempt = generator.get_random_encounter(&save, &request);
            let entity = match attempt.outcome {
                Synthesis::Direct(entity) | Synthesis::Adapted(entity) => entity,
                Synthesis::Rejected(rejection) => {
                    bail!("{} cannot be produced: {}", species, rejection)
                }
            };
            print_entities(&[entity], json)?;
        }

        Commands::LivingDex {
            save: path,
            include_forms,
            shiny,
            alpha,
            output,
        } => {
            let mut save = MemorySave::load(&path)?;
            let settings = LivingDexSettings {
                include_forms: include_forms || config.living_dex.include_forms,
                set_shiny: shiny || config.living_dex.set_shiny,
                set_alpha: alpha || config.living_dex.set_alpha,
            };
            let mut generator =
                LivingDexGenerator::new(&backend).with_max_candidates(config.max_candidates);
            if config.use_trainer_data {
                generator = generator.with_trainer_settings(&trainers);
            }

            let set = generator.generate_living_dex(&save, settings);
            let stored = store_in_boxes(&mut save, set.entities);
            save.save(output.as_deref().unwrap_or(&path))?;
            println!("Stored {} entities ({} attempts)", stored, set.attempts);
        }

        Commands::Legalize {
            save: path,
            r#box,
            output,
        } => {
            let mut save = MemorySave::load(&path)?;
            let mut legalizer = BoxLegalizer::new(&backend);
            if config.use_trainer_data {
                legalizer = legalizer.with_trainer_settings(&trainers);
            }
            let repaired = match r#box {
                Some(index) => legalizer.legalize_box(&mut save, index)?,
                None => legalizer.legalize_boxes(&mut save)?,
            };
            save.save(output.as_deref().unwrap_or(&path))?;
            println!("Legalized {} entities", repaired);
        }

        Commands::Export { save, r#box, json } => {
            let save = MemorySave::load(&save)?;
            if r#box >= save.box_count() {
                return Err(ContainerError::InvalidIndex {
                    index: r#box,
                    count: save.box_count(),
                }
                .into());
            }
            if json {
                let data: Vec<Entity> = save
                    .box_data(r#box)
                    .into_iter()
                    .filter(|e| !e.is_empty())
                    .collect();
                print_entities(&data, true)?;
            } else {
                println!("{}", regen_sets_from_box(&SetText, &save, r#box)?);
            }
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<ForgeConfig> {
    if !path.exists() {
        return Ok(ForgeConfig::default());
    }
    ForgeConfig::load(path).with_context(|| format!("loading config {}", path.display()))
}

fn print_entities(entities: &[Entity], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entities)?);
    } else if let [entity] = entities {
        println!("{}", regen_text(&SetText, entity));
    } else {
        println!("{}", regen_sets_joined(&SetText, entities, "\n\n"));
    }
    Ok(())
}

/// Place entities into empty slots, box by box. Returns how many fit.
fn store_in_boxes(save: &mut MemorySave, entities: Vec<Entity>) -> usize {
    let mut pending = entities.into_iter();
    let mut stored = 0;
    for index in 0..save.box_count() {
        let mut data = save.box_data(index);
        let mut changed = false;
        for slot in data.iter_mut().filter(|slot| slot.is_empty()) {
            let Some(entity) = pending.next() else { break };
            *slot = entity;
            stored += 1;
            changed = true;
        }
        if changed {
            save.set_box_data(&data, index);
        }
    }
    stored
}
