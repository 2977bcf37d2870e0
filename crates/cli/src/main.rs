mod args;

use crate::args::{CellArg, PickArg, PositionArg};
use anyhow::{anyhow, Context};
use config::{Config, File};
use hexmove::{Board, BoardConfig, PickEvent, PickResult, UnitId};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// Replay a sequence of picks against a hex board, printing what a renderer
/// would need to draw after each one.
///
/// A grid is placed at the given origin, and unit 0 is spawned on it. Then each
/// pick is applied in order.
#[derive(Debug, StructOpt)]
#[structopt(name = "hexmove")]
struct Opt {
    /// Path to a config file that defines the board. Supported formats: JSON,
    /// TOML. If omitted, the default config is used (radius 4, half-unit
    /// cells, move budget of 3).
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// World position to place the grid's center at, as X,Y,Z
    #[structopt(long, default_value = "0,0,0")]
    origin: PositionArg,

    /// Cell to spawn unit 0 on, as Q,R
    #[structopt(long, default_value = "0,0")]
    unit_at: CellArg,

    /// How to print each pick result. Supported formats:
    ///
    /// text - One human-readable line per pick
    ///
    /// json - One JSON object per pick
    #[structopt(short = "f", long, default_value = "text")]
    output_format: OutputFormat,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,

    /// Picks to replay, in order. Each one is either `cell:Q,R` or
    /// `unit:ID[@X,Y,Z]`. If a unit pick has no position, the unit is picked
    /// wherever the board last put it.
    picks: Vec<PickArg>,
}

/// Different ways to print pick results
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-format`!
    Text,
    Json,
}

fn load_config(config_path: &Path) -> anyhow::Result<BoardConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Turn a CLI pick into a board event. Unit picks without a position are
/// resolved against the board's own unit registry.
fn resolve_pick(board: &Board, pick: PickArg) -> anyhow::Result<PickEvent> {
    match pick {
        PickArg::Cell(position) => Ok(PickEvent::Cell(position)),
        PickArg::Unit {
            unit,
            world_position: Some(world_position),
        } => Ok(PickEvent::Unit {
            unit,
            world_position,
        }),
        PickArg::Unit {
            unit,
            world_position: None,
        } => {
            let position = board
                .unit_position(unit)
                .ok_or_else(|| anyhow!("unknown unit {}", unit))?;
            let grid = board.grid().ok_or_else(|| anyhow!("no grid placed"))?;
            Ok(PickEvent::Unit {
                unit,
                world_position: grid.layout().hex_to_world(position),
            })
        }
    }
}

fn format_result(result: &PickResult, output_format: OutputFormat) -> String {
    match output_format {
        OutputFormat::Json => result.to_json(),
        OutputFormat::Text => {
            let highlights = &result.highlights;
            let focus = match highlights.focused() {
                Some(position) => position.to_string(),
                None => "none".into(),
            };
            let mut line = format!(
                "focus: {}, move targets: {}",
                focus,
                highlights.move_targets().len()
            );
            if let Some(moved) = &result.moved_unit {
                line.push_str(&format!(
                    ", moved unit {} {} -> {} (world {})",
                    moved.unit, moved.from, moved.to, moved.world_position
                ));
            }
            line
        }
    }
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => BoardConfig::default(),
    };
    let mut board = Board::new(config).context("invalid board config")?;
    board
        .place_grid_from_config(opt.origin.0)
        .context("error placing grid")?;
    board
        .spawn_unit(UnitId(0), opt.unit_at.0)
        .context("error spawning unit")?;

    for pick in opt.picks {
        let event = resolve_pick(&board, pick)?;
        info!("Applying {:?}", event);
        let result = board.pick(event);
        println!("{}", format_result(&result, opt.output_format));
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
