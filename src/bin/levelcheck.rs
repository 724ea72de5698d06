//! Validate a level file and report its per-channel navigation graphs.
//!
//! Intended for level authors: catches malformed JSON, out-of-grid entities,
//! and ghosts that cannot reach the spawn point under the white channel.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use echoes::level::LevelDefinition;
use echoes::lighting::LightChannel;
use echoes::pathfinding::LevelGraph;

#[derive(Parser)]
#[command(name = "levelcheck")]
#[command(about = "Validate a level file and report its navigation graphs")]
struct Args {
    /// Path to the level JSON file
    level: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let text = match std::fs::read_to_string(&args.level) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", args.level.display());
            return ExitCode::FAILURE;
        }
    };

    let level = match LevelDefinition::from_json(&text) {
        Ok(level) => level,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{}: {}x{} tiles, {} bricks, {} ghosts, {} doors, {} signs, {} torches",
        args.level.display(),
        level.size.width,
        level.size.height,
        level.bricks.len(),
        level.ghosts.len(),
        level.doors.len(),
        level.signs.len(),
        level.torches.len()
    );

    let candidates = level.critical_point_candidates();
    for channel in LightChannel::ALL {
        let grid = level.occupancy(channel);
        let occupied = grid.occupied_count();
        let graph = LevelGraph::build(&candidates, grid);
        println!(
            "  {channel:?}: {occupied} solid tiles, {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
    }

    // Pursuit sanity check under the default channel.
    let white = LevelGraph::build(&candidates, level.occupancy(LightChannel::White));
    let spawn = level.spawn.pos.to_pixel();
    for ghost in &level.ghosts {
        let path = white.get_path(ghost.pos.to_pixel(), spawn);
        if path.is_empty() {
            println!(
                "  warning: ghost at ({}, {}) cannot reach the spawn under the white channel",
                ghost.pos.x, ghost.pos.y
            );
        } else {
            println!(
                "  ghost at ({}, {}): {} waypoints to the spawn",
                ghost.pos.x,
                ghost.pos.y,
                path.len()
            );
        }
    }

    ExitCode::SUCCESS
}
