//! Minimal demo binary: builds a small flat world, runs one search, and
//! prints the resulting waypoints. Mirrors the wiring shape of the
//! teacher's `main.rs` (init logging, load config, run, report) without any
//! of the networked game-client scaffolding that wiring was built around.

use std::error::Error;
use std::sync::atomic::AtomicBool;

use blockpath::{BlockPos, Entity, FluidState, GoalSpec, PathingOptions, SearchJob, WorldSnapshot};

fn main() -> Result<(), Box<dyn Error>> {
    blockpath::logging::init_tracing();

    let mut flat = blockpath::fixtures::FlatWorld::new();
    flat.fill_floor(0, 0..=3, 0);
    flat.fill_floor(0, 6..=15, 0);
    flat.set_fluid(BlockPos::new(4, 0, 0), FluidState::Water);
    flat.set_fluid(BlockPos::new(5, 0, 0), FluidState::Water);
    let world = blockpath::fixtures::SharedFlatWorld::new(flat);

    let start = BlockPos::new(0, 1, 0);
    let goal = BlockPos::new(15, 1, 0);
    let snapshot = WorldSnapshot::build(&world, &[start, goal], 8);

    let mut options = PathingOptions::default();
    blockpath::config::apply_env_overrides(&mut options);

    let job = SearchJob::new(&snapshot, start, GoalSpec::to_point(goal), 32, Entity::humanoid(), &options);
    let cancelled = AtomicBool::new(false);
    let outcome = job.run(&cancelled);

    match outcome.path {
        Some(path) => {
            println!("reaches_destination = {}", path.reaches_destination);
            for waypoint in &path.waypoints {
                println!(
                    "{:?} ladder={} rails={} swimming={}",
                    waypoint.pos, waypoint.on_ladder, waypoint.on_rails, waypoint.swimming
                );
            }
        }
        None => println!("search produced no path (interrupted or unresolvable start)"),
    }

    Ok(())
}
