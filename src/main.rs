use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scrapper::app::SimApp;
use scrapper::config::CharacterConfig;
use scrapper::engine::InputScript;
use scrapper::error::SetupError;
use scrapper::systems::PHYSICS_DT;

#[derive(Parser)]
#[command(name = "scrapper", about = "Headless player state machine runner")]
struct Args {
    /// Character file (RON). Defaults to the built-in brawler.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input script (RON). Defaults to the built-in demo.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Ticks to simulate. Defaults to the length of the script.
    #[arg(long)]
    ticks: Option<u64>,

    /// Seconds per tick.
    #[arg(long, default_value_t = PHYSICS_DT)]
    dt: f32,

    /// Print the resolved character config as RON and exit.
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<(), SetupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CharacterConfig::load(path)?,
        None => CharacterConfig::default(),
    };

    if args.dump_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    let script = match &args.script {
        Some(path) => InputScript::load(path)?,
        None => InputScript::demo(),
    };
    let ticks = args.ticks.unwrap_or_else(|| script.len_ticks());

    info!(character = %config.name, ticks, dt = args.dt, "starting simulation");
    let mut sim = SimApp::new(Arc::new(config), script, args.dt)?;
    sim.run(ticks);

    let scene = sim.scene();
    let dummy_health = sim.health(scene.dummy).map(|h| h.current).unwrap_or(0);
    println!(
        "{} ticks, {} transitions, {} hits, final state {}, dummy health {}",
        sim.tick_count(),
        sim.transitions().len(),
        sim.hits().len(),
        sim.player_state(),
        dummy_health,
    );
    Ok(())
}
