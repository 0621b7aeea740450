use chain_drag::{
    config::{load_config, ChainConfig},
    scene::{load_script, Scene},
    ChainError, ChainModel, DragSession, HandleSet, Point3, Ray, SourceId,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chain_drag_cli", version)]
struct Cli {
    /// JSON file with chain parameters
    #[arg(long, global = true)]
    config: Option<String>,
    /// Number of chain segments
    #[arg(long, global = true)]
    segments: Option<usize>,
    /// Rest length of every segment
    #[arg(long, global = true)]
    segment_length: Option<f64>,
    /// World-space anchor of the chain
    #[arg(
        long,
        global = true,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true
    )]
    anchor: Option<Vec<f64>>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every joint's local offset and absolute position.
    Show,
    /// Resolve a ray against the chain's handles.
    #[command(allow_negative_numbers = true)]
    Pick {
        ox: f64,
        oy: f64,
        oz: f64,
        dx: f64,
        dy: f64,
        dz: f64,
    },
    /// Grab a joint's handle, drag it to a target and release it.
    #[command(allow_negative_numbers = true)]
    Drag { joint: usize, x: f64, y: f64, z: f64 },
    /// Run a JSON event script and print the final scene state.
    Replay {
        script: String,
        #[arg(long)]
        output: Option<String>,
    },
}

fn build_config(cli: &Cli) -> Result<ChainConfig, ChainError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ChainConfig::default(),
    };
    if let Some(segments) = cli.segments {
        config.segment_count = segments;
    }
    if let Some(length) = cli.segment_length {
        config.segment_length = length;
    }
    if let Some(anchor) = &cli.anchor {
        config.anchor = Point3::new(anchor[0], anchor[1], anchor[2]);
    }
    config.validate()?;
    Ok(config)
}

fn print_chain(chain: &ChainModel) {
    for (joint, position) in chain.joints().iter().zip(chain.absolute_positions()) {
        println!(
            "joint {}: offset {} position {}",
            joint.index(),
            joint.local_offset,
            position
        );
    }
}

/// Holds `joint` by index and drags it to `target`. Overlapping handle
/// boxes cannot redirect the grab to a neighbour.
fn drag_joint(config: &ChainConfig, joint: usize, target: Point3) -> Result<(), ChainError> {
    let mut chain = ChainModel::from_config(config)?;
    let mut handles = HandleSet::build(&chain, config.handle_size);
    let mut session = DragSession::new(SourceId(0));
    if session.hold(joint, &mut handles)? {
        session.update_drag(target, &mut chain, &mut handles)?;
        session.end_drag(&mut handles);
        println!("Dragged joint {} to {}", joint, target);
    } else {
        println!("Could not grab joint {}", joint);
    }
    print_chain(&chain);
    Ok(())
}

fn run(cli: Cli) -> Result<(), ChainError> {
    let config = build_config(&cli)?;
    let mut scene = Scene::new(&config)?;
    match cli.command {
        Commands::Show => print_chain(scene.chain()),
        Commands::Pick {
            ox,
            oy,
            oz,
            dx,
            dy,
            dz,
        } => {
            let ray = Ray::new(Point3::new(ox, oy, oz), Point3::new(dx, dy, dz));
            match chain_drag::pick::resolve(&ray, scene.handles()) {
                Some(hit) => println!(
                    "Picked joint {} at distance {:.3}",
                    hit.joint_index, hit.distance
                ),
                None => println!("No handle hit"),
            }
        }
        Commands::Drag { joint, x, y, z } => drag_joint(&config, joint, Point3::new(x, y, z))?,
        Commands::Replay { script, output } => {
            let script = load_script(&script)?;
            let reports = scene.run_script(&script)?;
            log::info!("replayed {} frames", reports.len());
            let json = serde_json::to_string_pretty(&scene.snapshot())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Wrote snapshot after {} frames to {}", reports.len(), path);
                }
                None => println!("{}", json),
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env().init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
