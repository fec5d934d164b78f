use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use keycompose_harness::script::parse_modifiers;
use keycompose_harness::{
    fallback_layers, layer_name, load_descriptor_file, parse_script, CommitLog, ContextId,
    HostAdapter, LayoutStore, ModifierState, ScriptStep,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Plays key scripts against keyboard descriptors", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a key script and print what each key produced
    Play {
        /// Descriptor JSON file
        descriptor: PathBuf,

        /// Keyboard id inside the descriptor
        keyboard: String,

        /// Script file to play
        script: Option<PathBuf>,

        /// Inline script, used instead of a file
        #[arg(short, long)]
        eval: Option<String>,
    },

    /// Load a descriptor and summarize its keyboards
    Check {
        /// Descriptor JSON file
        descriptor: PathBuf,
    },

    /// Print the layer fallback chain for a modifier list such as `caps+shift`
    Layers {
        modifiers: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match args.command {
        Command::Play {
            descriptor,
            keyboard,
            script,
            eval,
        } => play(&descriptor, &keyboard, script, eval),
        Command::Check { descriptor } => check(&descriptor),
        Command::Layers { modifiers } => layers(&modifiers),
    }
}

fn load(descriptor: &Path) -> Result<LayoutStore> {
    load_descriptor_file(descriptor)
        .with_context(|| format!("Failed to load {}", descriptor.display()))
}

fn play(
    descriptor: &Path,
    keyboard: &str,
    script: Option<PathBuf>,
    eval: Option<String>,
) -> Result<()> {
    let store = load(descriptor)?;
    if !store.contains(keyboard) {
        bail!(
            "Keyboard '{}' not found in {}",
            keyboard,
            descriptor.display()
        );
    }

    let source = match (eval, script) {
        (Some(inline), _) => inline,
        (None, Some(path)) => read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => bail!("Either a script file or --eval is required"),
    };
    let steps = parse_script(&source)?;

    let mut host = HostAdapter::new(store, CommitLog::new());
    host.focus(ContextId(1));

    for step in steps {
        match step {
            ScriptStep::Focus(context) => host.focus(context),
            ScriptStep::Blur(context) => host.blur(context),
            ScriptStep::Key { line, stroke } => {
                for event in stroke.events() {
                    let alt = host
                        .focused()
                        .and_then(|context| host.engine(context))
                        .map(|engine| engine.is_alt_right_held())
                        .unwrap_or(false);
                    let output = host.dispatch(keyboard, &event);
                    if event.is_key_down() {
                        let modifiers =
                            ModifierState::new(event.caps_lock, event.ctrl, alt, event.shift);
                        println!(
                            "{:>4}  {:<12} [{}] {}",
                            line,
                            event.code,
                            layer_name(&modifiers),
                            output
                        );
                    }
                }
            }
        }
    }

    let log = host.into_sink();
    let mut contexts: Vec<ContextId> = log.commits.iter().map(|(context, _)| *context).collect();
    contexts.sort();
    contexts.dedup();
    for context in contexts {
        println!("{}: {:?}", context, log.text_for(context));
    }
    Ok(())
}

fn check(descriptor: &Path) -> Result<()> {
    let store = load(descriptor)?;

    for (id, layout) in store.iter() {
        println!("{}", id);
        println!(
            "  layers:     {}",
            layout.layer_names().collect::<Vec<_>>().join(", ")
        );
        let dead_keys = layout.all_dead_keys();
        println!(
            "  dead keys:  {}",
            dead_keys.into_iter().collect::<Vec<_>>().join(" ")
        );
        let transforms = layout.transforms();
        println!(
            "  transforms: {} ({} leaves)",
            transforms.iter().map(|(root, _)| root).collect::<Vec<_>>().join(" "),
            transforms.leaf_count()
        );
        for (layer, output) in layout.space_overrides() {
            println!("  space[{}]: {:?}", layer, output);
        }
    }
    Ok(())
}

fn layers(modifiers: &str) -> Result<()> {
    let modifiers = parse_modifiers(modifiers).map_err(anyhow::Error::msg)?;
    let start = layer_name(&modifiers);
    let chain: Vec<&str> = fallback_layers(&start).collect();
    println!("{}", chain.join(" -> "));
    Ok(())
}
