use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;

use jinja_playground::cli::{CliArgs, InputSource};
use jinja_playground::format::format_result;
use jinja_playground::messages::{EditorMsg, Msg};
use jinja_playground::model::{DEFAULT_CONTEXT, DEFAULT_TEMPLATE};
use jinja_playground::settings::{FileSettings, MemorySettings, SettingsStore};
use jinja_playground::subscription::HostPort;
use jinja_playground::{MiniJinjaEngine, Playground, PlaygroundConfig, PlaygroundModel};

fn main() -> Result<()> {
    jinja_playground::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let mut config = PlaygroundConfig::load();
    startup.apply(&mut config);

    let template = read_input(&startup.template, DEFAULT_TEMPLATE)?;
    let context = read_input(&startup.context, DEFAULT_CONTEXT)?;
    let model = PlaygroundModel::with_inputs(&config, template, context);

    let ok = match FileSettings::open_default() {
        Ok(settings) => run(settings, &config, model, startup.selection)?,
        Err(e) => {
            tracing::warn!("Settings unavailable ({}), keeping them in memory", e);
            run(MemorySettings::new(), &config, model, startup.selection)?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Compute the configured view once and print it; `false` if it is an error
fn run<S: SettingsStore>(
    settings: S,
    config: &PlaygroundConfig,
    model: PlaygroundModel,
    selection: Option<jinja_playground::highlight::Selection>,
) -> Result<bool> {
    let mut host = HostPort::new();
    let mut playground =
        Playground::with_model(MiniJinjaEngine::new(), settings, config, model, &mut host)?;

    if selection.is_some() {
        playground.handle(Msg::Editor(EditorMsg::SetSelection(selection)));
    }

    let output = playground
        .output()
        .context("No output produced for the current revision")?;
    let text = format_result(&output.result);
    let ok = output.result.is_ok();
    playground.shutdown();

    if ok {
        print!("{text}");
        if !text.ends_with('\n') {
            println!();
        }
    } else {
        eprintln!("{text}");
    }
    Ok(ok)
}

fn read_input(source: &InputSource, sample: &str) -> Result<String> {
    match source {
        InputSource::Sample => Ok(sample.to_string()),
        InputSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
        InputSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
    }
}
