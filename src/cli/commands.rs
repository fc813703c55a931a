//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{ConvertOptions, ConvertOutput};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Convert {
            input,
            target,
            output,
            strict,
        }) => {
            let container = build_container(cli)?;
            _convert(
                &container,
                input.as_deref(),
                target.clone(),
                output.as_deref(),
                *strict,
                cli.verbose,
            )
        }
        Some(Commands::Tree { input }) => {
            let container = build_container(cli)?;
            _tree(&container, input.as_deref())
        }
        Some(Commands::Targets) => {
            let container = build_container(cli)?;
            _targets(&container)
        }
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::Infra(InfraError::io("print help", e))),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = match &cli.config {
        Some(file) => Settings::load_with_file(file)?,
        None => {
            let cwd: Option<PathBuf> = std::env::current_dir().ok();
            Settings::load(cwd.as_deref())?
        }
    };
    debug!(?settings, "settings loaded");
    Ok(settings)
}

fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?))
}

#[instrument(skip(container))]
fn _convert(
    container: &ServiceContainer,
    input: Option<&Path>,
    target: Option<String>,
    output_path: Option<&Path>,
    strict: bool,
    verbose: bool,
) -> CliResult<()> {
    let options = ConvertOptions { target, strict };
    let result = container.convert.convert_input(input, &options)?;

    if verbose {
        report(&result);
    }

    match output_path {
        Some(path) => {
            container.convert.write_output(path, &result.text)?;
            output::action("Wrote", &path.display());
        }
        None => output::info(&result.text),
    }
    Ok(())
}

fn report(result: &ConvertOutput) {
    for diagnostic in &result.diagnostics {
        output::warning(diagnostic);
    }
    output::note(&format!(
        "{}: {} line(s), {} block(s)",
        result.target, result.attached, result.blocks
    ));
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, input: Option<&Path>) -> CliResult<()> {
    let text = container.convert.read_input(input)?;
    let tree = container.convert.tree(&text)?;
    output::info(&tree);
    Ok(())
}

fn _targets(container: &ServiceContainer) -> CliResult<()> {
    let default = &container.settings.default_target;
    for target in container.convert.catalog().iter() {
        if &target.name == default {
            output::header(&format!("{} (default)", target.name));
        } else {
            output::header(&target.name);
        }
        for (tag, template) in &target.symbols {
            output::detail(&format!("{}: {}", tag, template));
        }
        output::detail(&format!("comment: {}", target.comment));
        output::detail(&format!("terminal: {}", target.terminal));
    }
    Ok(())
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
