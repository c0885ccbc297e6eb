use anyhow::Result;
use clap::{arg, value_parser, Command};
use simple_logger::SimpleLogger;

use common::constants::MAX_VOLUME;
use common::controller::VolumeController;
use common::platform::{DefaultActuator, DefaultReader, StepActuator, VolumeReader};
use common::store::FileStore;

fn cli() -> Command {
    Command::new(env!("CARGO_CRATE_NAME"))
        .about("Sets the system volume to an absolute level in discrete steps")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("set")
                .about("Set the volume to an absolute level")
                .arg(
                    arg!(<LEVEL> "Volume level to set (0-50)")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i32)),
                ),
        )
        .subcommand(Command::new("mute").about("Mute, remembering the current level"))
        .subcommand(Command::new("restore").about("Restore the last remembered level"))
        .subcommand(Command::new("toggle").about("Toggle the system mute state"))
        .subcommand(Command::new("get").about("Print the current volume level"))
}

fn controller() -> Result<VolumeController<DefaultActuator, DefaultReader, FileStore>> {
    Ok(VolumeController::new(
        DefaultActuator::new()?,
        DefaultReader::new()?,
        FileStore::new()?,
    ))
}

fn main() -> Result<()> {
    SimpleLogger::new().init().unwrap();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("set", sub_matches)) => {
            if let Some(level) = sub_matches.get_one::<i32>("LEVEL") {
                controller()?.set_absolute(*level)?;
            }
        }
        Some(("mute", _)) => controller()?.set_absolute(0)?,
        Some(("restore", _)) => controller()?.restore_default()?,
        Some(("toggle", _)) => DefaultActuator::new()?.toggle_mute()?,
        Some(("get", _)) => {
            let fraction = DefaultReader::new()?.read_current()?;
            println!("{}", (fraction * MAX_VOLUME as f32) as i32);
        }
        _ => unreachable!(),
    }

    Ok(())
}
