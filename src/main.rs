use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process::ExitCode;

use rolabelimg2dota::{convert_dota_to_rolabelimg, convert_rolabelimg_to_dota, Cli, Command};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Ro2Dota(args) => {
            if !input_dir_exists(&args.xml_dir) {
                return ExitCode::FAILURE;
            }
            info!("Converting RoLabelImg XML to DOTA TXT...");
            convert_rolabelimg_to_dota(args)
        }
        Command::Dota2Ro(args) => {
            if !input_dir_exists(&args.txt_dir) {
                return ExitCode::FAILURE;
            }
            info!("Converting DOTA TXT to RoLabelImg XML...");
            convert_dota_to_rolabelimg(args)
        }
    };

    match result {
        Ok(stats) => {
            stats.print_summary();
            println!("Conversion complete!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Conversion aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn input_dir_exists(dir: &Path) -> bool {
    if dir.is_dir() {
        true
    } else {
        error!("The specified input directory does not exist: {}", dir.display());
        false
    }
}
