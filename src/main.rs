// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

use bevy::prelude::*;
use clap::Parser;
use retro_snake::game::assets::check_asset_files;
use retro_snake::{cmdline::Args, AppPlugin};


fn main() -> AppExit {
    let args = Args::parse();
    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return AppExit::error();
        }
    };

    let missing = check_asset_files(&config.asset_root());
    if !missing.is_empty() {
        for err in &missing {
            eprintln!("error: {err}");
        }
        return AppExit::error();
    }

    App::new().add_plugins(AppPlugin::new(config)).run()
}
