//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use fogmap_core::core::config::{
    parse_config, read_config, ApplicationCfg, OverlaySettings, DEFAULT_CONFIG,
};
use fogmap_core::core::Config;
use log::Record;
use std::env;
use std::io::Write;
use std::process;
use time;

mod sim;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap(),
            t.tm_nsec / 1_000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log_env = env::var("RUST_LOG");
    let rust_log = if args.value_of("loglevel").is_none() && rust_log_env.is_ok() {
        rust_log_env.as_ref().unwrap()
    } else {
        args.value_of("loglevel").unwrap_or("info")
    };
    builder.parse_filters(rust_log);

    builder.init();
}

fn config_from_args(args: &ArgMatches<'_>) -> ApplicationCfg {
    if let Some(path) = args.value_of("config") {
        read_config(path).unwrap_or_else(|err| {
            println!("Error reading configuration - {}", err);
            process::exit(1)
        })
    } else {
        parse_config(DEFAULT_CONFIG.to_string(), "").expect("Invalid default configuration")
    }
}

fn simulate(args: &ArgMatches<'_>) {
    let config = config_from_args(args);
    let trace = args.value_of("trace").expect("Missing 'trace' file");
    let out = args.value_of("out").unwrap_or("overlay.svg");
    if let Err(err) = sim::run(&config, trace, out) {
        error!("{}", err);
        process::exit(1)
    }
}

fn main() {
    dotenv().ok();
    let mut app = App::new("fogmap")
        .version(crate_version!())
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("fog-of-war exploration overlay for slippy maps")
        .subcommand(
            SubCommand::with_name("simulate")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(
                    "-c, --config=[FILE] 'Load from custom config file'
                     --trace=<FILE> 'JSON position trace to play back'
                     --out=[FILE] 'SVG output file (Default: overlay.svg)'
                     --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'",
                )
                .about("Play back a position trace and render the overlay"),
        )
        .subcommand(
            SubCommand::with_name("genconfig")
                .args_from_usage(
                    "--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'",
                )
                .about("Generate configuration template"),
        );

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("simulate", Some(sub_m)) => {
                init_logger(sub_m);
                simulate(sub_m);
            }
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", OverlaySettings::gen_config());
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}
