//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use quakemap_core::core::legend::build_legend;
use quakemap_webserver as webserver;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        let timestamp = time::strftime("%Y-%m-%d %H:%M:%S", &t)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        writeln!(
            buf,
            "{}.{:03} {} {}",
            timestamp,
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log_env = env::var("RUST_LOG");
    let rust_log = match (args.value_of("loglevel"), rust_log_env.as_ref()) {
        (None, Ok(rust_log)) => rust_log.as_str(),
        (loglevel, _) => match loglevel.unwrap_or("info") {
            "debug" => "debug,tokio=info,hyper=info,reqwest=info",
            loglevel => loglevel,
        },
    };
    builder.parse_filters(rust_log);

    builder.init();
}

/// Run one acquisition session and write the map document
fn render(args: &ArgMatches<'_>) -> Result<(), String> {
    let config = webserver::config_from_args(args);
    let service = webserver::service_from_args(&config, args);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {}", e))?;
    let session = runtime.block_on(service.run_session());
    if let Some(ref failure) = session.failure {
        warn!("Map incomplete ({}): {}", session.stage, failure);
    }
    let json = session.get_map_json().map_err(|e| e.to_string())?;
    let doc = serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?;
    match args.value_of("output") {
        Some(path) => {
            fs::write(path, doc).map_err(|e| format!("Writing {} failed: {}", path, e))?;
            info!("Map document written to {}", path);
        }
        None => println!("{}", doc),
    }
    Ok(())
}

fn main() {
    dotenv().ok();
    // http://kbknapp.github.io/clap-rs/clap/
    let mut app = App::new("quakemap")
        .version(crate_version!())
        .author("Quakemap Contributors")
        .about("Interactive map of recent earthquakes and tectonic plate boundaries")
        .subcommand(SubCommand::with_name("serve")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --seismic=[URL_OR_PATH] 'Seismic events GeoJSON'
                                              --tectonic=[URL_OR_PATH] 'Plate boundaries GeoJSON'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --bind=[IPADDRESS] 'Bind web server to this address (0.0.0.0 for all)'
                                              --port=[PORT] 'Bind web server to this port'
                                              --openbrowser=[true|false] 'Open map viewer in browser'")
                        .about("Start web server and serve the earthquake map"))
        .subcommand(SubCommand::with_name("render")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --seismic=[URL_OR_PATH] 'Seismic events GeoJSON'
                                              --tectonic=[URL_OR_PATH] 'Plate boundaries GeoJSON'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              -o, --output=[FILE] 'Write map document to FILE instead of stdout'")
                        .about("Fetch data once and print the map document as JSON"))
        .subcommand(SubCommand::with_name("legend")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Print depth legend as HTML"))
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("--seismic=[URL_OR_PATH] 'Seismic events GeoJSON'
                                              --tectonic=[URL_OR_PATH] 'Plate boundaries GeoJSON'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"));

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("serve", Some(sub_m)) => {
                init_logger(sub_m);
                if let Err(e) = webserver::webserver(sub_m.clone()) {
                    error!("{}", e);
                    process::exit(1);
                }
            }
            ("render", Some(sub_m)) => {
                init_logger(sub_m);
                if let Err(e) = render(sub_m) {
                    error!("{}", e);
                    process::exit(1);
                }
            }
            ("legend", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", build_legend().to_html());
            }
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", webserver::gen_config(sub_m));
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}
