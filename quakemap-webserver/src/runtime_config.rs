//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use clap::ArgMatches;
use quakemap_core::core::config::{ApplicationCfg, DEFAULT_CONFIG};
use quakemap_core::core::{parse_config, read_config, Config};
use quakemap_service::map_service::MapService;
use std::process;
use std::str::FromStr;

fn exit_with(err: String) -> ! {
    println!("Error reading configuration - {} ", err);
    process::exit(1)
}

/// Configuration from `--config` or built-in defaults, with `--bind` and `--port` applied
pub fn config_from_args(args: &ArgMatches) -> ApplicationCfg {
    let mut config: ApplicationCfg = if let Some(cfgpath) = args.value_of("config") {
        info!("Reading configuration from '{}'", cfgpath);
        read_config(cfgpath).unwrap_or_else(|err| exit_with(err))
    } else {
        parse_config(DEFAULT_CONFIG.to_string(), "").unwrap_or_else(|err| exit_with(err))
    };
    if let Some(bind) = args.value_of("bind") {
        config.webserver.bind = Some(bind.to_string());
    }
    if let Some(port) = args.value_of("port") {
        let port = u16::from_str(port)
            .unwrap_or_else(|_| exit_with(format!("Invalid port number `{}`", port)));
        config.webserver.port = Some(port);
    }
    config
}

pub fn service_from_args(config: &ApplicationCfg, args: &ArgMatches) -> MapService {
    let mut service = MapService::from_config(config).unwrap_or_else(|err| exit_with(err));
    service.datasources.override_from_args(args);
    service
}

pub fn gen_config(args: &ArgMatches) -> String {
    let toml = r#"
[webserver]
# Bind address. Use 0.0.0.0 to listen on all adresses.
bind = "127.0.0.1"
port = 6767
#threads = 4
#cache_control_max_age = 300

#[[webserver.static]]
#path = "/static"
#dir = "./public/"
"#;
    let mut config;
    if args.value_of("seismic").is_some() || args.value_of("tectonic").is_some() {
        let service = service_from_args(&config_from_args(args), args);
        config = service.gen_runtime_config();
    } else {
        config = MapService::gen_config();
    }
    config.push_str(toml);
    config
}

#[test]
fn test_gen_config() {
    let args = ArgMatches::new();
    let toml = gen_config(&args);
    println!("{}", toml);
    assert_eq!(Some("# quakemap configuration"), toml.lines().next());

    let config = parse_config(toml, "").unwrap();
    let service = MapService::from_config(&config).unwrap();
    assert_eq!(service.default_basemap.name, "Street");
}

#[test]
fn test_runtime_config() {
    use clap::App;
    use quakemap_service::datasources::FeatureSource;

    let args = App::new("test")
        .args_from_usage(
            "--seismic=[URL_OR_PATH] 'Seismic events GeoJSON'
             --tectonic=[URL_OR_PATH] 'Plate boundaries GeoJSON'",
        )
        .get_matches_from(vec!["", "--seismic", "data/all_week.geojson"]);
    let toml = gen_config(&args);
    println!("{}", toml);
    assert!(toml.contains("path = \"data/all_week.geojson\""));

    let config = parse_config(toml, "").unwrap();
    let service = MapService::from_config(&config).unwrap();
    assert_eq!(service.datasources.seismic.origin(), "data/all_week.geojson");
    assert!(service
        .datasources
        .tectonic
        .origin()
        .starts_with("https://"));
}
