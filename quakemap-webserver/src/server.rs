//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::runtime_config::{config_from_args, service_from_args};
use crate::static_files::StaticFiles;
use actix_cors::Cors;
use actix_files::Files;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use clap::ArgMatches;
use quakemap_service::map_service::MapService;
use std::path::Path;
use std::str::FromStr;

lazy_static! {
    static ref STATIC_FILES: StaticFiles = StaticFiles::init();
}

/// Application state
struct AppState {
    service: MapService,
    cache_max_age: u32,
}

#[derive(Deserialize)]
struct MapQuery {
    /// Active base layer of the returned map
    basemap: Option<String>,
}

fn json_response(json: serde_json::Value, cache_max_age: u32) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(CacheControl(vec![CacheDirective::MaxAge(cache_max_age)]))
        .json(json)
}

fn internal_error(err: serde_json::Error) -> HttpResponse {
    error!("JSON serialization failed: {}", err);
    HttpResponse::InternalServerError().finish()
}

/// Run one acquisition session and return the composed map
async fn map_json(state: web::Data<AppState>, query: web::Query<MapQuery>) -> HttpResponse {
    let mut session = state.service.run_session().await;
    if let Some(ref basemap) = query.basemap {
        if let Err(err) = session.map.select_base_layer(basemap) {
            return HttpResponse::BadRequest().body(err);
        }
    }
    match session.get_map_json() {
        Ok(json) => json_response(json, state.cache_max_age),
        Err(err) => internal_error(err),
    }
}

async fn legend_json(state: web::Data<AppState>) -> HttpResponse {
    match state.service.get_legend_json() {
        Ok(json) => json_response(json, state.cache_max_age),
        Err(err) => internal_error(err),
    }
}

async fn legend_html(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(state.service.get_legend_html())
}

async fn basemaps_json(state: web::Data<AppState>) -> HttpResponse {
    match state.service.get_basemaps_json() {
        Ok(json) => json_response(json, state.cache_max_age),
        Err(err) => internal_error(err),
    }
}

async fn static_file_handler(req: HttpRequest) -> HttpResponse {
    let key = &req.path()[1..];
    if let Some(&(data, media_type)) = STATIC_FILES.content(key) {
        HttpResponse::Ok().content_type(media_type).body(data)
    } else {
        HttpResponse::NotFound().finish()
    }
}

pub fn webserver(args: ArgMatches<'static>) -> std::io::Result<()> {
    let config = config_from_args(&args);
    let service = service_from_args(&config, &args);
    let host = config
        .webserver
        .bind
        .clone()
        .unwrap_or("127.0.0.1".to_string());
    let port = config.webserver.port.unwrap_or(6767);
    let bind_addr = format!("{}:{}", host, port);
    let openbrowser =
        bool::from_str(args.value_of("openbrowser").unwrap_or("true")).unwrap_or(false);
    let workers = config
        .webserver
        .threads
        .map(|threads| threads as usize)
        .unwrap_or_else(num_cpus::get);
    let cache_max_age = config.webserver.cache_control_max_age.unwrap_or(300);
    let static_dirs = config.webserver.static_.clone();

    actix_web::rt::System::new().block_on(async move {
        let server = HttpServer::new(move || {
            let mut app = App::new()
                .app_data(web::Data::new(AppState {
                    service: service.clone(),
                    cache_max_age,
                }))
                .wrap(middleware::Logger::default())
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .send_wildcard()
                        .allowed_methods(vec!["GET"]),
                )
                .service(web::resource("/map.json").route(web::get().to(map_json)))
                .service(web::resource("/legend.json").route(web::get().to(legend_json)))
                .service(web::resource("/legend.html").route(web::get().to(legend_html)))
                .service(web::resource("/basemaps.json").route(web::get().to(basemaps_json)));
            for static_dir in &static_dirs {
                let dir = &static_dir.dir;
                if Path::new(dir).is_dir() {
                    info!("Serving static files from directory '{}'", dir);
                    app = app.service(Files::new(&static_dir.path, dir));
                } else {
                    warn!("Static file directory '{}' not found", dir);
                }
            }
            app.default_service(web::route().to(static_file_handler))
        })
        .workers(workers)
        .bind(&bind_addr)?
        .shutdown_timeout(3) // default: 30s
        .run();

        info!("Map viewer available at http://{}", bind_addr);

        if openbrowser {
            let _res = open::that(format!("http://{}:{}", &host, port));
        }

        server.await
    })
}
