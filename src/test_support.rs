//! In-process stand-ins for OMDb and a poster host.  Must be called from
//! inside an actix system, e.g. a `#[actix_web::test]`.

use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};
use reqwest::Url;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use crate::config::Config;

pub const API_KEY: &str = "test-key";

const NOT_FOUND: &str = r#"{"Response":"False","Error":"Movie not found!"}"#;
const INVALID_KEY: &str = r#"{"Response":"False","Error":"Invalid API key!"}"#;

type Movies = HashMap<String, String>;

pub fn config(base_url: &Url) -> Config {
    Config {
        api_key: API_KEY.to_string(),
        base_url: base_url.clone(),
        timeout: Duration::from_secs(5),
    }
}

/// Answers `GET /?apikey=..&t=..` with the body registered for that title,
/// like OMDb does: always JSON, errors reported in the `Error` field.
pub fn serve_omdb(movies: &[(&str, &str)]) -> Url {
    let movies: Movies = movies
        .iter()
        .map(|(title, body)| (title.to_string(), body.to_string()))
        .collect();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(movies.clone()))
            .route("/", web::get().to(omdb_handler))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    Url::parse(&format!("http://{addr}/")).unwrap()
}

async fn omdb_handler(
    query: web::Query<HashMap<String, String>>,
    movies: web::Data<Movies>,
) -> HttpResponse {
    if query.get("apikey").map(String::as_str) != Some(API_KEY) {
        return HttpResponse::Unauthorized()
            .content_type("application/json")
            .body(INVALID_KEY);
    }

    let body = query
        .get("t")
        .and_then(|title| movies.get(title))
        .map(String::as_str)
        .unwrap_or(NOT_FOUND)
        .to_string();

    HttpResponse::Ok()
        .content_type("application/json")
        .body(body)
}

/// Serves `body` with `status` at `path`, returns the full url of `path`.
pub fn serve_bytes(path: &'static str, status: u16, body: Vec<u8>) -> String {
    let server = HttpServer::new(move || {
        let body = body.clone();
        App::new().route(
            path,
            web::get().to(move || {
                let body = body.clone();
                async move {
                    HttpResponse::build(StatusCode::from_u16(status).unwrap())
                        .content_type("image/jpeg")
                        .body(body)
                }
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    format!("http://{addr}{path}")
}

/// Answers one request with a 200 that promises `declared` bytes, sends
/// `sent` of them and hangs up.
pub fn serve_truncated(declared: usize, sent: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        // Drain the request first, closing with unread input would reset
        // the connection before the headers arrive.
        let mut request = vec![];
        let mut buf = [0; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: {declared}\r\n\r\n"
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&vec![7u8; sent]).unwrap();
        stream.flush().unwrap();
    });

    format!("http://{addr}/p.jpg")
}

/// A url nothing is listening on.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{addr}/")
}
